//! Generation options and the `[config]` table.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    CodeCoverageMode, DecodeError, TestingOptions,
    variant::{Keyed, VariantTable, keyed_serde, single},
};

/// One configurable generation behavior.
///
/// Options are kept as an ordered list; repeated or conflicting entries are
/// allowed here and resolved by whoever reads them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOption {
    /// Project file name template; `{project_name}` expands to the project's
    /// declared name.
    ProjectName(String),
    /// Organization name stamped on every project.
    OrganizationName(String),
    /// Development region stamped on every project.
    DevelopmentRegion(String),
    /// Only generate the schemes declared in the manifest.
    DisableAutogeneratedSchemes,
    /// Skip synthesizing typed accessors for resources.
    DisableSynthesizedResourceAccessors,
    /// Don't echo the environment in script phases.
    DisableShowEnvironmentVarsInScriptPhases,
    /// Coverage mode for autogenerated schemes.
    EnableCodeCoverage(CodeCoverageMode),
    /// Testing flags for autogenerated schemes.
    TestingOptions(TestingOptions),
    /// Resolve package dependencies through the system source control.
    ResolveDependenciesWithSystemScm,
    /// Don't lock package versions.
    DisablePackageVersionLocking,
    /// Skip generating bundle accessors.
    DisableBundleAccessors,
    /// Suppress upgrade warnings up to this tool version (`"X.Y.Z"`).
    LastUpgradeCheck(String),
}

impl GenerationOption {
    /// Coverage for all targets.
    ///
    /// Shorthand kept for manifests written against the flag-only form.
    pub fn enable_code_coverage() -> Self {
        Self::EnableCodeCoverage(CodeCoverageMode::All)
    }

    fn variants() -> VariantTable<Self> {
        VariantTable::new("GenerationOption")
            .payload("project_name", Self::ProjectName)
            .payload("organization_name", Self::OrganizationName)
            .payload("development_region", Self::DevelopmentRegion)
            .flag("disable_autogenerated_schemes", Self::DisableAutogeneratedSchemes)
            .flag(
                "disable_synthesized_resource_accessors",
                Self::DisableSynthesizedResourceAccessors,
            )
            .flag(
                "disable_show_environment_vars_in_script_phases",
                Self::DisableShowEnvironmentVarsInScriptPhases,
            )
            .payload_with("enable_code_coverage", decode_coverage)
            .payload("testing_options", Self::TestingOptions)
            .flag("disable_package_version_locking", Self::DisablePackageVersionLocking)
            .flag(
                "resolve_dependencies_with_system_scm",
                Self::ResolveDependenciesWithSystemScm,
            )
            .flag("disable_bundle_accessors", Self::DisableBundleAccessors)
            .payload("last_upgrade_check", Self::LastUpgradeCheck)
    }

    /// Decode from the keyed form, e.g. `{ organization_name = "Acme" }`.
    pub fn decode(keyed: &Keyed) -> Result<Self, DecodeError> {
        Self::variants().decode(keyed)
    }

    /// Encode into the keyed form.
    pub fn encode(&self) -> Keyed {
        match self {
            Self::ProjectName(template) => single("project_name", Value::from(template.as_str())),
            Self::OrganizationName(name) => single("organization_name", Value::from(name.as_str())),
            Self::DevelopmentRegion(region) => {
                single("development_region", Value::from(region.as_str()))
            }
            Self::DisableAutogeneratedSchemes => flag("disable_autogenerated_schemes"),
            Self::DisableSynthesizedResourceAccessors => {
                flag("disable_synthesized_resource_accessors")
            }
            Self::DisableShowEnvironmentVarsInScriptPhases => {
                flag("disable_show_environment_vars_in_script_phases")
            }
            Self::EnableCodeCoverage(mode) => {
                single("enable_code_coverage", Value::Object(mode.encode()))
            }
            Self::TestingOptions(options) => single(
                "testing_options",
                Value::Array(options.iter().map(|flag| Value::from(flag.as_str())).collect()),
            ),
            Self::ResolveDependenciesWithSystemScm => flag("resolve_dependencies_with_system_scm"),
            Self::DisablePackageVersionLocking => flag("disable_package_version_locking"),
            Self::DisableBundleAccessors => flag("disable_bundle_accessors"),
            Self::LastUpgradeCheck(version) => {
                single("last_upgrade_check", Value::from(version.as_str()))
            }
        }
    }
}

keyed_serde!(GenerationOption);

fn flag(key: &str) -> Keyed {
    single(key, Value::Bool(true))
}

/// `enable_code_coverage = true` reads as the `all` mode.
fn decode_coverage(value: &Value) -> Result<GenerationOption, String> {
    match value {
        Value::Bool(true) => Ok(GenerationOption::enable_code_coverage()),
        Value::Object(keyed) => CodeCoverageMode::decode(keyed)
            .map(GenerationOption::EnableCodeCoverage)
            .map_err(|e| e.to_string()),
        _ => Err("expected a coverage mode table or `true`".to_string()),
    }
}

/// The `[config]` table of a manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Ordered generation options.
    #[serde(default)]
    pub generation_options: Vec<GenerationOption>,
}

impl Config {
    pub fn new(generation_options: Vec<GenerationOption>) -> Self {
        Self { generation_options }
    }
}
