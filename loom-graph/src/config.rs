//! Validated generation options.

use loom_core::Version;
use serde::Serialize;

use crate::{TargetReference, TestingOptions};

/// Which targets gather coverage in autogenerated schemes, with references
/// resolved to concrete projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeCoverageMode {
    All,
    Relevant,
    Targets(Vec<TargetReference>),
}

/// A generation option after validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationOption {
    ProjectName(String),
    OrganizationName(String),
    DevelopmentRegion(String),
    DisableAutogeneratedSchemes,
    DisableSynthesizedResourceAccessors,
    DisableShowEnvironmentVarsInScriptPhases,
    EnableCodeCoverage(CodeCoverageMode),
    TestingOptions(TestingOptions),
    ResolveDependenciesWithSystemScm,
    DisablePackageVersionLocking,
    DisableBundleAccessors,
    LastUpgradeCheck(Version),
}

/// Ordered generation options.
///
/// Entries are never deduplicated. Every lookup returns the first entry of
/// the requested kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Config {
    pub generation_options: Vec<GenerationOption>,
}

impl Config {
    pub fn new(generation_options: Vec<GenerationOption>) -> Self {
        Self { generation_options }
    }

    fn first<'a, T: 'a>(
        &'a self,
        pick: impl Fn(&'a GenerationOption) -> Option<T>,
    ) -> Option<T> {
        self.generation_options.iter().find_map(pick)
    }

    fn has(&self, option: &GenerationOption) -> bool {
        self.generation_options.contains(option)
    }

    /// Project file name template; `{project_name}` expands to the
    /// project's declared name.
    pub fn project_name_template(&self) -> Option<&str> {
        self.first(|o| match o {
            GenerationOption::ProjectName(template) => Some(template.as_str()),
            _ => None,
        })
    }

    pub fn organization_name(&self) -> Option<&str> {
        self.first(|o| match o {
            GenerationOption::OrganizationName(name) => Some(name.as_str()),
            _ => None,
        })
    }

    pub fn development_region(&self) -> Option<&str> {
        self.first(|o| match o {
            GenerationOption::DevelopmentRegion(region) => Some(region.as_str()),
            _ => None,
        })
    }

    pub fn code_coverage_mode(&self) -> Option<&CodeCoverageMode> {
        self.first(|o| match o {
            GenerationOption::EnableCodeCoverage(mode) => Some(mode),
            _ => None,
        })
    }

    pub fn testing_options(&self) -> Option<TestingOptions> {
        self.first(|o| match o {
            GenerationOption::TestingOptions(options) => Some(*options),
            _ => None,
        })
    }

    pub fn last_upgrade_check(&self) -> Option<Version> {
        self.first(|o| match o {
            GenerationOption::LastUpgradeCheck(version) => Some(*version),
            _ => None,
        })
    }

    pub fn autogenerated_schemes_disabled(&self) -> bool {
        self.has(&GenerationOption::DisableAutogeneratedSchemes)
    }

    pub fn synthesized_resource_accessors_disabled(&self) -> bool {
        self.has(&GenerationOption::DisableSynthesizedResourceAccessors)
    }

    pub fn show_environment_vars_disabled(&self) -> bool {
        self.has(&GenerationOption::DisableShowEnvironmentVarsInScriptPhases)
    }

    pub fn package_version_locking_disabled(&self) -> bool {
        self.has(&GenerationOption::DisablePackageVersionLocking)
    }

    pub fn resolves_dependencies_with_system_scm(&self) -> bool {
        self.has(&GenerationOption::ResolveDependenciesWithSystemScm)
    }

    pub fn bundle_accessors_disabled(&self) -> bool {
        self.has(&GenerationOption::DisableBundleAccessors)
    }
}
