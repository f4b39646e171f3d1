use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    DecodeError, TestingOptions,
    variant::{Keyed, VariantTable, keyed_serde, single},
};

/// Per-project generation options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectOption {
    /// How schemes are autogenerated for this project's targets.
    AutomaticSchemesOptions(AutomaticSchemesOptions),
    /// Skip generating bundle accessors for this project.
    DisableBundleAccessors,
    /// Skip synthesizing typed resource accessors for this project.
    DisableSynthesizedResourceAccessors,
    /// Editor text settings overriding the user's.
    TextSettings(TextSettings),
}

impl ProjectOption {
    fn variants() -> VariantTable<Self> {
        VariantTable::new("ProjectOption")
            .payload("automatic_schemes_options", Self::AutomaticSchemesOptions)
            .flag("disable_bundle_accessors", Self::DisableBundleAccessors)
            .flag(
                "disable_synthesized_resource_accessors",
                Self::DisableSynthesizedResourceAccessors,
            )
            .payload("text_settings", Self::TextSettings)
    }

    pub fn decode(keyed: &Keyed) -> Result<Self, DecodeError> {
        Self::variants().decode(keyed)
    }

    pub fn encode(&self) -> Keyed {
        match self {
            Self::AutomaticSchemesOptions(options) => {
                single("automatic_schemes_options", Value::Object(options.encode()))
            }
            Self::DisableBundleAccessors => single("disable_bundle_accessors", Value::Bool(true)),
            Self::DisableSynthesizedResourceAccessors => {
                single("disable_synthesized_resource_accessors", Value::Bool(true))
            }
            Self::TextSettings(settings) => single("text_settings", settings.to_value()),
        }
    }
}

keyed_serde!(ProjectOption);

/// Autogenerated scheme behavior for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutomaticSchemesOptions {
    Enabled {
        code_coverage_enabled: bool,
        testing_options: TestingOptions,
    },
    Disabled,
}

impl Default for AutomaticSchemesOptions {
    fn default() -> Self {
        Self::Enabled {
            code_coverage_enabled: false,
            testing_options: TestingOptions::empty(),
        }
    }
}

#[derive(Deserialize)]
struct EnabledPayload {
    #[serde(default)]
    code_coverage_enabled: bool,
    #[serde(default)]
    testing_options: TestingOptions,
}

impl AutomaticSchemesOptions {
    fn variants() -> VariantTable<Self> {
        VariantTable::new("AutomaticSchemesOptions")
            .payload_with("enabled", |value| {
                // `enabled = true` means enabled with defaults
                if value == &Value::Bool(true) {
                    return Ok(Self::default());
                }
                EnabledPayload::deserialize(value)
                    .map(|payload| Self::Enabled {
                        code_coverage_enabled: payload.code_coverage_enabled,
                        testing_options: payload.testing_options,
                    })
                    .map_err(|e| e.to_string())
            })
            .flag("disabled", Self::Disabled)
    }

    pub fn decode(keyed: &Keyed) -> Result<Self, DecodeError> {
        Self::variants().decode(keyed)
    }

    pub fn encode(&self) -> Keyed {
        match self {
            Self::Enabled {
                code_coverage_enabled,
                testing_options,
            } => {
                let mut payload = Map::new();
                payload.insert(
                    "code_coverage_enabled".into(),
                    Value::Bool(*code_coverage_enabled),
                );
                payload.insert(
                    "testing_options".into(),
                    Value::Array(
                        testing_options
                            .iter()
                            .map(|flag| Value::from(flag.as_str()))
                            .collect(),
                    ),
                );
                single("enabled", Value::Object(payload))
            }
            Self::Disabled => single("disabled", Value::Bool(true)),
        }
    }
}

keyed_serde!(AutomaticSchemesOptions);

/// Editor text settings; unset fields defer to the user's preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uses_tabs: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indent_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wraps_lines: Option<bool>,
}

impl TextSettings {
    fn to_value(&self) -> Value {
        let mut table = Map::new();
        if let Some(uses_tabs) = self.uses_tabs {
            table.insert("uses_tabs".into(), Value::Bool(uses_tabs));
        }
        if let Some(indent_width) = self.indent_width {
            table.insert("indent_width".into(), Value::from(indent_width));
        }
        if let Some(tab_width) = self.tab_width {
            table.insert("tab_width".into(), Value::from(tab_width));
        }
        if let Some(wraps_lines) = self.wraps_lines {
            table.insert("wraps_lines".into(), Value::Bool(wraps_lines));
        }
        Value::Object(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TestingOption;

    #[derive(Debug, Deserialize)]
    struct Holder {
        options: Vec<ProjectOption>,
    }

    #[test]
    fn test_decode_from_toml() {
        let holder: Holder = toml::from_str(
            r#"
            options = [
                { automatic_schemes_options = { enabled = { code_coverage_enabled = true, testing_options = ["parallelizable"] } } },
                { disable_bundle_accessors = true },
                { text_settings = { uses_tabs = false, indent_width = 4 } },
            ]
            "#,
        )
        .unwrap();

        assert_eq!(
            holder.options,
            vec![
                ProjectOption::AutomaticSchemesOptions(AutomaticSchemesOptions::Enabled {
                    code_coverage_enabled: true,
                    testing_options: TestingOptions::from([TestingOption::Parallelizable]),
                }),
                ProjectOption::DisableBundleAccessors,
                ProjectOption::TextSettings(TextSettings {
                    uses_tabs: Some(false),
                    indent_width: Some(4),
                    ..Default::default()
                }),
            ]
        );
    }

    #[test]
    fn test_enabled_shorthand() {
        let holder: Holder = toml::from_str(
            r#"
            options = [{ automatic_schemes_options = { enabled = true } }]
            "#,
        )
        .unwrap();
        assert_eq!(
            holder.options,
            vec![ProjectOption::AutomaticSchemesOptions(
                AutomaticSchemesOptions::default()
            )]
        );
    }

    #[test]
    fn test_disabled() {
        let holder: Holder = toml::from_str(
            r#"
            options = [{ automatic_schemes_options = { disabled = true } }]
            "#,
        )
        .unwrap();
        assert_eq!(
            holder.options,
            vec![ProjectOption::AutomaticSchemesOptions(
                AutomaticSchemesOptions::Disabled
            )]
        );
    }
}
