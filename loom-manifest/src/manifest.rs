use std::{path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Config, Error, Project, Result};

/// Root of `loom.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub config: Config,
    pub workspace: WorkspaceManifest,
    #[serde(default)]
    pub projects: Vec<Project>,
}

/// The `[workspace]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceManifest {
    pub name: String,
}

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, "loom.toml")
    }
}

impl Manifest {
    /// Parse a loom.toml file from the given path
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse a loom.toml from a string with a custom filename for error reporting
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::parse(e, content, filename))
    }

    pub fn project(&self, name: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.name == name)
    }

    /// Serialize back to TOML.
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CodeCoverageMode, GenerationOption, Product, TargetReference};

    const MANIFEST: &str = r#"
[config]
generation_options = [
    { organization_name = "Acme" },
    { enable_code_coverage = { relevant = true } },
]

[workspace]
name = "Acme"

[[projects]]
name = "App"
path = "App"

[[projects.targets]]
name = "App"
product = "app"
bundle_id = "com.acme.app"
sources = ["Sources/**"]
dependencies = ["AppKit", { project = "../Core", target = "Core" }]

[[projects.targets]]
name = "AppKit"
product = "framework"
bundle_id = "com.acme.appkit"

[[projects.schemes]]
name = "App"
build = { targets = ["App"] }
profile = { executable = "App" }
"#;

    #[test]
    fn test_parse_manifest() {
        let manifest: Manifest = MANIFEST.parse().unwrap();

        assert_eq!(manifest.workspace.name, "Acme");
        assert_eq!(
            manifest.config.generation_options,
            vec![
                GenerationOption::OrganizationName("Acme".into()),
                GenerationOption::EnableCodeCoverage(CodeCoverageMode::Relevant),
            ]
        );

        let app = manifest.project("App").unwrap();
        assert_eq!(app.targets.len(), 2);
        assert_eq!(app.targets[0].product, Product::App);
        assert_eq!(
            app.targets[0].dependencies,
            vec![
                TargetReference::local("AppKit"),
                TargetReference::project("../Core", "Core"),
            ]
        );
        let scheme = &app.schemes[0];
        assert!(scheme.shared);
        assert_eq!(
            scheme.profile.as_ref().and_then(|p| p.executable.clone()),
            Some(TargetReference::local("App"))
        );
    }

    #[test]
    fn test_to_toml_reparses() {
        let manifest: Manifest = MANIFEST.parse().unwrap();
        let rendered = manifest.to_toml().unwrap();
        let reparsed: Manifest = rendered.parse().unwrap();
        assert_eq!(reparsed, manifest);
    }

    #[test]
    fn test_parse_error_is_reported_with_filename() {
        let err = Manifest::from_str_with_filename("[workspace", "custom.toml").unwrap_err();
        assert!(matches!(*err, Error::Parse { ref filename, .. } if filename == "custom.toml"));
    }

    #[test]
    fn test_unknown_generation_option_fails_parse() {
        let err = Manifest::from_str(
            r#"
[config]
generation_options = [{ enable_warp_drive = true }]

[workspace]
name = "Acme"
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("failed to parse loom.toml"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Manifest::from_file(dir.path().join("loom.toml")).unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }
}
