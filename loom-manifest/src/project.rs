//! Projects and their targets.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{ProjectOption, Scheme, TargetReference};

/// One project in the workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Declared name; the `project_name` generation option may rename it.
    pub name: String,
    /// Project directory, relative to the manifest (`//` for the root).
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub development_region: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ProjectOption>,
    /// Header inserted at the top of new files created in the IDE.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_header_template: Option<String>,
    #[serde(default)]
    pub targets: Vec<Target>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemes: Vec<Scheme>,
}

/// What a target builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Product {
    App,
    StaticLibrary,
    DynamicLibrary,
    Framework,
    StaticFramework,
    UnitTests,
    UiTests,
    Bundle,
    CommandLineTool,
}

impl Product {
    pub fn is_tests(&self) -> bool {
        matches!(self, Self::UnitTests | Self::UiTests)
    }

    pub fn is_runnable(&self) -> bool {
        matches!(self, Self::App | Self::CommandLineTool)
    }

    /// Products that carry their own resource bundle.
    pub fn bundles_resources(&self) -> bool {
        matches!(
            self,
            Self::App | Self::Framework | Self::Bundle | Self::UnitTests | Self::UiTests
        )
    }

    /// Products compiled as a module other targets can import.
    pub fn is_module(&self) -> bool {
        matches!(
            self,
            Self::StaticLibrary | Self::DynamicLibrary | Self::Framework | Self::StaticFramework
        )
    }
}

/// A target: one product built from a set of sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub name: String,
    pub product: Product,
    /// Product name, defaults to the target name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    pub bundle_id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<String>,
    /// Directory of public headers exported through a module map.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_headers: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<TargetReference>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub settings: IndexMap<String, String>,
}

impl Target {
    pub fn new(name: impl Into<String>, product: Product, bundle_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            product,
            product_name: None,
            bundle_id: bundle_id.into(),
            sources: Vec::new(),
            resources: Vec::new(),
            public_headers: None,
            dependencies: Vec::new(),
            settings: IndexMap::new(),
        }
    }
}
