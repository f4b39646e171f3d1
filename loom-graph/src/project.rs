use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;

use crate::{AutomaticSchemesOptions, Product, Scheme, TextSettings};

/// A target identified by its project directory and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TargetReference {
    /// Absolute directory of the project that owns the target.
    pub project_path: PathBuf,
    pub name: String,
}

impl TargetReference {
    pub fn new(project_path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            project_path: project_path.into(),
            name: name.into(),
        }
    }
}

/// Per-project options folded from the project's option list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectOptions {
    pub automatic_schemes: AutomaticSchemesOptions,
    pub disable_bundle_accessors: bool,
    pub disable_synthesized_resource_accessors: bool,
    pub text_settings: Option<TextSettings>,
}

/// A project in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    /// Declared name.
    pub name: String,
    /// Absolute project directory.
    pub path: PathBuf,
    /// Name of the generated project file, without extension.
    pub file_name: String,
    pub organization_name: Option<String>,
    pub development_region: Option<String>,
    pub options: ProjectOptions,
    pub file_header_template: Option<String>,
    /// Written template macros file, once generated.
    pub template_macros: Option<PathBuf>,
    pub targets: Vec<Target>,
    pub schemes: Vec<Scheme>,
}

impl Project {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        let name = name.into();
        Self {
            file_name: name.clone(),
            name,
            path: path.into(),
            organization_name: None,
            development_region: None,
            options: ProjectOptions::default(),
            file_header_template: None,
            template_macros: None,
            targets: Vec::new(),
            schemes: Vec::new(),
        }
    }

    pub fn target(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.name == name)
    }

    pub fn scheme(&self, name: &str) -> Option<&Scheme> {
        self.schemes.iter().find(|s| s.name == name)
    }

    /// Reference to one of this project's targets.
    pub fn reference(&self, target: &str) -> TargetReference {
        TargetReference::new(self.path.clone(), target)
    }

    /// Directory the generated project file lands in.
    pub fn project_file_path(&self) -> PathBuf {
        self.path.join(format!("{}.xcodeproj", self.file_name))
    }

    /// Where derived files (accessors, module maps) are written.
    pub fn derived_path(&self) -> PathBuf {
        self.path.join("Derived")
    }
}

/// A target in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
    pub name: String,
    pub product: Product,
    pub product_name: String,
    pub bundle_id: String,
    pub sources: Vec<PathBuf>,
    pub resources: Vec<PathBuf>,
    pub public_headers: Option<PathBuf>,
    pub dependencies: Vec<TargetReference>,
    pub settings: IndexMap<String, String>,
    /// Generated module map, once synthesized.
    pub module_map: Option<PathBuf>,
    /// Generated resource bundle accessor, once synthesized.
    pub bundle_accessor: Option<PathBuf>,
}

impl Target {
    pub fn new(name: impl Into<String>, product: Product, bundle_id: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            product_name: name.clone(),
            name,
            product,
            bundle_id: bundle_id.into(),
            sources: Vec::new(),
            resources: Vec::new(),
            public_headers: None,
            dependencies: Vec::new(),
            settings: IndexMap::new(),
            module_map: None,
            bundle_accessor: None,
        }
    }

    pub fn depends_on(&self, reference: &TargetReference) -> bool {
        self.dependencies.contains(reference)
    }

    pub fn has_source(&self, path: &Path) -> bool {
        self.sources.iter().any(|s| s == path)
    }
}
