use std::path::PathBuf;

use loom_core::Version;
use serde::Serialize;

use crate::{Project, Scheme, Target, TargetReference};

/// The workspace: owns its projects for one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Workspace {
    pub name: String,
    /// Directory holding the manifest.
    pub path: PathBuf,
    /// Where the workspace file is generated. Defaults to `path`.
    pub output_path: PathBuf,
    /// Project directories in declaration order.
    pub projects: Vec<PathBuf>,
    pub schemes: Vec<Scheme>,
    /// Stable identifier stamped into the workspace file.
    pub identifier: Option<String>,
    pub last_upgrade_check: Option<Version>,
}

impl Workspace {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            name: name.into(),
            output_path: path.clone(),
            path,
            projects: Vec::new(),
            schemes: Vec::new(),
            identifier: None,
            last_upgrade_check: None,
        }
    }

    pub fn scheme(&self, name: &str) -> Option<&Scheme> {
        self.schemes.iter().find(|s| s.name == name)
    }
}

/// A workspace with all of its projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Graph {
    pub workspace: Workspace,
    /// Projects in declaration order.
    pub projects: Vec<Project>,
}

impl Graph {
    pub fn new(workspace: Workspace, projects: Vec<Project>) -> Self {
        let mut workspace = workspace;
        workspace.projects = projects.iter().map(|p| p.path.clone()).collect();
        Self {
            workspace,
            projects,
        }
    }

    pub fn project(&self, path: &std::path::Path) -> Option<&Project> {
        self.projects.iter().find(|p| p.path == path)
    }

    pub fn target(&self, reference: &TargetReference) -> Option<&Target> {
        self.project(&reference.project_path)?.target(&reference.name)
    }

    /// Every target, with its reference, in declaration order.
    pub fn targets(&self) -> impl Iterator<Item = (TargetReference, &Target)> + '_ {
        self.projects.iter().flat_map(|project| {
            project
                .targets
                .iter()
                .map(move |target| (project.reference(&target.name), target))
        })
    }

    /// Every scheme declared in a project or on the workspace.
    pub fn schemes(&self) -> impl Iterator<Item = &Scheme> + '_ {
        self.projects
            .iter()
            .flat_map(|p| p.schemes.iter())
            .chain(self.workspace.schemes.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Product;

    fn graph() -> Graph {
        let mut app = Project::new("App", "/ws/App");
        app.targets.push(Target::new("App", Product::App, "com.acme.app"));
        app.targets
            .push(Target::new("AppTests", Product::UnitTests, "com.acme.app.tests"));
        let mut core = Project::new("Core", "/ws/Core");
        core.targets
            .push(Target::new("Core", Product::Framework, "com.acme.core"));
        Graph::new(Workspace::new("Acme", "/ws"), vec![app, core])
    }

    #[test]
    fn test_new_records_project_order() {
        let graph = graph();
        assert_eq!(
            graph.workspace.projects,
            vec![PathBuf::from("/ws/App"), PathBuf::from("/ws/Core")]
        );
    }

    #[test]
    fn test_target_lookup() {
        let graph = graph();
        let core = TargetReference::new("/ws/Core", "Core");
        assert_eq!(graph.target(&core).map(|t| t.product), Some(Product::Framework));
        assert!(graph.target(&TargetReference::new("/ws/App", "Core")).is_none());
    }

    #[test]
    fn test_targets_in_declaration_order() {
        let names: Vec<_> = graph().targets().map(|(_, t)| t.name.clone()).collect();
        assert_eq!(names, vec!["App", "AppTests", "Core"]);
    }

    #[test]
    fn test_graph_serializes() {
        let json = serde_json::to_value(graph()).unwrap();
        assert_eq!(json["workspace"]["name"], "Acme");
        assert_eq!(json["projects"][1]["targets"][0]["product"], "framework");
    }
}
