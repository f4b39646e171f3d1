//! Check operation - decode and validate without running mappers.

use std::path::Path;

use loom_loader::Loaded;

use crate::reports::{CheckReport, ProjectSummary};

/// Summarize a loaded manifest.
pub fn check(loaded: &Loaded, manifest_path: &Path) -> CheckReport {
    let graph = &loaded.graph;
    CheckReport {
        manifest_path: manifest_path.to_path_buf(),
        workspace_name: graph.workspace.name.clone(),
        projects: graph
            .projects
            .iter()
            .map(|project| ProjectSummary {
                name: project.name.clone(),
                targets: project.targets.iter().map(|t| t.name.clone()).collect(),
                schemes: project.schemes.len(),
            })
            .collect(),
        generation_options: loaded.config.generation_options.len(),
    }
}
