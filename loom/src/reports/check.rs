//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from manifest validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the manifest.
    pub manifest_path: PathBuf,
    pub workspace_name: String,
    pub projects: Vec<ProjectSummary>,
    /// Number of generation options in the config.
    pub generation_options: usize,
}

#[derive(Debug)]
pub struct ProjectSummary {
    pub name: String,
    pub targets: Vec<String>,
    /// Number of declared schemes.
    pub schemes: usize,
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        out.preformatted(&format!("✓ {} is valid", self.manifest_path.display()));
        out.newline();
        out.key_value("workspace", &self.workspace_name);
        out.key_value(
            "generation options",
            &self.generation_options.to_string(),
        );
        out.newline();

        out.section(&plural(self.projects.len(), "project"));
        for project in &self.projects {
            out.list_item(&format!(
                "{} ({}, {}): {}",
                project.name,
                plural(project.targets.len(), "target"),
                plural(project.schemes, "scheme"),
                project.targets.join(", ")
            ));
        }
    }
}
