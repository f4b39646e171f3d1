use std::path::{Path, PathBuf};

use loom_core::normalize;
use loom_graph::TargetReference;
use loom_manifest as manifest;

use crate::{Result, ValidationError};

/// Every target declared in the workspace, keyed by project directory.
pub(crate) struct Scope {
    workspace_path: PathBuf,
    projects: Vec<(PathBuf, Vec<String>)>,
}

impl Scope {
    pub(crate) fn new(workspace_path: PathBuf, projects: &[(PathBuf, &manifest::Project)]) -> Self {
        let projects = projects
            .iter()
            .map(|(path, project)| {
                let names = project.targets.iter().map(|t| t.name.clone()).collect();
                (path.clone(), names)
            })
            .collect();
        Self {
            workspace_path,
            projects,
        }
    }

    fn contains(&self, project: &Path, name: &str) -> bool {
        self.projects
            .iter()
            .any(|(path, names)| path == project && names.iter().any(|n| n == name))
    }

    /// Resolve a reference written inside the project at `from`.
    pub(crate) fn resolve(
        &self,
        from: &Path,
        reference: &manifest::TargetReference,
        field: impl FnOnce() -> String,
    ) -> Result<TargetReference> {
        let project_path = match &reference.project {
            None => from.to_path_buf(),
            Some(relative) => normalize(&from.join(relative)),
        };

        if self.contains(&project_path, &reference.target) {
            Ok(TargetReference::new(project_path, reference.target.as_str()))
        } else {
            Err(ValidationError::UnresolvedReference {
                name: reference.target.clone(),
                field: field(),
            })
        }
    }

    /// Resolve a reference written at the workspace level.
    ///
    /// A bare name resolves to the first project, in declaration order, that
    /// declares a target with that name.
    pub(crate) fn resolve_anywhere(
        &self,
        reference: &manifest::TargetReference,
        field: impl FnOnce() -> String,
    ) -> Result<TargetReference> {
        if reference.project.is_some() {
            return self.resolve(&self.workspace_path, reference, field);
        }

        self.projects
            .iter()
            .find(|(_, names)| names.iter().any(|n| *n == reference.target))
            .map(|(path, _)| TargetReference::new(path.clone(), reference.target.as_str()))
            .ok_or_else(|| ValidationError::UnresolvedReference {
                name: reference.target.clone(),
                field: field(),
            })
    }
}
