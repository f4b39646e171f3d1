use std::path::PathBuf;

use loom_core::SideEffect;
use loom_graph::Graph;
use thiserror::Error;

use crate::{MapResult, MapperError, WorkspaceMapper};

#[derive(Debug, Error)]
#[error("automation directory `{}` must be absolute", .0.display())]
struct RelativeDirectory(PathBuf);

/// Relocates the generated workspace and its derived state under a
/// caller-supplied directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutomationPathMapper {
    pub workspace_directory: PathBuf,
}

impl AutomationPathMapper {
    pub fn new(workspace_directory: impl Into<PathBuf>) -> Self {
        Self {
            workspace_directory: workspace_directory.into(),
        }
    }
}

impl WorkspaceMapper for AutomationPathMapper {
    fn name(&self) -> &'static str {
        "automation_path"
    }

    fn map(&self, graph: &Graph) -> MapResult<Graph> {
        if !self.workspace_directory.is_absolute() {
            return Err(MapperError::new(
                self.name(),
                RelativeDirectory(self.workspace_directory.clone()),
            ));
        }
        if graph.workspace.output_path == self.workspace_directory {
            return Ok((graph.clone(), Vec::new()));
        }

        let mut mapped = graph.clone();
        mapped.workspace.output_path = self.workspace_directory.clone();
        let side_effects = vec![SideEffect::create_directory(self.workspace_directory.clone())];
        Ok((mapped, side_effects))
    }
}

#[cfg(test)]
mod tests {
    use loom_graph::Workspace;

    use super::*;

    #[test]
    fn test_relocates_output() {
        let graph = Graph::new(Workspace::new("Acme", "/ws"), vec![]);
        let mapper = AutomationPathMapper::new("/tmp/automation");

        let (mapped, effects) = mapper.map(&graph).unwrap();

        assert_eq!(mapped.workspace.path, PathBuf::from("/ws"));
        assert_eq!(mapped.workspace.output_path, PathBuf::from("/tmp/automation"));
        assert_eq!(effects, vec![SideEffect::create_directory("/tmp/automation")]);

        let (again, effects) = mapper.map(&mapped).unwrap();
        assert_eq!(again, mapped);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_relative_directory_fails() {
        let graph = Graph::new(Workspace::new("Acme", "/ws"), vec![]);
        let err = AutomationPathMapper::new("build").map(&graph).unwrap_err();
        assert_eq!(err.mapper, "automation_path");
        assert!(err.to_string().contains("must be absolute"));
    }
}
