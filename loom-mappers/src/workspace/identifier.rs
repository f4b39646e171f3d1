use loom_graph::Graph;
use uuid::Uuid;

use crate::{MapResult, WorkspaceMapper};

/// Stamps a stable identifier derived from the workspace location.
///
/// The identifier is a UUID v5 of the workspace path, so regenerating the
/// same workspace keeps the same value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkspaceIdentifierMapper;

impl WorkspaceIdentifierMapper {
    pub fn identifier(graph: &Graph) -> Uuid {
        let path = graph.workspace.path.to_string_lossy();
        Uuid::new_v5(&Uuid::NAMESPACE_URL, path.as_bytes())
    }
}

impl WorkspaceMapper for WorkspaceIdentifierMapper {
    fn name(&self) -> &'static str {
        "workspace_identifier"
    }

    fn map(&self, graph: &Graph) -> MapResult<Graph> {
        let mut mapped = graph.clone();
        mapped.workspace.identifier = Some(Self::identifier(graph).to_string());
        Ok((mapped, Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use loom_graph::Workspace;

    use super::*;

    #[test]
    fn test_identifier_depends_only_on_path() {
        let a = Graph::new(Workspace::new("Acme", "/ws/acme"), vec![]);
        let renamed = Graph::new(Workspace::new("Renamed", "/ws/acme"), vec![]);
        let moved = Graph::new(Workspace::new("Acme", "/ws/other"), vec![]);

        let (a, _) = WorkspaceIdentifierMapper.map(&a).unwrap();
        let (renamed, _) = WorkspaceIdentifierMapper.map(&renamed).unwrap();
        let (moved, _) = WorkspaceIdentifierMapper.map(&moved).unwrap();

        assert!(a.workspace.identifier.is_some());
        assert_eq!(a.workspace.identifier, renamed.workspace.identifier);
        assert_ne!(a.workspace.identifier, moved.workspace.identifier);
    }
}
