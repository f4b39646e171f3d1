//! Ordered, fail-fast composition of mappers.

use loom_graph::{Graph, Project};
use tracing::debug;

use crate::{MapResult, ProjectMapper, WorkspaceMapper};

/// Applies project mappers in order, threading each output into the next.
///
/// Side effects are concatenated in encounter order. The first error aborts
/// the chain and is returned unchanged; effects collected so far are dropped.
pub struct SequentialProjectMapper {
    mappers: Vec<Box<dyn ProjectMapper>>,
}

impl SequentialProjectMapper {
    pub fn new(mappers: Vec<Box<dyn ProjectMapper>>) -> Self {
        Self { mappers }
    }

    pub fn mappers(&self) -> &[Box<dyn ProjectMapper>] {
        &self.mappers
    }
}

impl ProjectMapper for SequentialProjectMapper {
    fn name(&self) -> &'static str {
        "sequential_project"
    }

    fn map(&self, project: &Project) -> MapResult<Project> {
        let mut current = project.clone();
        let mut side_effects = Vec::new();
        for mapper in &self.mappers {
            let (next, mut effects) = mapper.map(&current)?;
            debug!(
                mapper = mapper.name(),
                project = %next.name,
                side_effects = effects.len(),
                "applied project mapper"
            );
            current = next;
            side_effects.append(&mut effects);
        }
        Ok((current, side_effects))
    }
}

/// Applies workspace mappers in order. Same contract as
/// [`SequentialProjectMapper`].
pub struct SequentialWorkspaceMapper {
    mappers: Vec<Box<dyn WorkspaceMapper>>,
}

impl SequentialWorkspaceMapper {
    pub fn new(mappers: Vec<Box<dyn WorkspaceMapper>>) -> Self {
        Self { mappers }
    }

    pub fn mappers(&self) -> &[Box<dyn WorkspaceMapper>] {
        &self.mappers
    }
}

impl WorkspaceMapper for SequentialWorkspaceMapper {
    fn name(&self) -> &'static str {
        "sequential_workspace"
    }

    fn map(&self, graph: &Graph) -> MapResult<Graph> {
        let mut current = graph.clone();
        let mut side_effects = Vec::new();
        for mapper in &self.mappers {
            let (next, mut effects) = mapper.map(&current)?;
            debug!(
                mapper = mapper.name(),
                side_effects = effects.len(),
                "applied workspace mapper"
            );
            current = next;
            side_effects.append(&mut effects);
        }
        Ok((current, side_effects))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use loom_core::SideEffect;
    use loom_graph::Workspace;

    use super::*;
    use crate::MapperError;

    type Log = Arc<Mutex<Vec<&'static str>>>;

    /// Appends its marker to a shared log, optionally failing.
    struct MarkerMapper {
        marker: &'static str,
        log: Log,
        fail: bool,
    }

    impl MarkerMapper {
        fn new(marker: &'static str, log: &Log) -> Box<Self> {
            Box::new(Self {
                marker,
                log: log.clone(),
                fail: false,
            })
        }

        fn failing(marker: &'static str, log: &Log) -> Box<Self> {
            Box::new(Self {
                marker,
                log: log.clone(),
                fail: true,
            })
        }

        fn run<T: Clone>(&self, value: &T) -> MapResult<T> {
            if self.fail {
                return Err(MapperError::new(self.marker, "boom"));
            }
            self.log.lock().unwrap().push(self.marker);
            Ok((
                value.clone(),
                vec![SideEffect::write_file(format!("/out/{}", self.marker), self.marker)],
            ))
        }
    }

    impl ProjectMapper for MarkerMapper {
        fn name(&self) -> &'static str {
            self.marker
        }

        fn map(&self, project: &Project) -> MapResult<Project> {
            self.run(project)
        }
    }

    impl WorkspaceMapper for MarkerMapper {
        fn name(&self) -> &'static str {
            self.marker
        }

        fn map(&self, graph: &Graph) -> MapResult<Graph> {
            self.run(graph)
        }
    }

    fn graph() -> Graph {
        Graph::new(Workspace::new("Acme", "/ws"), vec![Project::new("App", "/ws/App")])
    }

    #[test]
    fn test_project_mappers_run_in_order() {
        let log = Log::default();
        let mapper = SequentialProjectMapper::new(vec![
            MarkerMapper::new("A", &log),
            MarkerMapper::new("B", &log),
            MarkerMapper::new("C", &log),
        ]);

        let (_, effects) = mapper.map(&Project::new("App", "/ws/App")).unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["A", "B", "C"]);
        let paths: Vec<_> = effects.iter().map(|e| e.path().to_path_buf()).collect();
        assert_eq!(
            paths,
            vec![
                std::path::PathBuf::from("/out/A"),
                std::path::PathBuf::from("/out/B"),
                std::path::PathBuf::from("/out/C"),
            ]
        );
    }

    #[test]
    fn test_workspace_mappers_stop_at_first_failure() {
        let log = Log::default();
        let mapper = SequentialWorkspaceMapper::new(vec![
            MarkerMapper::new("A", &log),
            MarkerMapper::failing("B", &log),
            MarkerMapper::new("C", &log),
        ]);

        let err = mapper.map(&graph()).unwrap_err();

        assert_eq!(err.mapper, "B");
        assert_eq!(*log.lock().unwrap(), vec!["A"]);
    }

    #[test]
    fn test_empty_chain_is_identity() {
        let graph = graph();
        let (mapped, effects) = SequentialWorkspaceMapper::new(vec![]).map(&graph).unwrap();
        assert_eq!(mapped, graph);
        assert!(effects.is_empty());
    }
}
