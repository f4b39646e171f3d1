//! Runs a project mapper over every project of a workspace in parallel.

use std::{
    sync::atomic::{AtomicUsize, Ordering},
    thread,
};

use loom_graph::{Graph, Project};
use tracing::trace;

use crate::{MapResult, ProjectMapper, WorkspaceMapper};

const NO_FAILURE: usize = usize::MAX;

/// Applies a project mapper to each project on its own thread.
///
/// Results are folded back in declaration order, not completion order.
/// Once a project fails, projects declared after it are abandoned. Projects
/// declared before it still run, so the reported error is always the one
/// from the lowest failing project index.
pub struct ProjectWorkspaceMapper {
    project_mapper: Box<dyn ProjectMapper>,
}

impl ProjectWorkspaceMapper {
    pub fn new(project_mapper: Box<dyn ProjectMapper>) -> Self {
        Self { project_mapper }
    }

    pub fn project_mapper(&self) -> &dyn ProjectMapper {
        self.project_mapper.as_ref()
    }

    fn map_all(&self, projects: &[Project]) -> Vec<Option<MapResult<Project>>> {
        let first_failure = AtomicUsize::new(NO_FAILURE);
        let mapper = self.project_mapper.as_ref();

        thread::scope(|scope| {
            let handles: Vec<_> = projects
                .iter()
                .enumerate()
                .map(|(index, project)| {
                    let first_failure = &first_failure;
                    scope.spawn(move || {
                        if index > first_failure.load(Ordering::Acquire) {
                            trace!(project = %project.name, "abandoned after sibling failure");
                            return None;
                        }
                        trace!(project = %project.name, "mapping project");
                        let result = mapper.map(project);
                        if result.is_err() {
                            first_failure.fetch_min(index, Ordering::AcqRel);
                        }
                        Some(result)
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
                })
                .collect()
        })
    }
}

impl WorkspaceMapper for ProjectWorkspaceMapper {
    fn name(&self) -> &'static str {
        "project_workspace"
    }

    fn map(&self, graph: &Graph) -> MapResult<Graph> {
        let mut projects = Vec::with_capacity(graph.projects.len());
        let mut side_effects = Vec::new();

        for result in self.map_all(&graph.projects) {
            // Abandoned slots only follow a failure, which returns first.
            let Some(result) = result else { continue };
            let (project, mut effects) = result?;
            projects.push(project);
            side_effects.append(&mut effects);
        }

        let mut mapped = graph.clone();
        mapped.projects = projects;
        Ok((mapped, side_effects))
    }
}
