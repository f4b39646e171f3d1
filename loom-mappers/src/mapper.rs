//! Mapper traits.

use std::any::Any;

use loom_core::SideEffect;
use loom_graph::{Graph, Project};

use crate::MapperError;

/// Output of one mapper: the new value plus deferred side effects.
pub type MapResult<T> = Result<(T, Vec<SideEffect>), MapperError>;

/// Downcasting support so pipelines can be inspected after construction.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A transformation applied to one project.
///
/// Mappers never mutate their input and never perform I/O; files to write
/// are returned as [`SideEffect`] descriptors.
pub trait ProjectMapper: AsAny + Send + Sync {
    /// Name used in logs and errors.
    fn name(&self) -> &'static str;

    fn map(&self, project: &Project) -> MapResult<Project>;
}

/// A transformation applied to the whole workspace graph.
pub trait WorkspaceMapper: AsAny + Send + Sync {
    /// Name used in logs and errors.
    fn name(&self) -> &'static str;

    fn map(&self, graph: &Graph) -> MapResult<Graph>;
}

impl dyn ProjectMapper {
    pub fn downcast_ref<T: ProjectMapper + 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }
}

impl dyn WorkspaceMapper {
    pub fn downcast_ref<T: WorkspaceMapper + 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }
}
