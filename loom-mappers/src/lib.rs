//! Graph transformation passes for Loom.
//!
//! A mapper takes an immutable [`Project`](loom_graph::Project) or
//! [`Graph`](loom_graph::Graph) and returns a new value plus the
//! [`SideEffect`](loom_core::SideEffect)s the backend should apply.
//!
//! # Module Organization
//!
//! - [`project`] - passes over a single project
//! - [`workspace`] - passes over the whole graph
//! - [`factory`] - mapper lists per [`Scenario`]
//!
//! Composition lives in [`SequentialProjectMapper`],
//! [`SequentialWorkspaceMapper`] and the parallel [`ProjectWorkspaceMapper`].

mod error;
pub mod factory;
mod fan_out;
mod mapper;
pub mod project;
mod sequential;
pub mod workspace;

pub use error::MapperError;
pub use factory::{ProjectMapperFactory, Scenario, WorkspaceMapperFactory};
pub use fan_out::ProjectWorkspaceMapper;
pub use mapper::{AsAny, MapResult, ProjectMapper, WorkspaceMapper};
pub use sequential::{SequentialProjectMapper, SequentialWorkspaceMapper};
