//! Graph model shared by every pass of the Loom pipeline.
//!
//! # Architecture
//!
//! ```text
//! loom.toml → loom-manifest (decoding) → loom-loader (validation) → Graph → mappers → backend
//! ```
//!
//! Graph values are plain immutable snapshots: a mapper clones what it
//! changes and returns a new [`Graph`], so every intermediate stage stays
//! valid for inspection.

mod config;
mod project;
mod scheme;
mod workspace;

pub use config::{CodeCoverageMode, Config, GenerationOption};
pub use loom_manifest::{
    Arguments, AutomaticSchemesOptions, ConfigurationName, LaunchArgument, Product,
    TestingOption, TestingOptions, TextSettings,
};
pub use project::{Project, ProjectOptions, Target, TargetReference};
pub use scheme::{
    AnalyzeAction, ArchiveAction, BuildAction, ExecutionAction, ProfileAction, RunAction, Scheme,
    TestAction,
};
pub use workspace::{Graph, Workspace};
