//! Manifest schema for `loom.toml`.
//!
//! Discriminated unions (generation options, coverage modes, project
//! options) are decoded through an ordered key table, see [`variant`].

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod action;
mod coverage;
mod error;
mod manifest;
mod options;
mod project;
mod project_option;
mod scheme;
mod target_reference;
mod testing_options;
pub mod variant;

pub use action::{
    AnalyzeAction, ArchiveAction, Arguments, BuildAction, ConfigurationName, ExecutionAction,
    LaunchArgument, ProfileAction, RunAction, TestAction,
};
pub use coverage::CodeCoverageMode;
pub use error::{DecodeError, Error, Result};
pub use manifest::{Manifest, WorkspaceManifest};
pub use options::{Config, GenerationOption};
pub use project::{Product, Project, Target};
pub use project_option::{AutomaticSchemesOptions, ProjectOption, TextSettings};
pub use scheme::Scheme;
pub use target_reference::TargetReference;
pub use testing_options::{TestingOption, TestingOptions};
