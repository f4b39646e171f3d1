//! Core types shared across the loom generator.
//!
//! This crate holds the small vocabulary every other crate speaks: versions,
//! side-effect descriptors, and the path resolution context handed to the
//! manifest loader.

mod paths;
mod side_effect;
mod utils;
mod version;

pub use paths::{GeneratorPaths, PathResolver, normalize};
// Deferred filesystem work
pub use side_effect::{AppliedEffect, SideEffect};
// String utilities
pub use utils::to_c99_identifier;
pub use version::Version;
