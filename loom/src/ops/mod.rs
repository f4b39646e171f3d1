//! Core operations.
//!
//! This module contains the business logic for loom commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod generate;

use std::path::Path;

use eyre::{Context, Result};
use loom_core::GeneratorPaths;
use loom_loader::Loaded;
use loom_manifest::Manifest;

pub use check::check;
pub use generate::{GenerateOptions, generate};

/// Load and validate the manifest at `manifest_path`.
///
/// Relative paths in the manifest resolve against the manifest's directory.
/// Diagnostics for malformed or invalid manifests are rendered and the
/// process exits, as with every other manifest error.
pub fn load(manifest_path: &Path) -> Result<Loaded> {
    use crate::commands::UnwrapOrExit;

    let manifest = Manifest::from_file(manifest_path).unwrap_or_exit();
    let absolute = std::path::absolute(manifest_path)
        .wrap_err_with(|| format!("failed to resolve {}", manifest_path.display()))?;
    let directory = absolute.parent().unwrap_or(Path::new("/"));
    let loaded = loom_loader::load(&manifest, &GeneratorPaths::new(directory)).unwrap_or_exit();
    Ok(loaded)
}
