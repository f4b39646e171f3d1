use std::path::{Path, PathBuf};

use eyre::Result;
use serde::Serialize;

/// Filesystem work requested by a mapper.
///
/// Mappers never touch the disk themselves; they describe what the backend
/// should do and the backend applies descriptors in order. When two
/// descriptors target the same path, the later one wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SideEffect {
    /// Write `content` to `path`, creating parent directories.
    WriteFile { path: PathBuf, content: String },
    /// Create `path` and any missing parents.
    CreateDirectory { path: PathBuf },
}

impl SideEffect {
    pub fn write_file(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self::WriteFile {
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn create_directory(path: impl Into<PathBuf>) -> Self {
        Self::CreateDirectory { path: path.into() }
    }

    /// The path this descriptor targets.
    pub fn path(&self) -> &Path {
        match self {
            Self::WriteFile { path, .. } | Self::CreateDirectory { path } => path,
        }
    }

    /// Apply the descriptor to the filesystem.
    ///
    /// Files whose on-disk content already matches are left untouched so
    /// that repeated runs don't bump modification times.
    pub fn apply(&self) -> Result<AppliedEffect> {
        match self {
            Self::WriteFile { path, content } => {
                if std::fs::read_to_string(path).is_ok_and(|existing| existing == *content) {
                    return Ok(AppliedEffect::Unchanged);
                }
                write_file(path, content)?;
                Ok(AppliedEffect::Written)
            }
            Self::CreateDirectory { path } => {
                if path.is_dir() {
                    return Ok(AppliedEffect::Unchanged);
                }
                std::fs::create_dir_all(path)?;
                Ok(AppliedEffect::Created)
            }
        }
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

/// Outcome of applying a single [`SideEffect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppliedEffect {
    /// File was written
    Written,
    /// Directory was created
    Created,
    /// Nothing to do, the disk already matched
    Unchanged,
}
