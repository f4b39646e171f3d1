//! Path resolution context for manifest loading.

use std::path::{Component, Path, PathBuf};

/// Resolves paths written in a manifest into absolute paths.
///
/// The loader never reads the filesystem; it only asks the resolver to turn
/// manifest-relative strings into absolute locations.
pub trait PathResolver: Send + Sync {
    /// Resolve a path as written in the manifest.
    fn resolve(&self, relative: &Path) -> PathBuf;
}

/// Default resolver anchored at the directory holding the manifest.
///
/// - absolute paths are returned normalized
/// - paths starting with `//` are relative to the root directory
/// - everything else is relative to the manifest directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorPaths {
    manifest_directory: PathBuf,
    root_directory: PathBuf,
}

impl GeneratorPaths {
    /// Create a resolver where the root is the manifest directory itself.
    pub fn new(manifest_directory: impl Into<PathBuf>) -> Self {
        let manifest_directory = manifest_directory.into();
        Self {
            root_directory: manifest_directory.clone(),
            manifest_directory,
        }
    }

    /// Use a different root for `//`-prefixed paths.
    pub fn with_root(mut self, root_directory: impl Into<PathBuf>) -> Self {
        self.root_directory = root_directory.into();
        self
    }

    pub fn manifest_directory(&self) -> &Path {
        &self.manifest_directory
    }

    pub fn root_directory(&self) -> &Path {
        &self.root_directory
    }
}

impl PathResolver for GeneratorPaths {
    fn resolve(&self, relative: &Path) -> PathBuf {
        if let Some(from_root) = relative.to_str().and_then(|s| s.strip_prefix("//")) {
            return normalize(&self.root_directory.join(from_root));
        }
        if relative.is_absolute() {
            return normalize(relative);
        }
        normalize(&self.manifest_directory.join(relative))
    }
}

/// Lexically normalize a path, folding `.` and `..` components.
///
/// `..` at the root is dropped rather than escaping it.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}
