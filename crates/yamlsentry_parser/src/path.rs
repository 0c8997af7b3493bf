//! Resolution of paths reported by the linters.

use std::path::{Component, Path, PathBuf};

/// Resolves tool-reported paths against the directory the tool ran in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    /// Creates a resolver for the given root directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Keeps absolute paths as-is and joins relative ones to the root.
    pub fn resolve(&self, reported: &str) -> PathBuf {
        let path = Path::new(reported.trim());
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Like [`resolve`](Self::resolve), then removes `.` and `..` segments
    /// without touching the file system.
    pub fn resolve_normalized(&self, reported: &str) -> PathBuf {
        normalize(&self.resolve(reported))
    }
}

/// Lexically normalizes a path. `..` never climbs above the root component.
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => normalized.push(component),
            },
            Component::RootDir | Component::Prefix(_) | Component::Normal(_) => {
                normalized.push(component);
            }
        }
    }
    normalized
}
