//! Discovery of YAML files to check.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::info;
use walkdir::{DirEntry, WalkDir};

use crate::CheckError;

/// Directories never descended into.
const SKIPPED_DIRS: &[&str] = &[".git", ".venv", "venv", "node_modules", ".tox", "__pycache__"];

/// Filters and discovers files by include/exclude globs.
///
/// Globs are matched against paths relative to the base directory.
pub struct FileFinder {
    include_globs: Option<GlobSet>,
    exclude_globs: Option<GlobSet>,
}

impl FileFinder {
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self, CheckError> {
        Ok(Self {
            include_globs: Self::build_globset(include)?,
            exclude_globs: Self::build_globset(exclude)?,
        })
    }

    fn build_globset(patterns: &[String]) -> Result<Option<GlobSet>, CheckError> {
        if patterns.is_empty() {
            return Ok(None);
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| {
                CheckError::config(format!("Invalid glob pattern '{}': {}", pattern, e))
            })?;
            builder.add(glob);
        }

        let globset = builder
            .build()
            .map_err(|e| CheckError::config(format!("Failed to build globset: {}", e)))?;

        Ok(Some(globset))
    }

    /// Checks if a path should be ignored based on include/exclude patterns.
    pub fn should_ignore(&self, relative: &Path) -> bool {
        if self
            .exclude_globs
            .as_ref()
            .is_some_and(|excludes| excludes.is_match(relative))
        {
            return true;
        }

        self.include_globs
            .as_ref()
            .is_some_and(|includes| !includes.is_match(relative))
    }

    /// Expands file paths and glob patterns into a sorted list of files.
    ///
    /// Existing files named explicitly bypass the include globs but still
    /// honor excludes.
    pub fn discover_files(
        &self,
        patterns: &[String],
        base_dir: &Path,
    ) -> Result<Vec<PathBuf>, CheckError> {
        let mut files = Vec::new();

        let mut glob_builder = GlobSetBuilder::new();
        let mut has_globs = false;

        for pattern in patterns {
            let path = base_dir.join(pattern);
            if path.symlink_metadata().is_ok_and(|m| m.file_type().is_file()) {
                let relative = relative_to(&path, base_dir);
                if self
                    .exclude_globs
                    .as_ref()
                    .is_some_and(|excludes| excludes.is_match(&relative))
                {
                    continue;
                }
                files.push(path.canonicalize().unwrap_or(path));
            } else {
                let glob = Glob::new(pattern).map_err(|e| {
                    CheckError::config(format!("Invalid pattern '{}': {}", pattern, e))
                })?;
                glob_builder.add(glob);
                has_globs = true;
            }
        }

        if has_globs {
            let glob_set = glob_builder
                .build()
                .map_err(|e| CheckError::config(format!("Failed to build globset: {}", e)))?;

            let walker = WalkDir::new(base_dir)
                .into_iter()
                .filter_entry(|entry| entry.depth() == 0 || !is_skipped_dir(entry))
                .filter_map(|e| e.ok());

            for entry in walker {
                if !entry.file_type().is_file() {
                    continue;
                }
                let relative = relative_to(entry.path(), base_dir);
                if glob_set.is_match(&relative) && !self.should_ignore(&relative) {
                    files.push(entry.path().to_path_buf());
                }
            }
        }

        files.sort();
        files.dedup();

        info!("Discovered {} files to check", files.len());
        Ok(files)
    }
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIPPED_DIRS.contains(&name))
}

fn relative_to(path: &Path, base_dir: &Path) -> PathBuf {
    path.strip_prefix(base_dir).unwrap_or(path).to_path_buf()
}
