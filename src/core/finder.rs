//! Discovery of go.mod files below a scan root

use crate::error::{GoWalkerError, Result};
use crate::models::config::Settings;
use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Name of the file that defines a Go module
pub const GO_MOD_FILE: &str = "go.mod";

/// Finds go.mod files while honouring exclude patterns and a depth limit
///
/// `vendor` directories are never entered, they hold copies of dependencies
/// and not projects of their own.
pub struct GoModFinder {
    exclude_patterns: Vec<Pattern>,
    max_depth: Option<usize>,
    errors: Vec<(PathBuf, GoWalkerError)>,
}

impl GoModFinder {
    /// Create a finder, failing on invalid exclude patterns
    pub fn new(exclude_patterns: &[String], max_depth: Option<usize>) -> Result<Self> {
        let exclude_patterns = exclude_patterns
            .iter()
            .map(|pattern| Pattern::new(pattern))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            exclude_patterns,
            max_depth,
            errors: Vec::new(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(&settings.exclude_patterns, settings.max_depth)
    }

    /// Return the go.mod files below `root` in sorted order
    ///
    /// A depth limit of `n` searches the root and `n` levels of directories
    /// below it. Unreadable directories are skipped and recorded, see
    /// [`take_errors`](Self::take_errors).
    pub fn find(&mut self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.exists() {
            return Err(GoWalkerError::InvalidPath {
                path: root.to_path_buf(),
            });
        }

        let mut walker = WalkDir::new(root).follow_links(false).sort_by_file_name();
        if let Some(max_depth) = self.max_depth {
            walker = walker.max_depth(max_depth + 1);
        }

        let mut go_mod_files = Vec::new();
        let exclude_patterns = &self.exclude_patterns;
        let entries = walker
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_skipped(entry, exclude_patterns));

        for entry in entries {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_file() && entry.file_name() == GO_MOD_FILE {
                        tracing::debug!("Found {}", entry.path().display());
                        go_mod_files.push(entry.into_path());
                    }
                }
                Err(err) => {
                    let path = err.path().unwrap_or(root).to_path_buf();
                    let error = match err.io_error().map(std::io::Error::kind) {
                        Some(std::io::ErrorKind::PermissionDenied) => GoWalkerError::permission_denied(&path),
                        _ => GoWalkerError::directory_traversal_error(&path, err.to_string()),
                    };
                    tracing::warn!("{}", error);
                    self.errors.push((path, error));
                }
            }
        }

        Ok(go_mod_files)
    }

    /// Errors collected by previous calls to [`find`](Self::find)
    pub fn take_errors(&mut self) -> Vec<(PathBuf, GoWalkerError)> {
        std::mem::take(&mut self.errors)
    }
}

fn is_skipped(entry: &DirEntry, exclude_patterns: &[Pattern]) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    if entry.file_name() == "vendor" {
        return true;
    }

    let path = entry.path().to_string_lossy();
    exclude_patterns.iter().any(|pattern| pattern.matches(&path))
}
