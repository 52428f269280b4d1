//! Temporary relocation of directories
//!
//! A vendored `vendor/` tree makes the go tool answer from the vendored copy
//! instead of the module graph. [`DirectoryStash`] moves such directories
//! aside and moves them back when dropped, so they are restored on every exit
//! path including early returns and panics.

use crate::error::{Result, ResultExt};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct StashedDirectory {
    original: PathBuf,
    holder: TempDir,
}

impl StashedDirectory {
    fn stashed_path(&self) -> PathBuf {
        self.holder.path().join("stashed")
    }
}

/// Guard that restores stashed directories on drop
#[derive(Default)]
pub struct DirectoryStash {
    stashed: Vec<StashedDirectory>,
}

impl DirectoryStash {
    /// Move every existing directory in `directories` out of the way
    ///
    /// Paths that do not exist are ignored. Each directory is moved into a
    /// hidden temporary directory next to it so the move never crosses file
    /// systems.
    pub fn stash<I, P>(directories: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut stash = DirectoryStash::default();

        for directory in directories {
            let directory = directory.as_ref();
            if !directory.is_dir() {
                continue;
            }

            let parent = directory.parent().unwrap_or_else(|| Path::new("."));
            let holder = tempfile::Builder::new()
                .prefix(".gowalker-stash")
                .tempdir_in(parent)?;
            let entry = StashedDirectory {
                original: directory.to_path_buf(),
                holder,
            };

            fs::rename(directory, entry.stashed_path()).with_file_context(directory)?;
            tracing::debug!("Stashed {}", directory.display());
            stash.stashed.push(entry);
        }

        Ok(stash)
    }

    /// Directories currently moved away
    pub fn stashed_directories(&self) -> impl Iterator<Item = &Path> {
        self.stashed.iter().map(|entry| entry.original.as_path())
    }

    fn restore(entry: &StashedDirectory) -> std::io::Result<()> {
        // Anything the go tool created in the meantime is discarded
        if entry.original.exists() {
            fs::remove_dir_all(&entry.original)?;
        }
        fs::rename(entry.stashed_path(), &entry.original)
    }
}

impl Drop for DirectoryStash {
    fn drop(&mut self) {
        for entry in self.stashed.drain(..).rev() {
            match Self::restore(&entry) {
                Ok(()) => tracing::debug!("Restored {}", entry.original.display()),
                Err(e) => {
                    let stashed = entry.stashed_path();
                    // Keep the holder so the stashed content survives for manual recovery
                    let _ = entry.holder.keep();
                    tracing::error!(
                        "Failed to restore {} from {}: {}",
                        entry.original.display(),
                        stashed.display(),
                        e
                    );
                }
            }
        }
    }
}
