//! Validation of merged settings

use std::path::Path;

use crate::error::{GoWalkerError, Result};
use crate::models::config::Settings;

/// Settings validator for ensuring configuration is valid
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate settings and return errors if invalid
    pub fn validate(settings: &Settings) -> Result<()> {
        if !settings.scan_path.exists() {
            return Err(GoWalkerError::InvalidPath {
                path: settings.scan_path.clone(),
            });
        }

        for pattern in &settings.exclude_patterns {
            glob::Pattern::new(pattern).map_err(|e| {
                GoWalkerError::config_error(format!("Invalid exclude pattern '{}': {}", pattern, e))
            })?;
        }

        if settings.max_depth == Some(0) {
            return Err(GoWalkerError::config_error("Max depth must be at least 1"));
        }

        if settings.why_chunk_size == 0 {
            return Err(GoWalkerError::config_error("why_chunk_size must be at least 1"));
        }

        if settings.go_binary.as_os_str().is_empty() {
            return Err(GoWalkerError::config_error("go_binary must not be empty"));
        }

        if let Some(path) = &settings.output_file {
            Self::validate_output_path(path)?;
        }

        Ok(())
    }

    /// Validate that the directory of an output path exists
    fn validate_output_path(path: &Path) -> Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
                Err(GoWalkerError::OutputDirectoryNotFound {
                    path: parent.to_path_buf(),
                })
            }
            _ => Ok(()),
        }
    }
}
