//! Error types and definitions for gowalker
//!
//! This module provides the error enum shared by the resolution engine, the
//! configuration layer and the output writers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error severity levels for different error types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    /// Warning level errors - operation can continue
    Warning,
    /// Error level - current project fails but the scan can continue
    Error,
    /// Critical level - process should terminate
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARNING"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Main error type for gowalker operations
#[derive(Debug, Error)]
pub enum GoWalkerError {
    /// Standard IO errors
    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },

    /// JSON decoding errors for go tool output
    #[error("JSON parsing error in {context}: {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A `go mod graph` line that does not have exactly two columns
    #[error("Malformed module graph line {line_number}: '{line}' (expected exactly two columns)")]
    MalformedGraphLine { line_number: usize, line: String },

    /// An edge references a module that `go list -m` did not report
    #[error("No module information found for '{name}'")]
    UnknownModule { name: String },

    /// No module was flagged as the main module
    #[error("No main module found in the module list")]
    NoMainModule,

    /// More than one module was flagged as the main module
    #[error("Expected a single main module but found: {}", names.join(", "))]
    AmbiguousMainModule { names: Vec<String> },

    /// The go binary could not be started
    #[error("Failed to run '{command}': {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The go binary exited with a non-zero status
    #[error("Command '{command}' failed with exit code {}: {stderr}", status.map(|c| c.to_string()).unwrap_or_else(|| "none".to_string()))]
    CommandFailed {
        command: String,
        status: Option<i32>,
        stderr: String,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Permission denied errors
    #[error("Permission denied accessing {path}")]
    PermissionDenied { path: PathBuf },

    /// Invalid path errors
    #[error("Invalid path: {path}")]
    InvalidPath { path: PathBuf },

    /// TOML parsing errors
    #[error("TOML parsing error: {source}")]
    TomlParse {
        #[source]
        source: toml::de::Error,
    },

    /// TOML serialization errors
    #[error("TOML serialization error: {source}")]
    TomlSerialize {
        #[source]
        source: toml::ser::Error,
    },

    /// CSV handling errors
    #[error("CSV error: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },

    /// Glob pattern errors
    #[error("Glob pattern error: {source}")]
    GlobPattern {
        #[source]
        source: glob::PatternError,
    },

    /// Configuration file not found
    #[error("Configuration file not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file read errors
    #[error("Error reading configuration file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file parse errors
    #[error("Error parsing configuration file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Output file write errors
    #[error("Error writing to output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stdout write errors
    #[error("Error writing to stdout: {source}")]
    StdoutWrite {
        #[source]
        source: std::io::Error,
    },

    /// Dependency resolution errors with free-form context
    #[error("Dependency analysis error: {message}")]
    Analysis { message: String },

    /// Directory traversal errors
    #[error("Directory traversal error for {path}: {message}")]
    DirectoryTraversal { path: PathBuf, message: String },

    /// JSON serialization error
    #[error("JSON serialization error: {source}")]
    JsonSerialize {
        #[source]
        source: serde_json::Error,
    },

    /// CSV serialization error
    #[error("CSV serialization error: {source}")]
    CsvSerialize {
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// Output directory not found
    #[error("Output directory not found: {path}")]
    OutputDirectoryNotFound { path: PathBuf },

    /// One or more projects of a scan could not be resolved
    #[error("{failed} of {total} project(s) failed to resolve")]
    ProjectsFailed {
        failed: usize,
        total: usize,
        critical: bool,
    },
}

impl GoWalkerError {
    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Warning level errors - operation can continue
            GoWalkerError::PermissionDenied { .. } => ErrorSeverity::Warning,
            GoWalkerError::DirectoryTraversal { .. } => ErrorSeverity::Warning,

            // Critical errors - process should terminate
            GoWalkerError::Config { .. } => ErrorSeverity::Critical,
            GoWalkerError::ConfigNotFound { .. } => ErrorSeverity::Critical,
            GoWalkerError::ConfigRead { .. } => ErrorSeverity::Critical,
            GoWalkerError::ConfigParse { .. } => ErrorSeverity::Critical,
            GoWalkerError::StdoutWrite { .. } => ErrorSeverity::Critical,
            GoWalkerError::OutputDirectoryNotFound { .. } => ErrorSeverity::Critical,
            GoWalkerError::ProjectsFailed { critical: true, .. } => ErrorSeverity::Critical,

            // Everything else fails the current project only
            _ => ErrorSeverity::Error,
        }
    }

    /// Check if this is a critical error that should terminate the process
    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            GoWalkerError::PermissionDenied { path } => {
                format!("Cannot access '{}' due to permission denied. Check file permissions.", path.display())
            }
            GoWalkerError::InvalidPath { path } => {
                format!("Invalid path: '{}'. Please provide a valid directory path.", path.display())
            }
            GoWalkerError::ConfigNotFound { path } => {
                format!("Configuration file not found at '{}'. Create a config file or use command line options.", path.display())
            }
            GoWalkerError::CommandSpawn { command, source } => {
                format!("Could not run '{}': {}. Make sure the Go toolchain is installed and on PATH.", command, source)
            }
            GoWalkerError::CommandFailed { command, stderr, .. } => {
                format!("'{}' failed:\n{}", command, stderr.trim_end())
            }
            GoWalkerError::NoMainModule => {
                "The go tool did not report a main module. Is the directory a Go module?".to_string()
            }
            GoWalkerError::OutputDirectoryNotFound { path } => {
                format!("Output directory '{}' does not exist. Please create the directory or specify a different output path.", path.display())
            }
            // For other errors, use the standard Display implementation
            _ => self.to_string(),
        }
    }

    /// Create an IO error
    pub fn io_error(source: std::io::Error) -> Self {
        GoWalkerError::Io { source }
    }

    /// Create a JSON parse error with context describing the input
    pub fn json_parse_error(context: impl Into<String>, source: serde_json::Error) -> Self {
        GoWalkerError::JsonParse {
            context: context.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        GoWalkerError::Config {
            message: message.into(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        GoWalkerError::PermissionDenied { path: path.into() }
    }

    /// Create an analysis error
    pub fn analysis_error(message: impl Into<String>) -> Self {
        GoWalkerError::Analysis {
            message: message.into(),
        }
    }

    /// Create an unknown module error
    pub fn unknown_module(name: impl Into<String>) -> Self {
        GoWalkerError::UnknownModule { name: name.into() }
    }

    /// Create a directory traversal error
    pub fn directory_traversal_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        GoWalkerError::DirectoryTraversal {
            path: path.into(),
            message: message.into(),
        }
    }
}

// Implement From for common error types
impl From<std::io::Error> for GoWalkerError {
    fn from(err: std::io::Error) -> Self {
        GoWalkerError::io_error(err)
    }
}

impl From<toml::de::Error> for GoWalkerError {
    fn from(err: toml::de::Error) -> Self {
        GoWalkerError::TomlParse { source: err }
    }
}

impl From<toml::ser::Error> for GoWalkerError {
    fn from(err: toml::ser::Error) -> Self {
        GoWalkerError::TomlSerialize { source: err }
    }
}

impl From<csv::Error> for GoWalkerError {
    fn from(err: csv::Error) -> Self {
        GoWalkerError::Csv { source: err }
    }
}

impl From<glob::PatternError> for GoWalkerError {
    fn from(err: glob::PatternError) -> Self {
        GoWalkerError::GlobPattern { source: err }
    }
}

impl From<serde_json::Error> for GoWalkerError {
    fn from(err: serde_json::Error) -> Self {
        GoWalkerError::JsonSerialize { source: err }
    }
}

/// Result type alias for gowalker operations
pub type Result<T> = std::result::Result<T, GoWalkerError>;
