//! Configuration-related data structures

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default number of modules passed to a single `go mod why` invocation
pub const DEFAULT_WHY_CHUNK_SIZE: usize = 32;

/// Main configuration settings for gowalker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Path to scan for go.mod files
    pub scan_path: PathBuf,

    /// Glob patterns for directories to skip while scanning
    pub exclude_patterns: Vec<String>,

    /// Maximum directory depth to traverse
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,

    /// Output format (text, json, csv)
    pub output_format: OutputFormat,

    /// Output file path (if not specified, output to stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_file: Option<PathBuf>,

    /// Name or path of the go executable
    pub go_binary: PathBuf,

    /// Maximum number of modules per `go mod why` query
    pub why_chunk_size: usize,

    /// Module proxy used to build source artifact URLs, overrides GOPROXY
    #[serde(skip_serializing_if = "Option::is_none")]
    pub go_proxy: Option<String>,

    /// Whether to emit the "vendor" scope next to the "main" scope
    pub include_vendor_scope: bool,

    /// Whether to suppress non-essential output
    pub quiet: bool,

    /// Whether to show debug logging
    pub verbose: bool,

    /// Whether to use colors in text output
    pub use_colors: bool,

    /// Whether to show progress spinners
    pub show_progress: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scan_path: PathBuf::from("."),
            exclude_patterns: vec!["**/.git".to_string(), "**/testdata".to_string()],
            max_depth: None,
            output_format: OutputFormat::Text,
            output_file: None,
            go_binary: PathBuf::from("go"),
            why_chunk_size: DEFAULT_WHY_CHUNK_SIZE,
            go_proxy: None,
            include_vendor_scope: true,
            quiet: false,
            verbose: false,
            use_colors: true,
            show_progress: true,
        }
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable dependency trees
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// CSV output, one row per package
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Partial settings for configuration merging
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialSettings {
    pub scan_path: Option<PathBuf>,
    pub exclude_patterns: Option<Vec<String>>,
    pub max_depth: Option<usize>,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub go_binary: Option<PathBuf>,
    pub why_chunk_size: Option<usize>,
    pub go_proxy: Option<String>,
    pub include_vendor_scope: Option<bool>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
    pub use_colors: Option<bool>,
    pub show_progress: Option<bool>,
}

impl PartialSettings {
    /// Merge another PartialSettings into this one
    /// Fields from `other` take precedence over existing fields
    pub fn merge_from(&mut self, other: PartialSettings) {
        if other.scan_path.is_some() {
            self.scan_path = other.scan_path;
        }
        if other.exclude_patterns.is_some() {
            self.exclude_patterns = other.exclude_patterns;
        }
        if other.max_depth.is_some() {
            self.max_depth = other.max_depth;
        }
        if other.output_format.is_some() {
            self.output_format = other.output_format;
        }
        if other.output_file.is_some() {
            self.output_file = other.output_file;
        }
        if other.go_binary.is_some() {
            self.go_binary = other.go_binary;
        }
        if other.why_chunk_size.is_some() {
            self.why_chunk_size = other.why_chunk_size;
        }
        if other.go_proxy.is_some() {
            self.go_proxy = other.go_proxy;
        }
        if other.include_vendor_scope.is_some() {
            self.include_vendor_scope = other.include_vendor_scope;
        }
        if other.quiet.is_some() {
            self.quiet = other.quiet;
        }
        if other.verbose.is_some() {
            self.verbose = other.verbose;
        }
        if other.use_colors.is_some() {
            self.use_colors = other.use_colors;
        }
        if other.show_progress.is_some() {
            self.show_progress = other.show_progress;
        }
    }

    /// Convert partial settings to full settings
    /// Uses defaults for any fields that are None
    pub fn to_settings(&self) -> Settings {
        let mut settings = Settings::default();

        if let Some(scan_path) = &self.scan_path {
            settings.scan_path = scan_path.clone();
        }
        if let Some(exclude_patterns) = &self.exclude_patterns {
            settings.exclude_patterns = exclude_patterns.clone();
        }
        if let Some(max_depth) = self.max_depth {
            settings.max_depth = Some(max_depth);
        }
        if let Some(output_format) = self.output_format {
            settings.output_format = output_format;
        }
        if let Some(output_file) = &self.output_file {
            settings.output_file = Some(output_file.clone());
        }
        if let Some(go_binary) = &self.go_binary {
            settings.go_binary = go_binary.clone();
        }
        if let Some(why_chunk_size) = self.why_chunk_size {
            settings.why_chunk_size = why_chunk_size;
        }
        if let Some(go_proxy) = &self.go_proxy {
            settings.go_proxy = Some(go_proxy.clone());
        }
        if let Some(include_vendor_scope) = self.include_vendor_scope {
            settings.include_vendor_scope = include_vendor_scope;
        }
        if let Some(quiet) = self.quiet {
            settings.quiet = quiet;
        }
        if let Some(verbose) = self.verbose {
            settings.verbose = verbose;
        }
        if let Some(use_colors) = self.use_colors {
            settings.use_colors = use_colors;
        }
        if let Some(show_progress) = self.show_progress {
            settings.show_progress = show_progress;
        }

        settings
    }
}
