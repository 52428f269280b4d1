//! File and environment configuration sources

use std::path::{Path, PathBuf};

use super::{parser, ConfigSource};
use crate::error::Result;
use crate::models::config::PartialSettings;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = ".gowalker.toml";

/// Configuration file source
pub struct FileConfig {
    path: PathBuf,
    name: String,
    priority: u8,
}

impl FileConfig {
    /// Create a new file configuration source with the default path
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CONFIG_FILE),
            name: "default config file".to_string(),
            priority: 20,
        }
    }

    /// Create a new file configuration source with a custom path
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            name: format!("config file ({})", path.as_ref().display()),
            priority: 20,
        }
    }

    /// Get the path of this configuration file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create a default configuration file at this location
    pub fn create_default(&self) -> Result<()> {
        parser::create_default_config(&self.path)
    }
}

impl ConfigSource for FileConfig {
    fn load(&self) -> Result<PartialSettings> {
        parser::parse_config_file(&self.path)
    }

    fn is_available(&self) -> bool {
        self.path.is_file()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Suffixes of the environment variables understood by [`EnvConfig`]
const ENV_SUFFIXES: &[&str] = &[
    "SCAN_PATH",
    "EXCLUDE",
    "MAX_DEPTH",
    "OUTPUT_FORMAT",
    "OUTPUT_FILE",
    "GO_BINARY",
    "WHY_CHUNK_SIZE",
    "GO_PROXY",
    "INCLUDE_VENDOR_SCOPE",
    "QUIET",
    "VERBOSE",
    "USE_COLORS",
    "SHOW_PROGRESS",
];

/// Environment variable configuration source
///
/// Reads `<PREFIX>_<SETTING>` variables, e.g. `GOWALKER_WHY_CHUNK_SIZE`.
/// Values that do not parse are ignored with a warning.
pub struct EnvConfig {
    prefix: String,
    name: String,
    priority: u8,
}

impl EnvConfig {
    /// Create a new environment variable configuration source
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            name: format!("{} environment variables", &prefix),
            prefix,
            priority: 15,
        }
    }

    fn var(&self, suffix: &str) -> Option<String> {
        std::env::var(format!("{}_{}", self.prefix, suffix)).ok()
    }

    fn parsed<T: std::str::FromStr>(&self, suffix: &str) -> Option<T> {
        let value = self.var(suffix)?;
        match value.parse() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                tracing::warn!("Ignoring invalid value '{}' of {}_{}", value, self.prefix, suffix);
                None
            }
        }
    }

    fn flag(&self, suffix: &str) -> Option<bool> {
        let value = self.var(suffix)?;
        match value.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => {
                tracing::warn!("Ignoring invalid flag '{}' of {}_{}", value, self.prefix, suffix);
                None
            }
        }
    }
}

impl ConfigSource for EnvConfig {
    fn load(&self) -> Result<PartialSettings> {
        Ok(PartialSettings {
            scan_path: self.var("SCAN_PATH").map(PathBuf::from),
            exclude_patterns: self.var("EXCLUDE").map(|exclude| {
                exclude
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            }),
            max_depth: self.parsed("MAX_DEPTH"),
            output_format: self.parsed("OUTPUT_FORMAT"),
            output_file: self.var("OUTPUT_FILE").map(PathBuf::from),
            go_binary: self.var("GO_BINARY").map(PathBuf::from),
            why_chunk_size: self.parsed("WHY_CHUNK_SIZE"),
            go_proxy: self.var("GO_PROXY"),
            include_vendor_scope: self.flag("INCLUDE_VENDOR_SCOPE"),
            quiet: self.flag("QUIET"),
            verbose: self.flag("VERBOSE"),
            use_colors: self.flag("USE_COLORS"),
            show_progress: self.flag("SHOW_PROGRESS"),
        })
    }

    fn is_available(&self) -> bool {
        ENV_SUFFIXES.iter().any(|suffix| self.var(suffix).is_some())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}
