//! Records decoded from the JSON output of the go tool

use super::identifier::{normalize_module_version, Identifier};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One module as reported by `go list -m -json all`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModuleInfo {
    pub path: String,

    #[serde(default)]
    pub version: String,

    /// Target of a `replace` directive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replace: Option<Box<ModuleInfo>>,

    /// True if the module is only required transitively
    #[serde(default)]
    pub indirect: bool,

    /// True for the module whose directory the go tool was run in
    #[serde(default)]
    pub main: bool,

    /// Path to the go.mod file describing the module
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub go_mod: Option<PathBuf>,

    /// Directory holding the module sources, if downloaded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl ModuleInfo {
    /// Convenience constructor for a plain required module
    pub fn new(path: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            version: version.into(),
            ..Default::default()
        }
    }

    /// The identifier this module is known by in the dependency graph
    pub fn to_id(&self) -> Identifier {
        Identifier::go(self.path.clone(), normalize_module_version(&self.version))
    }
}

/// Module reference nested in a `go list -deps -json=Module` package record
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModuleRef {
    pub path: String,
}

/// One build package as reported by `go list -deps -json=Module ./...`
///
/// Packages from the standard library carry no module.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DepInfo {
    #[serde(default)]
    pub module: Option<ModuleRef>,
}

/// Source control origin recorded in a module cache `.info` file
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModuleOrigin {
    #[serde(rename = "VCS", default)]
    pub vcs: String,
    #[serde(rename = "URL", default)]
    pub url: String,
    #[serde(default)]
    pub r#ref: Option<String>,
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(default)]
    pub subdir: Option<String>,
}

/// Content of `<GOPATH>/pkg/mod/cache/download/<module>/@v/<version>.info`
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModuleCacheInfo {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub origin: Option<ModuleOrigin>,
}
