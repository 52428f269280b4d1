//! Canonical package identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Package type used for every identifier produced by this crate
pub const GO_PACKAGE_TYPE: &str = "Go";

/// A canonical (type, namespace, name, version) coordinate for a module
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Identifier {
    #[serde(rename = "type")]
    pub package_type: String,
    pub namespace: String,
    pub name: String,
    pub version: String,
}

impl Identifier {
    /// Create a Go module identifier from a module path and an already normalized version
    pub fn go(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            package_type: GO_PACKAGE_TYPE.to_string(),
            namespace: String::new(),
            name: name.into(),
            version: version.into(),
        }
    }

    /// Coordinates in `type:namespace:name:version` form
    pub fn to_coordinates(&self) -> String {
        format!("{}:{}:{}:{}", self.package_type, self.namespace, self.name, self.version)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_coordinates())
    }
}

/// Normalize a Go module version for use in an [`Identifier`]
///
/// Drops the leading `v` and the `+incompatible` marker that Go appends to
/// major versions >= 2 without a `/vN` path suffix.
pub fn normalize_module_version(version: &str) -> String {
    let version = version.strip_suffix("+incompatible").unwrap_or(version);
    version.strip_prefix('v').unwrap_or(version).to_string()
}
