//! Lookups in the go module download cache

use crate::models::module_info::ModuleCacheInfo;
use crate::models::package::VcsInfo;
use crate::utils::proxy::escape_module_path;
use std::fs;
use std::path::{Path, PathBuf};

/// Location of the `.info` file the go tool stores for a downloaded module version
pub fn module_info_file(gopath: &Path, module_path: &str, version: &str) -> PathBuf {
    gopath
        .join("pkg")
        .join("mod")
        .join("cache")
        .join("download")
        .join(escape_module_path(module_path))
        .join("@v")
        .join(format!("{}.info", escape_module_path(version)))
}

/// Version control origin of a module version, empty when unknown
///
/// The `.info` file only carries an origin when the module was fetched
/// directly or through a proxy that records it. A missing or unreadable
/// file is not an error.
pub fn vcs_info_for(gopath: &Path, module_path: &str, version: &str) -> VcsInfo {
    let path = module_info_file(gopath, module_path, version);

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(_) => return VcsInfo::default(),
    };

    let info: ModuleCacheInfo = match serde_json::from_str(&content) {
        Ok(info) => info,
        Err(e) => {
            tracing::debug!("Ignoring malformed module info {}: {}", path.display(), e);
            return VcsInfo::default();
        }
    };

    info.origin
        .map(|origin| VcsInfo {
            vcs_type: origin.vcs,
            url: origin.url,
            revision: origin.hash.or(origin.r#ref).unwrap_or_default(),
            path: origin.subdir.unwrap_or_default(),
        })
        .unwrap_or_default()
}
