//! Module proxy helpers for building source artifact locations

/// Proxy used when GOPROXY names no usable proxy
pub const DEFAULT_GO_PROXY: &str = "https://proxy.golang.org";

/// Pick the first real proxy from a GOPROXY value
///
/// Entries are separated by `,` or `|`. The keywords `direct` and `off` are
/// not proxies and are skipped.
pub fn select_go_proxy(goproxy: Option<&str>) -> String {
    goproxy
        .unwrap_or_default()
        .split([',', '|'])
        .map(str::trim)
        .find(|entry| !entry.is_empty() && *entry != "direct" && *entry != "off")
        .unwrap_or(DEFAULT_GO_PROXY)
        .trim_end_matches('/')
        .to_string()
}

/// Proxy selected from the GOPROXY environment variable
pub fn go_proxy_from_env() -> String {
    select_go_proxy(std::env::var("GOPROXY").ok().as_deref())
}

/// Escape a module path or version for use in proxy URLs and cache paths
///
/// Upper-case letters are replaced by `!` followed by the lower-case letter so
/// that paths stay unique on case-insensitive file systems.
pub fn escape_module_path(path: &str) -> String {
    let mut escaped = String::with_capacity(path.len());
    for c in path.chars() {
        if c.is_ascii_uppercase() {
            escaped.push('!');
            escaped.push(c.to_ascii_lowercase());
        } else {
            escaped.push(c);
        }
    }
    escaped
}

/// URL of the zip archive the proxy serves for a module version
pub fn source_artifact_url(proxy: &str, module_path: &str, version: &str) -> String {
    format!(
        "{}/{}/@v/{}.zip",
        proxy.trim_end_matches('/'),
        escape_module_path(module_path),
        escape_module_path(version)
    )
}
