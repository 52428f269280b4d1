//! Decoding of the concatenated JSON objects printed by `go list -json`

use crate::error::{GoWalkerError, Result};
use crate::models::module_info::{DepInfo, ModuleInfo};
use serde::de::DeserializeOwned;
use std::collections::BTreeSet;

/// Decode a stream of whitespace separated JSON objects
///
/// `context` names the producing command in error messages.
pub fn parse_json_stream<T: DeserializeOwned>(input: &str, context: &str) -> Result<Vec<T>> {
    serde_json::Deserializer::from_str(input)
        .into_iter::<T>()
        .map(|record| record.map_err(|e| GoWalkerError::json_parse_error(context, e)))
        .collect()
}

/// Decode the output of `go list -m -json all`
pub fn parse_module_infos(input: &str) -> Result<Vec<ModuleInfo>> {
    parse_json_stream(input, "go list -m -json all")
}

/// Decode the output of `go list -deps -json=Module ./...` into the set of
/// module paths that provide at least one package of the build
pub fn parse_build_module_paths(input: &str) -> Result<BTreeSet<String>> {
    let deps: Vec<DepInfo> = parse_json_stream(input, "go list -deps -json=Module")?;

    Ok(deps
        .into_iter()
        .filter_map(|dep| dep.module.map(|module| module.path))
        .collect())
}
