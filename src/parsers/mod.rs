//! Parsing functionality for go tool output
//!
//! This module turns the JSON and line-oriented text printed by the go tool
//! into the module registry, the raw module graph and the used-module sets.

pub mod go_json;
pub mod graph_builder;
pub mod module_registry;
pub mod why_output;

pub use go_json::{parse_build_module_paths, parse_json_stream, parse_module_infos};
pub use graph_builder::{GraphBuildStats, ModuleGraphBuilder};
pub use module_registry::ModuleRegistry;
pub use why_output::parse_why_output;
