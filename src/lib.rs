//! gowalker - Go module dependency analyzer
//!
//! This library finds Go modules below a directory, runs the go tool to
//! obtain their module requirement graphs and reshapes each graph into a
//! normalized dependency forest with a "main" scope for modules the build
//! uses and a "vendor" scope for everything `go mod vendor` would fetch.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod output;
pub mod parsers;
pub mod utils;

// Re-export commonly used types
pub use error::{
    handle_error, ErrorSeverity, GoWalkerError, OptionExt, Result, ResultExt,
};
pub use models::{
    analysis::{AnalysisResults, AnalysisSummary},
    config::Settings,
    dependency_graph::ModuleGraph,
    identifier::Identifier,
    package::{PackageReference, ProjectAnalyzerResult, Scope},
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
