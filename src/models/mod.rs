//! Data models and structures for gowalker

pub mod analysis;
pub mod config;
pub mod dependency_graph;
pub mod identifier;
pub mod module_info;
pub mod package;

pub use analysis::{AnalysisError, AnalysisResults, AnalysisSummary};
pub use config::Settings;
pub use dependency_graph::ModuleGraph;
pub use identifier::{normalize_module_version, Identifier};
pub use module_info::{DepInfo, ModuleInfo, ModuleRef};
pub use package::{
    Package, PackageLinkage, PackageReference, Project, ProjectAnalyzerResult, RemoteArtifact,
    Scope, VcsInfo, MAIN_SCOPE, VENDOR_SCOPE,
};
