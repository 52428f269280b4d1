//! Core functionality for module discovery and dependency resolution

pub mod analyzer;
pub mod finder;
pub mod go_command;
pub mod scanner;
pub mod vendor;

pub use analyzer::GoModAnalyzer;
pub use finder::GoModFinder;
pub use go_command::{GoCli, GoCommand};
pub use scanner::Scanner;
pub use vendor::VendorSetClassifier;
