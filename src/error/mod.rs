//! Error handling for gowalker
//!
//! This module provides the error type, result alias and error context
//! utilities used throughout the crate.

pub mod context;
pub mod types;

pub use context::{OptionExt, ResultExt, handle_error};
pub use types::{ErrorSeverity, GoWalkerError, Result};
