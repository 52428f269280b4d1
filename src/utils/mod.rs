//! Utility functions and helpers

pub mod logger;
pub mod module_cache;
pub mod proxy;
pub mod stash;

pub use logger::init_logger;
pub use module_cache::vcs_info_for;
pub use proxy::{escape_module_path, go_proxy_from_env, select_go_proxy, source_artifact_url};
pub use stash::DirectoryStash;
