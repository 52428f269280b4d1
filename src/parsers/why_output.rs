//! Parsing of `go mod why -m -vendor` output
//!
//! The output consists of one section per queried module:
//!
//! ```text
//! # golang.org/x/text
//! example.com/app
//! golang.org/x/text/language
//!
//! # github.com/unused/mod
//! (main module does not need to vendor module github.com/unused/mod)
//! ```
//!
//! Any non-blank line under a heading that is not parenthesized is an import
//! chain, which proves the module is used.

use std::collections::BTreeSet;

/// Marker that starts a new module section
pub const SECTION_PREFIX: &str = "# ";

/// Return the names of all modules with at least one import chain
pub fn parse_why_output(output: &str) -> BTreeSet<String> {
    let mut used_modules = BTreeSet::new();
    let mut current_module: Option<&str> = None;

    for line in output.lines() {
        if let Some(name) = line.strip_prefix(SECTION_PREFIX) {
            current_module = Some(name.trim());
        } else if !line.trim().is_empty() && !line.starts_with('(') {
            if let Some(name) = current_module {
                used_modules.insert(name.to_string());
            }
        }
    }

    used_modules
}
