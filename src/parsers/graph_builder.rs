//! Module graph construction from `go mod graph` output

use crate::error::{GoWalkerError, Result};
use crate::models::dependency_graph::ModuleGraph;
use crate::parsers::module_registry::ModuleRegistry;

/// Column prefixes of the pseudo-modules go uses for its own language and toolchain versions
pub const TOOLCHAIN_PSEUDO_MODULES: &[&str] = &["go@", "toolchain@"];

/// Counters collected while building a graph
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphBuildStats {
    pub lines: usize,
    pub edges_added: usize,
    pub toolchain_edges_skipped: usize,
    pub indirect_edges_skipped: usize,
}

/// Builds a [`ModuleGraph`] over canonical module identifiers
pub struct ModuleGraphBuilder<'a> {
    registry: &'a ModuleRegistry,
    stats: GraphBuildStats,
}

impl<'a> ModuleGraphBuilder<'a> {
    /// Create a builder resolving module names through `registry`
    pub fn new(registry: &'a ModuleRegistry) -> Self {
        Self {
            registry,
            stats: GraphBuildStats::default(),
        }
    }

    /// Build the graph from `go mod graph` output
    ///
    /// Each non-blank line holds a `parent child` pair of `name@version`
    /// columns. Edges from the main module to the toolchain pseudo-module or
    /// to an indirect requirement are left out. The main module is always
    /// part of the graph.
    pub fn build(&mut self, output: &str) -> Result<ModuleGraph> {
        let mut graph = ModuleGraph::new();
        graph.add_node(self.registry.main_module_id()?);

        for (index, line) in output.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            self.stats.lines += 1;

            let columns: Vec<&str> = line.split_whitespace().collect();
            let [parent_column, child_column] = columns[..] else {
                return Err(GoWalkerError::MalformedGraphLine {
                    line_number: index + 1,
                    line: line.to_string(),
                });
            };

            // go and toolchain versions have no entry in the registry
            if is_toolchain_pseudo_module(parent_column) || is_toolchain_pseudo_module(child_column) {
                self.stats.toolchain_edges_skipped += 1;
                continue;
            }

            let parent = self.registry.resolve(module_name(parent_column))?;
            let child = self.registry.resolve(module_name(child_column))?;

            // Indirect requirements of the main module are transitive closure artifacts
            if parent.main && child.indirect {
                self.stats.indirect_edges_skipped += 1;
                continue;
            }

            graph.add_edge(parent.to_id(), child.to_id());
            self.stats.edges_added += 1;
        }

        tracing::debug!(
            "Parsed {} graph lines: {} edges, {} toolchain and {} indirect edges skipped",
            self.stats.lines,
            self.stats.edges_added,
            self.stats.toolchain_edges_skipped,
            self.stats.indirect_edges_skipped
        );

        Ok(graph)
    }

    /// Counters of the last build
    pub fn stats(&self) -> &GraphBuildStats {
        &self.stats
    }
}

/// Strip the `@version` suffix from a graph column
pub fn module_name(column: &str) -> &str {
    column.split('@').next().unwrap_or(column)
}

fn is_toolchain_pseudo_module(column: &str) -> bool {
    TOOLCHAIN_PSEUDO_MODULES
        .iter()
        .any(|prefix| column.starts_with(prefix))
}
