//! Vendor-set classification
//!
//! `go mod graph` lists every module of the transitive requirement closure,
//! including modules that only matter for tests of dependencies. This
//! classifier asks `go mod why -m -vendor` which of them are needed to build
//! and test the main module and prunes the rest from the graph.

use crate::core::go_command::GoCommand;
use crate::error::Result;
use crate::models::config::DEFAULT_WHY_CHUNK_SIZE;
use crate::models::dependency_graph::ModuleGraph;
use crate::parsers::why_output::parse_why_output;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;

/// Determines which graph nodes belong to the vendor set
pub struct VendorSetClassifier<'a, G: GoCommand + ?Sized> {
    go: &'a G,
    project_dir: &'a Path,
    chunk_size: usize,
}

impl<'a, G: GoCommand + ?Sized> VendorSetClassifier<'a, G> {
    pub fn new(go: &'a G, project_dir: &'a Path) -> Self {
        Self {
            go,
            project_dir,
            chunk_size: DEFAULT_WHY_CHUNK_SIZE,
        }
    }

    /// Limit the number of modules per query, which bounds the command line length
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Names of all modules needed to build and vendor the main module
    ///
    /// Graph node names are translated through `aliases` before querying
    /// because `go mod why` only knows replacement targets. The main module
    /// is always part of the result.
    pub fn vendor_module_names(
        &self,
        graph: &ModuleGraph,
        main_module: &str,
        aliases: &BTreeMap<String, String>,
    ) -> Result<BTreeSet<String>> {
        let mut seen = HashSet::new();
        let names: Vec<&str> = graph
            .nodes()
            .map(|id| aliased(&id.name, aliases))
            .filter(|name| seen.insert(*name))
            .collect();

        let mut vendor_modules = BTreeSet::from([main_module.to_string()]);

        for (batch, chunk) in names.chunks(self.chunk_size).enumerate() {
            tracing::debug!("Querying 'go mod why' batch {} with {} modules", batch + 1, chunk.len());

            let mut args = vec!["mod", "why", "-m", "-vendor"];
            args.extend_from_slice(chunk);

            let output = self.go.run(&args, self.project_dir)?;
            vendor_modules.extend(parse_why_output(&output));
        }

        Ok(vendor_modules)
    }

    /// Restrict the graph to the vendor set
    ///
    /// The graph is returned unchanged when every node is in the vendor set.
    pub fn prune(
        &self,
        graph: ModuleGraph,
        main_module: &str,
        aliases: &BTreeMap<String, String>,
    ) -> Result<ModuleGraph> {
        let vendor_modules = self.vendor_module_names(&graph, main_module, aliases)?;

        let survivors: HashSet<_> = graph
            .nodes()
            .filter(|id| vendor_modules.contains(aliased(&id.name, aliases)))
            .cloned()
            .collect();

        if survivors.len() == graph.node_count() {
            return Ok(graph);
        }

        tracing::info!(
            "Excluding {} of {} modules that are not needed to build the main module",
            graph.node_count() - survivors.len(),
            graph.node_count()
        );

        Ok(graph.subgraph_of(&survivors))
    }
}

fn aliased<'n>(name: &'n str, aliases: &'n BTreeMap<String, String>) -> &'n str {
    aliases.get(name).map(String::as_str).unwrap_or(name)
}
