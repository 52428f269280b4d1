//! Directed module graph used by the resolution engine
//!
//! Nodes are [`Identifier`]s stored once in a petgraph arena and looked up
//! through an index map. Edges point from a module to the modules it
//! requires. The graph may contain cycles until [`ModuleGraph::break_cycles`]
//! has been called; only then may it be projected into reference trees.

use super::identifier::Identifier;
use super::package::PackageReference;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Directed graph of module dependencies
#[derive(Debug, Clone, Default)]
pub struct ModuleGraph {
    graph: DiGraph<Identifier, ()>,
    indices: HashMap<Identifier, NodeIndex>,
}

impl ModuleGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node if it is not yet present and return its index
    pub fn add_node(&mut self, id: Identifier) -> NodeIndex {
        if let Some(index) = self.indices.get(&id) {
            return *index;
        }

        let index = self.graph.add_node(id.clone());
        self.indices.insert(id, index);
        index
    }

    /// Add an edge, adding both endpoints as nodes if needed
    ///
    /// Adding the same edge twice has no effect.
    pub fn add_edge(&mut self, from: Identifier, to: Identifier) {
        let from = self.add_node(from);
        let to = self.add_node(to);
        self.graph.update_edge(from, to, ());
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains_node(&self, id: &Identifier) -> bool {
        self.indices.contains_key(id)
    }

    pub fn contains_edge(&self, from: &Identifier, to: &Identifier) -> bool {
        match (self.indices.get(from), self.indices.get(to)) {
            (Some(from), Some(to)) => self.graph.contains_edge(*from, *to),
            _ => false,
        }
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Identifier> {
        self.graph.node_indices().map(move |index| &self.graph[index])
    }

    /// All edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = (&Identifier, &Identifier)> {
        self.graph
            .edge_references()
            .map(move |edge| (&self.graph[edge.source()], &self.graph[edge.target()]))
    }

    /// Direct dependencies of `id` in edge insertion order
    pub fn dependencies(&self, id: &Identifier) -> Vec<&Identifier> {
        match self.indices.get(id) {
            Some(index) => self
                .successors(*index)
                .into_iter()
                .map(|successor| &self.graph[successor])
                .collect(),
            None => Vec::new(),
        }
    }

    /// Build the subgraph induced by the nodes for which `keep` returns true
    ///
    /// Only edges with both endpoints kept survive. Node and edge order is preserved.
    pub fn subgraph<F>(&self, mut keep: F) -> ModuleGraph
    where
        F: FnMut(&Identifier) -> bool,
    {
        let graph = self
            .graph
            .filter_map(|_, id| keep(id).then(|| id.clone()), |_, _| Some(()));

        Self::from_graph(graph)
    }

    /// Build the subgraph induced by a set of identifiers
    pub fn subgraph_of(&self, ids: &HashSet<Identifier>) -> ModuleGraph {
        self.subgraph(|id| ids.contains(id))
    }

    /// Remove back-edges so that the graph becomes acyclic
    ///
    /// A depth-first search starts from every unvisited node in insertion
    /// order and follows edges in insertion order; each edge that points to a
    /// node on the current search path is dropped. Nodes are never removed.
    /// Returns the removed edges.
    pub fn break_cycles(&mut self) -> Vec<(Identifier, Identifier)> {
        let back_edges = self.find_back_edges();
        if back_edges.is_empty() {
            return Vec::new();
        }

        let removed = back_edges
            .iter()
            .filter_map(|edge| self.graph.edge_endpoints(*edge))
            .map(|(from, to)| (self.graph[from].clone(), self.graph[to].clone()))
            .collect();

        let back_edges: HashSet<EdgeIndex> = back_edges.into_iter().collect();
        let graph = self.graph.filter_map(
            |_, id| Some(id.clone()),
            |edge, _| (!back_edges.contains(&edge)).then_some(()),
        );
        *self = Self::from_graph(graph);

        debug_assert!(!self.has_cycles());
        removed
    }

    /// Check whether the graph contains a directed cycle
    pub fn has_cycles(&self) -> bool {
        petgraph::algo::is_cyclic_directed(&self.graph)
    }

    /// Project the graph into one reference tree per direct dependency of `root`
    ///
    /// Each node expands into its own successors, so a module reachable over
    /// several paths appears once per path. The graph must be acyclic.
    pub fn to_package_reference_forest(&self, root: &Identifier) -> BTreeSet<PackageReference> {
        let Some(root) = self.indices.get(root) else {
            return BTreeSet::new();
        };

        let mut cache = HashMap::new();
        self.successors(*root)
            .into_iter()
            .map(|child| self.package_reference(child, &mut cache))
            .collect()
    }

    fn package_reference(
        &self,
        index: NodeIndex,
        cache: &mut HashMap<NodeIndex, PackageReference>,
    ) -> PackageReference {
        if let Some(reference) = cache.get(&index) {
            return reference.clone();
        }

        let dependencies = self
            .successors(index)
            .into_iter()
            .map(|child| self.package_reference(child, cache))
            .collect();

        let reference = PackageReference::new(self.graph[index].clone(), dependencies);
        cache.insert(index, reference.clone());
        reference
    }

    fn successors(&self, index: NodeIndex) -> Vec<NodeIndex> {
        self.outgoing_edges(index)
            .into_iter()
            .map(|(_, target)| target)
            .collect()
    }

    fn find_back_edges(&self) -> Vec<EdgeIndex> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            OnPath,
            Done,
        }

        let mut marks = vec![Mark::Unvisited; self.graph.node_count()];
        let mut back_edges = Vec::new();

        for start in self.graph.node_indices() {
            if marks[start.index()] != Mark::Unvisited {
                continue;
            }

            // Explicit stack of (node, outgoing edges, next edge position)
            marks[start.index()] = Mark::OnPath;
            let mut stack = vec![(start, self.outgoing_edges(start), 0usize)];

            while let Some((node, edges, position)) = stack.last_mut() {
                if let Some((edge, target)) = edges.get(*position).copied() {
                    *position += 1;
                    match marks[target.index()] {
                        Mark::Unvisited => {
                            marks[target.index()] = Mark::OnPath;
                            stack.push((target, self.outgoing_edges(target), 0));
                        }
                        Mark::OnPath => back_edges.push(edge),
                        Mark::Done => {}
                    }
                } else {
                    marks[node.index()] = Mark::Done;
                    stack.pop();
                }
            }
        }

        back_edges
    }

    fn outgoing_edges(&self, index: NodeIndex) -> Vec<(EdgeIndex, NodeIndex)> {
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(index, Direction::Outgoing)
            .map(|edge| (edge.id(), edge.target()))
            .collect();
        edges.sort_by_key(|(edge, _)| edge.index());
        edges
    }

    fn from_graph(graph: DiGraph<Identifier, ()>) -> Self {
        let indices = graph
            .node_indices()
            .map(|index| (graph[index].clone(), index))
            .collect();
        Self { graph, indices }
    }
}
