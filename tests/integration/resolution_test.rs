//! Tests for the resolution stages: registry, graph building, vendor-set
//! classification, cycle breaking and forest projection

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;
use gowalker::{
    core::{GoCommand, VendorSetClassifier},
    error::{GoWalkerError, Result},
    models::{dependency_graph::ModuleGraph, identifier::Identifier, package::PackageReference},
    parsers::{ModuleGraphBuilder, ModuleRegistry},
};

/// Answers `go mod why` queries and records every batch
struct WhyRecorder {
    unused: BTreeSet<String>,
    batches: RefCell<Vec<Vec<String>>>,
}

impl WhyRecorder {
    fn new(unused: &[&str]) -> Self {
        Self {
            unused: unused.iter().map(|s| s.to_string()).collect(),
            batches: RefCell::new(Vec::new()),
        }
    }
}

impl GoCommand for WhyRecorder {
    fn run(&self, args: &[&str], _working_dir: &Path) -> Result<String> {
        let ["mod", "why", "-m", "-vendor", names @ ..] = args else {
            return Err(GoWalkerError::analysis_error(format!("unexpected command: go {}", args.join(" "))));
        };

        self.batches
            .borrow_mut()
            .push(names.iter().map(|name| name.to_string()).collect());

        let mut output = String::new();
        for name in names {
            output.push_str(&format!("# {}\n", name));
            if self.unused.contains(*name) {
                output.push_str(&format!("(main module does not need to vendor module {})\n", name));
            } else {
                output.push_str("example.com/main\n");
            }
        }
        Ok(output)
    }
}

fn id(name: &str) -> Identifier {
    Identifier::go(name, "1.0.0")
}

fn main_id() -> Identifier {
    Identifier::go("example.com/main", "")
}

#[test]
fn test_why_queries_are_chunked() {
    let mut graph = ModuleGraph::new();
    graph.add_node(main_id());
    for index in 0..64 {
        graph.add_edge(main_id(), id(&format!("example.com/dep{:02}", index)));
    }
    assert_eq!(graph.node_count(), 65);

    let go = WhyRecorder::new(&[]);
    let classifier = VendorSetClassifier::new(&go, Path::new(".")).with_chunk_size(32);
    let names = classifier
        .vendor_module_names(&graph, "example.com/main", &BTreeMap::new())
        .unwrap();
    assert_eq!(names.len(), 65);

    let batches = go.batches.borrow();
    let sizes: Vec<usize> = batches.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![32, 32, 1]);

    for batch in batches.iter() {
        let distinct: HashSet<&String> = batch.iter().collect();
        assert_eq!(distinct.len(), batch.len());
    }

    let queried: HashSet<&String> = batches.iter().flatten().collect();
    assert_eq!(queried.len(), 65);
}

#[test]
fn test_unused_modules_are_pruned() {
    let mut graph = ModuleGraph::new();
    graph.add_edge(main_id(), id("example.com/used"));
    graph.add_edge(id("example.com/used"), id("example.com/unused"));
    graph.add_edge(id("example.com/unused"), id("example.com/leaf"));

    let go = WhyRecorder::new(&["example.com/unused"]);
    let pruned = VendorSetClassifier::new(&go, Path::new("."))
        .prune(graph, "example.com/main", &BTreeMap::new())
        .unwrap();

    assert_eq!(pruned.node_count(), 3);
    assert!(!pruned.contains_node(&id("example.com/unused")));
    assert!(pruned.contains_node(&id("example.com/leaf")));
    assert!(pruned.contains_edge(&main_id(), &id("example.com/used")));
    assert_eq!(pruned.edge_count(), 1);
}

#[test]
fn test_replaced_modules_are_queried_by_replacement() {
    let registry = ModuleRegistry::parse(
        r#"
{"Path": "example.com/main", "Main": true}
{"Path": "github.com/upstream/lib", "Version": "v1.2.0", "Replace": {"Path": "github.com/fork/lib", "Version": "v1.2.1"}}
"#,
    )
    .unwrap();

    let graph = ModuleGraphBuilder::new(&registry)
        .build("example.com/main github.com/upstream/lib@v1.2.0\n")
        .unwrap();
    let fork = Identifier::go("github.com/fork/lib", "1.2.1");
    assert!(graph.contains_edge(&main_id(), &fork));

    let go = WhyRecorder::new(&[]);
    let names = VendorSetClassifier::new(&go, Path::new("."))
        .vendor_module_names(&graph, registry.main_module_name(), &registry.aliases())
        .unwrap();

    assert!(names.contains("github.com/fork/lib"));
    let queried: Vec<String> = go.batches.borrow().iter().flatten().cloned().collect();
    assert!(queried.contains(&"github.com/fork/lib".to_string()));
    assert!(!queried.contains(&"github.com/upstream/lib".to_string()));
}

#[test]
fn test_unknown_module_in_graph_is_an_error() {
    let registry = ModuleRegistry::parse(r#"{"Path": "example.com/main", "Main": true}"#).unwrap();
    let result = ModuleGraphBuilder::new(&registry).build("example.com/main github.com/ghost/mod@v1.0.0\n");

    assert!(matches!(result, Err(GoWalkerError::UnknownModule { .. })));
}

#[test]
fn test_cycles_are_broken_before_projection() {
    let mut graph = ModuleGraph::new();
    graph.add_edge(main_id(), id("a"));
    graph.add_edge(id("a"), id("b"));
    graph.add_edge(id("b"), id("c"));
    graph.add_edge(id("c"), id("a"));
    assert!(graph.has_cycles());

    let removed = graph.break_cycles();

    assert_eq!(removed, vec![(id("c"), id("a"))]);
    assert!(!graph.has_cycles());
    assert_eq!(graph.node_count(), 4);

    let forest = graph.to_package_reference_forest(&main_id());
    let c = PackageReference::new(id("c"), BTreeSet::new());
    let b = PackageReference::new(id("b"), BTreeSet::from([c]));
    let a = PackageReference::new(id("a"), BTreeSet::from([b]));
    assert_eq!(forest, BTreeSet::from([a]));
}

#[test]
fn test_shared_dependency_appears_under_each_parent() {
    let mut graph = ModuleGraph::new();
    graph.add_edge(main_id(), id("x"));
    graph.add_edge(main_id(), id("y"));
    graph.add_edge(id("x"), id("shared"));
    graph.add_edge(id("y"), id("shared"));

    let forest = graph.to_package_reference_forest(&main_id());

    assert_eq!(forest.len(), 2);
    for tree in &forest {
        let children: Vec<&str> = tree.dependencies.iter().map(|child| child.id.name.as_str()).collect();
        assert_eq!(children, vec!["shared"]);
    }
}
