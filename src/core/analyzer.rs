//! Dependency resolution for a single Go module
//!
//! [`GoModAnalyzer`] drives the go tool through the resolution pipeline: the
//! module registry, the raw module graph, vendor-set pruning, cycle removal
//! and finally the projection of the graph into the "main" and "vendor"
//! scopes.

use crate::core::go_command::GoCommand;
use crate::core::vendor::VendorSetClassifier;
use crate::error::Result;
use crate::models::config::{Settings, DEFAULT_WHY_CHUNK_SIZE};
use crate::models::dependency_graph::ModuleGraph;
use crate::models::identifier::Identifier;
use crate::models::package::{
    Package, Project, ProjectAnalyzerResult, RemoteArtifact, Scope, VcsInfo, MAIN_SCOPE,
    VENDOR_SCOPE,
};
use crate::parsers::go_json::parse_build_module_paths;
use crate::parsers::graph_builder::ModuleGraphBuilder;
use crate::parsers::module_registry::ModuleRegistry;
use crate::utils::module_cache::vcs_info_for;
use crate::utils::proxy::{go_proxy_from_env, select_go_proxy, source_artifact_url};
use crate::utils::stash::DirectoryStash;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::{Path, PathBuf};

/// Resolves the dependency forest of Go modules
pub struct GoModAnalyzer<G: GoCommand> {
    go: G,
    why_chunk_size: usize,
    go_proxy: String,
    include_vendor_scope: bool,
}

impl<G: GoCommand> GoModAnalyzer<G> {
    /// Create an analyzer that runs the go tool through `go`
    ///
    /// Source artifact URLs use the proxy named by the GOPROXY environment
    /// variable until [`with_go_proxy`](Self::with_go_proxy) overrides it.
    pub fn new(go: G) -> Self {
        Self {
            go,
            why_chunk_size: DEFAULT_WHY_CHUNK_SIZE,
            go_proxy: go_proxy_from_env(),
            include_vendor_scope: true,
        }
    }

    /// Create an analyzer configured from settings
    pub fn from_settings(go: G, settings: &Settings) -> Self {
        let analyzer = Self::new(go)
            .with_why_chunk_size(settings.why_chunk_size)
            .with_vendor_scope(settings.include_vendor_scope);

        match &settings.go_proxy {
            Some(go_proxy) => analyzer.with_go_proxy(go_proxy),
            None => analyzer,
        }
    }

    pub fn with_why_chunk_size(mut self, why_chunk_size: usize) -> Self {
        self.why_chunk_size = why_chunk_size.max(1);
        self
    }

    /// Use the first proxy of a GOPROXY style list for source artifact URLs
    pub fn with_go_proxy(mut self, go_proxy: &str) -> Self {
        self.go_proxy = select_go_proxy(Some(go_proxy));
        self
    }

    pub fn with_vendor_scope(mut self, include_vendor_scope: bool) -> Self {
        self.include_vendor_scope = include_vendor_scope;
        self
    }

    /// Proxy base URL used for source artifacts
    pub fn go_proxy(&self) -> &str {
        &self.go_proxy
    }

    /// Resolve the dependencies declared by `definition_file`
    ///
    /// `definition_file` is the path of a go.mod file. The project's
    /// definition file path is reported relative to `scan_root`. A `vendor`
    /// directory next to the go.mod file is moved away while the go tool runs
    /// and restored afterwards, also when resolution fails.
    pub fn resolve_dependencies(
        &self,
        definition_file: &Path,
        scan_root: &Path,
    ) -> Result<ProjectAnalyzerResult> {
        let project_dir = definition_file
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        tracing::info!("Resolving dependencies of {}", definition_file.display());
        let _stash = DirectoryStash::stash([project_dir.join("vendor")])?;

        let registry = ModuleRegistry::parse(&self.go.run(&["list", "-m", "-json", "all"], project_dir)?)?;
        tracing::debug!("Registered {} module names", registry.len());

        let mut builder = ModuleGraphBuilder::new(&registry);
        let graph = builder.build(&self.go.run(&["mod", "graph"], project_dir)?)?;

        let main_module = registry.main_module_name();
        let main_id = registry.main_module_id()?;
        let aliases = registry.aliases();

        let mut graph = VendorSetClassifier::new(&self.go, project_dir)
            .with_chunk_size(self.why_chunk_size)
            .prune(graph, main_module, &aliases)?;

        let removed = graph.break_cycles();
        for (from, to) in &removed {
            tracing::warn!("Removed dependency cycle edge {} -> {}", from, to);
        }

        let build_output = self.go.run(&["list", "-deps", "-json=Module", "./..."], project_dir)?;
        let mut build_modules = parse_build_module_paths(&build_output)?;
        build_modules.insert(main_module.to_string());

        let build_graph = restrict_to_build_modules(&graph, &build_modules, &aliases);
        tracing::debug!(
            "{} of {} modules are used by the build",
            build_graph.node_count(),
            graph.node_count()
        );

        let mut scopes = BTreeSet::from([Scope::new(
            MAIN_SCOPE,
            build_graph.to_package_reference_forest(&main_id),
        )]);
        if self.include_vendor_scope {
            scopes.insert(Scope::new(VENDOR_SCOPE, graph.to_package_reference_forest(&main_id)));
        }

        let packages: BTreeSet<Package> = graph
            .nodes()
            .filter(|id| !registry.is_main_module(id))
            .map(|id| self.package_for(id, &registry))
            .collect();

        tracing::info!(
            "Resolved {} packages for {}",
            packages.len(),
            main_module
        );

        Ok(ProjectAnalyzerResult {
            project: Project {
                id: main_id,
                definition_file_path: relative_definition_path(definition_file, scan_root),
                vcs: VcsInfo::default(),
                scopes,
            },
            packages,
        })
    }

    fn package_for(&self, id: &Identifier, registry: &ModuleRegistry) -> Package {
        // Raw versions are needed for proxy and cache lookups, the identifier holds the normalized one
        let (path, version) = registry
            .get(&id.name)
            .map(|module| (module.path.as_str(), module.version.as_str()))
            .unwrap_or((id.name.as_str(), ""));

        // Local directory replacements have no version and nothing to download
        let (source_artifact, vcs) = if version.is_empty() {
            (RemoteArtifact::default(), VcsInfo::default())
        } else {
            let url = source_artifact_url(&self.go_proxy, path, version);
            let vcs = self
                .go
                .gopath()
                .map(|gopath| vcs_info_for(gopath, path, version))
                .unwrap_or_default();
            (RemoteArtifact { url }, vcs)
        };

        Package {
            id: id.clone(),
            declared_licenses: BTreeSet::new(),
            authors: BTreeSet::new(),
            source_artifact,
            vcs,
        }
    }
}

/// Subgraph over the modules that take part in the build
///
/// The go tool reports required module paths while graph nodes carry the
/// replacement paths, so both names count.
fn restrict_to_build_modules(
    graph: &ModuleGraph,
    build_modules: &BTreeSet<String>,
    aliases: &BTreeMap<String, String>,
) -> ModuleGraph {
    let used: HashSet<&str> = build_modules
        .iter()
        .flat_map(|name| std::iter::once(name.as_str()).chain(aliases.get(name).map(String::as_str)))
        .collect();

    graph.subgraph(|id| used.contains(id.name.as_str()))
}

fn relative_definition_path(definition_file: &Path, scan_root: &Path) -> PathBuf {
    definition_file
        .strip_prefix(scan_root)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| definition_file.to_path_buf())
}
