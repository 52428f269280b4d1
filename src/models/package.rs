//! Result model: packages, scopes and dependency reference trees

use super::identifier::Identifier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Name of the scope holding modules needed to build the main module
pub const MAIN_SCOPE: &str = "main";

/// Name of the scope holding everything `go mod vendor` would fetch
pub const VENDOR_SCOPE: &str = "vendor";

/// How a dependency is linked into the project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackageLinkage {
    /// Statically compiled into the project's binaries
    ProjectStatic,
}

/// A node in a dependency tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PackageReference {
    pub id: Identifier,
    pub linkage: PackageLinkage,
    #[serde(skip_serializing_if = "BTreeSet::is_empty", default)]
    pub dependencies: BTreeSet<PackageReference>,
}

impl PackageReference {
    /// Create a statically linked reference with the given children
    pub fn new(id: Identifier, dependencies: BTreeSet<PackageReference>) -> Self {
        Self {
            id,
            linkage: PackageLinkage::ProjectStatic,
            dependencies,
        }
    }

    /// Number of reference nodes in this tree, including this one
    pub fn tree_size(&self) -> usize {
        1 + self.dependencies.iter().map(PackageReference::tree_size).sum::<usize>()
    }

    /// Depth of this tree, a leaf has depth 1
    pub fn depth(&self) -> usize {
        1 + self.dependencies.iter().map(PackageReference::depth).max().unwrap_or(0)
    }
}

/// A named partition of the dependency forest
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Scope {
    pub name: String,
    pub dependencies: BTreeSet<PackageReference>,
}

impl Scope {
    pub fn new(name: impl Into<String>, dependencies: BTreeSet<PackageReference>) -> Self {
        Self {
            name: name.into(),
            dependencies,
        }
    }

    /// Collect every identifier referenced anywhere in this scope
    pub fn collect_ids(&self) -> BTreeSet<Identifier> {
        fn walk(reference: &PackageReference, ids: &mut BTreeSet<Identifier>) {
            ids.insert(reference.id.clone());
            for child in &reference.dependencies {
                walk(child, ids);
            }
        }

        let mut ids = BTreeSet::new();
        for reference in &self.dependencies {
            walk(reference, &mut ids);
        }
        ids
    }
}

/// Version control information, empty when unknown
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VcsInfo {
    #[serde(rename = "type")]
    pub vcs_type: String,
    pub url: String,
    pub revision: String,
    pub path: String,
}

impl VcsInfo {
    pub fn is_empty(&self) -> bool {
        self.vcs_type.is_empty() && self.url.is_empty() && self.revision.is_empty()
    }
}

/// Location of a downloadable source archive
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RemoteArtifact {
    pub url: String,
}

/// A dependency package discovered for a project
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Package {
    pub id: Identifier,
    /// Always empty, the go tool does not report licenses
    pub declared_licenses: BTreeSet<String>,
    /// Always empty, the go tool does not report authors
    pub authors: BTreeSet<String>,
    pub source_artifact: RemoteArtifact,
    pub vcs: VcsInfo,
}

/// The analyzed Go module itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: Identifier,
    /// Path of the go.mod file relative to the scan root
    pub definition_file_path: PathBuf,
    pub vcs: VcsInfo,
    pub scopes: BTreeSet<Scope>,
}

impl Project {
    /// Look up a scope by name
    pub fn scope(&self, name: &str) -> Option<&Scope> {
        self.scopes.iter().find(|scope| scope.name == name)
    }
}

/// Everything resolved for one go.mod file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectAnalyzerResult {
    pub project: Project,
    pub packages: BTreeSet<Package>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str) -> PackageReference {
        PackageReference::new(Identifier::go(name, "1.0.0"), BTreeSet::new())
    }

    #[test]
    fn test_tree_size_and_depth() {
        let c = leaf("c");
        let b = PackageReference::new(Identifier::go("b", "1.0.0"), BTreeSet::from([c.clone()]));
        let a = PackageReference::new(Identifier::go("a", "1.0.0"), BTreeSet::from([b, leaf("d")]));

        assert_eq!(a.tree_size(), 4);
        assert_eq!(a.depth(), 3);
        assert_eq!(c.depth(), 1);
        assert_eq!(a.linkage, PackageLinkage::ProjectStatic);
    }

    #[test]
    fn test_scope_collect_ids() {
        let b = PackageReference::new(Identifier::go("b", "1.0.0"), BTreeSet::from([leaf("c")]));
        let scope = Scope::new(MAIN_SCOPE, BTreeSet::from([b, leaf("c")]));

        let ids: Vec<String> = scope.collect_ids().into_iter().map(|id| id.name).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn test_linkage_serialization() {
        let json = serde_json::to_string(&PackageLinkage::ProjectStatic).unwrap();
        assert_eq!(json, "\"PROJECT_STATIC\"");
    }
}
