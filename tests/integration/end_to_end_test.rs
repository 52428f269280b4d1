//! End-to-end tests for gowalker
//!
//! A scripted go tool stands in for the real toolchain so that whole scans
//! can run against temporary directory trees.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;
use gowalker::{
    core::{GoCommand, Scanner},
    error::{GoWalkerError, Result},
    models::{
        config::Settings,
        identifier::Identifier,
        package::{PackageReference, MAIN_SCOPE, VENDOR_SCOPE},
    },
};

/// Canned go output for one project directory
#[derive(Clone, Default)]
struct Script {
    modules: String,
    graph: String,
    build: String,
    used: BTreeSet<String>,
}

impl Script {
    fn new(modules: &str, graph: &str, build: &str, used: &[&str]) -> Self {
        Self {
            modules: modules.to_string(),
            graph: graph.to_string(),
            build: build.to_string(),
            used: used.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Go tool replaying scripts keyed by the name of the working directory
#[derive(Default)]
struct ScriptedGo {
    scripts: HashMap<String, Script>,
}

impl ScriptedGo {
    fn with_project(mut self, dir_name: &str, script: Script) -> Self {
        self.scripts.insert(dir_name.to_string(), script);
        self
    }
}

impl GoCommand for ScriptedGo {
    fn run(&self, args: &[&str], working_dir: &Path) -> Result<String> {
        let command = args.join(" ");

        // The go tool must never see a vendor directory
        if working_dir.join("vendor").exists() {
            return Err(GoWalkerError::analysis_error("vendor directory was not moved aside"));
        }

        let dir_name = working_dir
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        let script = self
            .scripts
            .get(&dir_name)
            .ok_or_else(|| GoWalkerError::analysis_error(format!("no script for {}", dir_name)))?;

        match args {
            ["list", "-m", "-json", "all"] => Ok(script.modules.clone()),
            ["mod", "graph"] => Ok(script.graph.clone()),
            ["list", "-deps", "-json=Module", "./..."] => Ok(script.build.clone()),
            ["mod", "why", "-m", "-vendor", names @ ..] => {
                let mut output = String::new();
                for name in names {
                    output.push_str(&format!("# {}\n", name));
                    if script.used.contains(*name) {
                        output.push_str("A\n\n");
                    } else {
                        output.push_str(&format!("(main module does not need to vendor module {})\n\n", name));
                    }
                }
                Ok(output)
            }
            _ => Err(GoWalkerError::analysis_error(format!("unexpected command: go {}", command))),
        }
    }
}

/// Main module A requires B directly and C indirectly, B requires C
fn abc_script() -> Script {
    Script::new(
        r#"{"Path": "A", "Main": true}
{"Path": "B", "Version": "v1"}
{"Path": "C", "Version": "v1", "Indirect": true}
"#,
        "A@ B@v1\nA@ C@v1\nB@v1 C@v1\n",
        r#"{"ImportPath": "A", "Module": {"Path": "A"}}
{"ImportPath": "B/pkg", "Module": {"Path": "B", "Version": "v1"}}
{"ImportPath": "C/pkg", "Module": {"Path": "C", "Version": "v1"}}
{"ImportPath": "strings"}
"#,
        &["A", "B", "C"],
    )
}

fn create_project(root: &Path, dir_name: &str, module: &str) -> PathBuf {
    let dir = root.join(dir_name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("go.mod"), format!("module {}\n\ngo 1.21\n", module)).unwrap();
    dir
}

fn settings_for(root: &Path) -> Settings {
    Settings {
        scan_path: root.to_path_buf(),
        show_progress: false,
        go_proxy: Some("https://proxy.example.com".to_string()),
        ..Settings::default()
    }
}

fn reference(name: &str, children: Vec<PackageReference>) -> PackageReference {
    PackageReference::new(Identifier::go(name, "1"), children.into_iter().collect())
}

#[test]
fn test_indirect_edge_of_main_module_is_dropped() {
    let root = tempdir().unwrap();
    create_project(root.path(), "abc", "A");

    let go = ScriptedGo::default().with_project("abc", abc_script());
    let scanner = Scanner::new(settings_for(root.path()), go);
    let results = scanner.analyze().unwrap();

    assert!(results.errors.is_empty());
    assert_eq!(results.projects.len(), 1);

    let result = &results.projects[0];
    assert_eq!(result.project.id, Identifier::go("A", ""));
    assert_eq!(result.project.definition_file_path, PathBuf::from("abc/go.mod"));

    // A -> C is left out, so C only shows up below B
    let expected = BTreeSet::from([reference("B", vec![reference("C", vec![])])]);
    let main = result.project.scope(MAIN_SCOPE).unwrap();
    assert_eq!(main.dependencies, expected);

    let vendor = result.project.scope(VENDOR_SCOPE).unwrap();
    assert_eq!(vendor.dependencies, expected);

    let packages: Vec<(&str, &str)> = result
        .packages
        .iter()
        .map(|package| (package.id.name.as_str(), package.source_artifact.url.as_str()))
        .collect();
    assert_eq!(
        packages,
        vec![
            ("B", "https://proxy.example.com/!b/@v/v1.zip"),
            ("C", "https://proxy.example.com/!c/@v/v1.zip"),
        ]
    );

    assert_eq!(results.summary.total_projects, 1);
    assert_eq!(results.summary.total_packages, 2);
    assert_eq!(results.summary.main_scope_packages, 2);
}

#[test]
fn test_toolchain_requirements_are_ignored() {
    let root = tempdir().unwrap();
    create_project(root.path(), "abc", "A");

    let mut script = abc_script();
    script.graph = format!("A@ go@1.21\nA@ toolchain@go1.21.3\n{}B@v1 go@1.20\n", script.graph);

    let go = ScriptedGo::default().with_project("abc", script);
    let results = Scanner::new(settings_for(root.path()), go).analyze().unwrap();

    assert!(results.errors.is_empty());
    let ids = results.projects[0].project.scope(VENDOR_SCOPE).unwrap().collect_ids();
    let names: Vec<String> = ids.into_iter().map(|id| id.name).collect();
    assert_eq!(names, vec!["B", "C"]);
}

#[test]
fn test_test_only_dependency_stays_out_of_main_scope() {
    let root = tempdir().unwrap();
    create_project(root.path(), "svc", "example.com/svc");

    let script = Script::new(
        r#"{"Path": "example.com/svc", "Main": true}
{"Path": "github.com/pkg/errors", "Version": "v0.9.1"}
{"Path": "github.com/stretchr/testify", "Version": "v1.8.4"}
{"Path": "github.com/davecgh/go-spew", "Version": "v1.1.1", "Indirect": true}
{"Path": "golang.org/x/unused", "Version": "v0.1.0", "Indirect": true}
"#,
        "\
example.com/svc github.com/pkg/errors@v0.9.1
example.com/svc github.com/stretchr/testify@v1.8.4
github.com/stretchr/testify@v1.8.4 github.com/davecgh/go-spew@v1.1.1
github.com/stretchr/testify@v1.8.4 golang.org/x/unused@v0.1.0
",
        r#"{"ImportPath": "example.com/svc", "Module": {"Path": "example.com/svc"}}
{"ImportPath": "github.com/pkg/errors", "Module": {"Path": "github.com/pkg/errors", "Version": "v0.9.1"}}
"#,
        &[
            "github.com/pkg/errors",
            "github.com/stretchr/testify",
            "github.com/davecgh/go-spew",
        ],
    );

    let go = ScriptedGo::default().with_project("svc", script);
    let results = Scanner::new(settings_for(root.path()), go).analyze().unwrap();
    let project = &results.projects[0].project;

    let main: Vec<String> = project
        .scope(MAIN_SCOPE)
        .unwrap()
        .collect_ids()
        .into_iter()
        .map(|id| id.name)
        .collect();
    assert_eq!(main, vec!["github.com/pkg/errors"]);

    let vendor: Vec<String> = project
        .scope(VENDOR_SCOPE)
        .unwrap()
        .collect_ids()
        .into_iter()
        .map(|id| id.name)
        .collect();
    assert_eq!(
        vendor,
        vec!["github.com/davecgh/go-spew", "github.com/pkg/errors", "github.com/stretchr/testify"]
    );

    // Modules the vendor query rejects are not reported at all
    assert!(results.projects[0]
        .packages
        .iter()
        .all(|package| package.id.name != "golang.org/x/unused"));
}

#[test]
fn test_vendor_directory_is_moved_aside_and_restored() {
    let root = tempdir().unwrap();
    let project_dir = create_project(root.path(), "abc", "A");

    // A vendored module with its own go.mod must not be picked up as a project
    let vendored = project_dir.join("vendor").join("B");
    fs::create_dir_all(&vendored).unwrap();
    fs::write(vendored.join("go.mod"), "module B\n").unwrap();
    fs::write(project_dir.join("vendor").join("modules.txt"), "# B v1\n").unwrap();

    let go = ScriptedGo::default().with_project("abc", abc_script());
    let scanner = Scanner::new(settings_for(root.path()), go);
    let results = scanner.analyze().unwrap();

    assert!(results.errors.is_empty());
    assert_eq!(results.projects.len(), 1);
    assert_eq!(
        fs::read_to_string(project_dir.join("vendor").join("modules.txt")).unwrap(),
        "# B v1\n"
    );
    assert!(vendored.join("go.mod").exists());
}

#[test]
fn test_failing_project_does_not_stop_the_scan() {
    let root = tempdir().unwrap();
    create_project(root.path(), "abc", "A");
    create_project(root.path(), "broken", "example.com/broken");

    let broken = Script {
        modules: r#"{"Path": "example.com/broken", "Version": "v1.0.0"}"#.to_string(),
        ..Script::default()
    };

    let go = ScriptedGo::default()
        .with_project("abc", abc_script())
        .with_project("broken", broken);
    let results = Scanner::new(settings_for(root.path()), go).analyze().unwrap();

    assert_eq!(results.projects.len(), 1);
    assert_eq!(results.errors.len(), 1);
    assert_eq!(results.errors[0].path, root.path().join("broken").join("go.mod"));
    assert!(!results.has_critical_errors());
    assert_eq!(results.summary.errors_encountered, 1);
}

#[test]
fn test_disabled_vendor_scope() {
    let root = tempdir().unwrap();
    create_project(root.path(), "abc", "A");

    let settings = Settings {
        include_vendor_scope: false,
        ..settings_for(root.path())
    };
    let go = ScriptedGo::default().with_project("abc", abc_script());
    let results = Scanner::new(settings, go).analyze().unwrap();

    let project = &results.projects[0].project;
    assert!(project.scope(MAIN_SCOPE).is_some());
    assert!(project.scope(VENDOR_SCOPE).is_none());
}
