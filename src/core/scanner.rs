//! Scanning a directory tree for Go modules and resolving each of them

use crate::core::analyzer::GoModAnalyzer;
use crate::core::finder::GoModFinder;
use crate::core::go_command::{GoCli, GoCommand};
use crate::error::{handle_error, GoWalkerError, Result};
use crate::models::{analysis::AnalysisResults, config::Settings};
use std::path::PathBuf;
use std::time::Instant;

/// Finds every go.mod below the scan path and resolves its dependencies
pub struct Scanner<G: GoCommand> {
    settings: Settings,
    analyzer: GoModAnalyzer<G>,
}

impl Scanner<GoCli> {
    /// Create a scanner that runs the installed go toolchain
    ///
    /// Fails if `go version` cannot be run, so a missing toolchain is
    /// reported once instead of once per project.
    pub fn with_go_cli(settings: Settings) -> Result<Self> {
        let mut go = GoCli::new(&settings.go_binary)?;
        if let Some(go_proxy) = &settings.go_proxy {
            go = go.with_goproxy(go_proxy.clone());
        }

        let version = go.version()?;
        tracing::info!("Using go {}", version);

        Ok(Self::new(settings, go))
    }
}

impl<G: GoCommand> Scanner<G> {
    pub fn new(settings: Settings, go: G) -> Self {
        let analyzer = GoModAnalyzer::from_settings(go, &settings);
        Self { settings, analyzer }
    }

    /// Analyze all modules below the configured scan path
    pub fn analyze(&self) -> Result<AnalysisResults> {
        self.analyze_with_progress(|_, _, _| {})
    }

    /// Analyze all modules, reporting each project before it is resolved
    ///
    /// A project that fails to resolve is recorded in the results and the
    /// scan moves on, unless the failure is critical.
    pub fn analyze_with_progress<F>(&self, progress: F) -> Result<AnalysisResults>
    where
        F: Fn(usize, usize, &str),
    {
        let start_time = Instant::now();
        let mut results = AnalysisResults::new();

        let scan_root = &self.settings.scan_path;
        if !scan_root.exists() {
            return Err(GoWalkerError::InvalidPath {
                path: scan_root.clone(),
            });
        }

        let mut finder = GoModFinder::from_settings(&self.settings)?;
        let definition_files = finder.find(scan_root)?;
        for (path, err) in finder.take_errors() {
            results.add_error(path, &err);
        }

        tracing::info!(
            "Found {} go.mod files below {}",
            definition_files.len(),
            scan_root.display()
        );

        let total = definition_files.len();
        for (index, definition_file) in definition_files.iter().enumerate() {
            progress(index, total, &format!("Resolving {}", display_path(definition_file, scan_root)));

            match self.analyzer.resolve_dependencies(definition_file, scan_root) {
                Ok(result) => results.add_project(result),
                Err(err) => {
                    results.add_error(definition_file.clone(), &err);
                    if let Some(critical) = handle_error(err) {
                        return Err(critical);
                    }
                }
            }
        }
        progress(total, total, "Analysis complete");

        results.set_scan_duration(start_time.elapsed());
        Ok(results)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

fn display_path(path: &std::path::Path, root: &std::path::Path) -> String {
    path.strip_prefix(root)
        .map(PathBuf::from)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::Path;

    struct BrokenGo;

    impl GoCommand for BrokenGo {
        fn run(&self, args: &[&str], _working_dir: &Path) -> Result<String> {
            Err(GoWalkerError::CommandFailed {
                command: format!("go {}", args.join(" ")),
                status: Some(1),
                stderr: "go: cannot find main module".to_string(),
            })
        }
    }

    #[test]
    fn test_failures_are_collected_per_project() {
        let dir = tempfile::TempDir::new().unwrap();
        for name in ["a", "b"] {
            std::fs::create_dir(dir.path().join(name)).unwrap();
            std::fs::write(dir.path().join(name).join("go.mod"), "module x\n").unwrap();
        }

        let settings = Settings {
            scan_path: dir.path().to_path_buf(),
            ..Settings::default()
        };
        let reported = RefCell::new(Vec::new());
        let results = Scanner::new(settings, BrokenGo)
            .analyze_with_progress(|current, total, message| {
                reported.borrow_mut().push((current, total, message.to_string()))
            })
            .unwrap();

        assert!(results.projects.is_empty());
        assert_eq!(results.errors.len(), 2);
        assert_eq!(results.summary.errors_encountered, 2);
        assert!(!results.has_critical_errors());

        let reported = reported.into_inner();
        assert_eq!(reported.len(), 3);
        assert_eq!(reported[0], (0, 2, "Resolving a/go.mod".to_string()));
        assert_eq!(reported[2].0, 2);
    }

    #[test]
    fn test_missing_go_binary_stops_the_scan() {
        let settings = Settings {
            go_binary: PathBuf::from("/definitely/not/go"),
            ..Settings::default()
        };
        let err = Scanner::with_go_cli(settings).err().unwrap();
        assert!(matches!(err, GoWalkerError::CommandSpawn { .. }));
    }

    #[test]
    fn test_missing_scan_path() {
        let settings = Settings {
            scan_path: PathBuf::from("/definitely/not/here"),
            ..Settings::default()
        };
        let err = Scanner::new(settings, BrokenGo).analyze().unwrap_err();
        assert!(matches!(err, GoWalkerError::InvalidPath { .. }));
    }
}
