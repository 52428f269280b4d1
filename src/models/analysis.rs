//! Analysis result structures

use super::package::{ProjectAnalyzerResult, MAIN_SCOPE};
use crate::error::{ErrorSeverity, GoWalkerError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;

/// Collection of all analysis results for one scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResults {
    pub projects: Vec<ProjectAnalyzerResult>,
    pub summary: AnalysisSummary,
    pub errors: Vec<AnalysisError>,
}

impl AnalysisResults {
    /// Create a new empty AnalysisResults instance
    pub fn new() -> Self {
        Self {
            projects: Vec::new(),
            summary: AnalysisSummary::default(),
            errors: Vec::new(),
        }
    }

    /// Add a resolved project to the results
    pub fn add_project(&mut self, result: ProjectAnalyzerResult) {
        self.summary.total_projects += 1;
        self.summary.total_packages += result.packages.len();
        if let Some(scope) = result.project.scope(MAIN_SCOPE) {
            self.summary.main_scope_packages += scope.collect_ids().len();
        }
        self.projects.push(result);
    }

    /// Record a project that failed to resolve
    pub fn add_error(&mut self, path: PathBuf, error: &GoWalkerError) {
        let severity = error.severity();

        self.summary.errors_encountered += 1;
        match severity {
            ErrorSeverity::Warning => self.summary.warnings_count += 1,
            ErrorSeverity::Critical => self.summary.critical_errors_count += 1,
            ErrorSeverity::Error => {}
        }

        self.errors.push(AnalysisError {
            path,
            error: error.user_message(),
            severity,
        });
    }

    /// Set the scan duration in the summary
    pub fn set_scan_duration(&mut self, duration: Duration) {
        self.summary.scan_duration = duration;
    }

    /// Distinct packages over all projects
    pub fn unique_package_count(&self) -> usize {
        self.projects
            .iter()
            .flat_map(|result| result.packages.iter().map(|package| &package.id))
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Check if there were any critical errors
    pub fn has_critical_errors(&self) -> bool {
        self.errors.iter().any(|e| e.severity == ErrorSeverity::Critical)
    }

    /// Number of recorded failures above warning level
    pub fn failed_count(&self) -> usize {
        self.errors
            .iter()
            .filter(|e| e.severity != ErrorSeverity::Warning)
            .count()
    }
}

impl Default for AnalysisResults {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary statistics from analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_projects: usize,
    /// Sum of package counts over all projects
    pub total_packages: usize,
    /// Sum of distinct modules in the "main" scope over all projects
    pub main_scope_packages: usize,
    pub scan_duration: Duration,
    pub errors_encountered: usize,
    pub warnings_count: usize,
    pub critical_errors_count: usize,
    pub analysis_date: chrono::DateTime<chrono::Utc>,
}

impl Default for AnalysisSummary {
    fn default() -> Self {
        Self {
            total_projects: 0,
            total_packages: 0,
            main_scope_packages: 0,
            scan_duration: Duration::from_secs(0),
            errors_encountered: 0,
            warnings_count: 0,
            critical_errors_count: 0,
            analysis_date: chrono::Utc::now(),
        }
    }
}

/// A project that could not be analyzed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisError {
    pub path: PathBuf,
    pub error: String,
    pub severity: ErrorSeverity,
}
