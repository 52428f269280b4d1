//! Output formatting functionality
//!
//! This module renders analysis results as dependency trees, JSON or CSV.

use crate::error::{ErrorSeverity, GoWalkerError, Result, ResultExt};
use crate::models::analysis::{AnalysisResults, AnalysisSummary};
use crate::models::identifier::Identifier;
use crate::models::package::{PackageReference, ProjectAnalyzerResult, Scope};
use ansi_term::Colour::{Blue, Cyan, Green, Red, Yellow};
use ansi_term::Style;
use std::collections::BTreeSet;
use std::time::Duration;

/// Format the summary block shared by all text output
pub fn format_summary_text(summary: &AnalysisSummary, use_colors: bool) -> String {
    let mut output = String::new();

    if use_colors {
        output.push_str(&format!("{}\n", Blue.bold().paint("Summary")));
    } else {
        output.push_str("Summary\n");
    }

    output.push_str(&format!("Projects: {}\n", summary.total_projects));
    output.push_str(&format!("Packages: {}\n", summary.total_packages));
    output.push_str(&format!("Packages used by builds: {}\n", summary.main_scope_packages));
    output.push_str(&format!("Scan duration: {}\n", format_duration(summary.scan_duration)));

    if summary.errors_encountered > 0 {
        let line = format!("Errors encountered: {}", summary.errors_encountered);
        if use_colors {
            output.push_str(&format!("{}\n", Yellow.bold().paint(line)));
        } else {
            output.push_str(&format!("{}\n", line));
        }
        output.push_str(&format!("  Warnings: {}\n", summary.warnings_count));
        output.push_str(&format!("  Critical errors: {}\n", summary.critical_errors_count));
    }

    output
}

/// Format one project with its scopes
///
/// Only direct dependencies are listed unless `verbose` is set, in which case
/// every scope is rendered as a full tree.
pub fn format_project_text(result: &ProjectAnalyzerResult, use_colors: bool, verbose: bool) -> String {
    let mut output = String::new();
    let project = &result.project;

    let name = display_name(&project.id);
    if use_colors {
        output.push_str(&format!(
            "{} {}\n",
            Blue.bold().paint(name),
            Style::new().dimmed().paint(project.definition_file_path.display().to_string())
        ));
    } else {
        output.push_str(&format!("{} {}\n", name, project.definition_file_path.display()));
    }
    output.push_str(&format!("  Packages: {}\n", result.packages.len()));

    for scope in &project.scopes {
        output.push_str(&format_scope_text(scope, use_colors, verbose));
    }

    output.push('\n');
    output
}

fn format_scope_text(scope: &Scope, use_colors: bool, verbose: bool) -> String {
    let mut output = String::new();
    let module_count = scope.collect_ids().len();

    let header = format!("{} ({} modules, {} direct)", scope.name, module_count, scope.dependencies.len());
    if use_colors {
        output.push_str(&format!("  {}\n", Cyan.paint(header)));
    } else {
        output.push_str(&format!("  {}\n", header));
    }

    if verbose {
        write_tree(&mut output, &scope.dependencies, "    ", use_colors);
    } else {
        for reference in &scope.dependencies {
            let transitive = reference.tree_size() - 1;
            if transitive > 0 {
                output.push_str(&format!(
                    "    {} (+{} transitive)\n",
                    reference_label(&reference.id, use_colors),
                    transitive
                ));
            } else {
                output.push_str(&format!("    {}\n", reference_label(&reference.id, use_colors)));
            }
        }
    }

    output
}

fn write_tree(output: &mut String, references: &BTreeSet<PackageReference>, prefix: &str, use_colors: bool) {
    let count = references.len();
    for (index, reference) in references.iter().enumerate() {
        let last = index + 1 == count;
        let (branch, indent) = if last { ("└── ", "    ") } else { ("├── ", "│   ") };

        output.push_str(&format!("{}{}{}\n", prefix, branch, reference_label(&reference.id, use_colors)));
        write_tree(output, &reference.dependencies, &format!("{}{}", prefix, indent), use_colors);
    }
}

fn reference_label(id: &Identifier, use_colors: bool) -> String {
    if use_colors {
        format!("{} {}", Green.paint(id.name.as_str()), Style::new().dimmed().paint(id.version.as_str()))
    } else {
        format!("{} {}", id.name, id.version)
    }
}

fn display_name(id: &Identifier) -> String {
    if id.version.is_empty() {
        id.name.clone()
    } else {
        format!("{} {}", id.name, id.version)
    }
}

/// Format analysis results as text
pub fn format_results_text(results: &AnalysisResults, use_colors: bool, verbose: bool) -> String {
    let mut output = String::new();

    if use_colors {
        output.push_str(&format!("{}\n\n", Blue.bold().paint("Go Module Dependency Analysis")));
    } else {
        output.push_str("Go Module Dependency Analysis\n\n");
    }

    for result in &results.projects {
        output.push_str(&format_project_text(result, use_colors, verbose));
    }

    if !results.errors.is_empty() {
        output.push_str("Errors:\n");
        for error in &results.errors {
            output.push_str(&format!(
                "  [{}] {}: {}\n",
                severity_label(error.severity, use_colors),
                error.path.display(),
                error.error
            ));
        }
        output.push('\n');
    }

    output.push_str(&format_summary_text(&results.summary, use_colors));
    if verbose {
        output.push_str(&format!("Distinct packages: {}\n", results.unique_package_count()));
        output.push_str(&format!(
            "Analysis date: {}\n",
            results.summary.analysis_date.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }

    output
}

fn severity_label(severity: ErrorSeverity, use_colors: bool) -> String {
    match severity {
        ErrorSeverity::Warning if use_colors => Yellow.paint("WARNING").to_string(),
        ErrorSeverity::Error if use_colors => Red.paint("ERROR").to_string(),
        ErrorSeverity::Critical if use_colors => Red.bold().paint("CRITICAL").to_string(),
        ErrorSeverity::Warning => "WARNING".to_string(),
        ErrorSeverity::Error => "ERROR".to_string(),
        ErrorSeverity::Critical => "CRITICAL".to_string(),
    }
}

/// Format a duration for humans
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{}ms", millis)
    } else if millis < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// Format analysis results as JSON
pub fn format_results_json(results: &AnalysisResults, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(results)
    } else {
        serde_json::to_string(results)
    };
    json.map_err(|e| GoWalkerError::JsonSerialize { source: e })
}

/// Format analysis results as CSV, one row per package and project
pub fn format_results_csv(results: &AnalysisResults) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);

    writer.write_record([
        "Project",
        "Definition File",
        "Package",
        "Version",
        "Scopes",
        "Source Artifact",
        "VCS Type",
        "VCS URL",
        "VCS Revision",
    ])?;

    for result in &results.projects {
        let project = &result.project;
        let definition_file = project.definition_file_path.display().to_string();
        let scope_ids: Vec<(&str, BTreeSet<Identifier>)> = project
            .scopes
            .iter()
            .map(|scope| (scope.name.as_str(), scope.collect_ids()))
            .collect();

        for package in &result.packages {
            let scopes: Vec<&str> = scope_ids
                .iter()
                .filter(|(_, ids)| ids.contains(&package.id))
                .map(|(name, _)| *name)
                .collect();

            let scopes = scopes.join(";");

            writer.write_record([
                project.id.name.as_str(),
                definition_file.as_str(),
                package.id.name.as_str(),
                package.id.version.as_str(),
                scopes.as_str(),
                package.source_artifact.url.as_str(),
                package.vcs.vcs_type.as_str(),
                package.vcs.url.as_str(),
                package.vcs.revision.as_str(),
            ])?;
        }
    }

    let bytes = writer
        .into_inner()
        .with_context(|| "Failed to finish CSV output")?;
    String::from_utf8(bytes).map_err(|e| GoWalkerError::CsvSerialize { source: e })
}
