//! Command implementations

use super::Args;
use crate::config::{self, cli::CliArgs, file::DEFAULT_CONFIG_FILE, parser};
use crate::core::Scanner;
use crate::error::{ErrorSeverity, GoWalkerError, Result};
use crate::models::analysis::AnalysisResults;
use crate::models::config::Settings;
use crate::output::{create_formatter, create_progress_callback, create_writer, ProgressReporter};
use crate::{NAME, VERSION};
use std::path::{Path, PathBuf};

/// Available commands
#[derive(Debug)]
pub enum Command {
    /// Resolve the dependencies of every Go module below a directory
    Analyze(Args),
    /// Write a default configuration file to the current directory
    Init,
}

impl Command {
    /// Create a command from parsed arguments
    pub fn from_args(args: Args) -> Self {
        if args.init {
            return Command::Init;
        }

        Command::Analyze(args)
    }

    /// Execute the command
    pub fn execute(&self) -> Result<()> {
        self.validate()?;

        match self {
            Command::Analyze(args) => {
                let settings = config::load_config(CliArgs::from(args))?;
                run_analysis(&settings)
            }
            Command::Init => init_config(&PathBuf::from(DEFAULT_CONFIG_FILE)),
        }
    }

    /// Validate the command arguments
    pub fn validate(&self) -> Result<()> {
        match self {
            Command::Analyze(args) => {
                if let Some(path) = &args.path {
                    if !path.exists() {
                        return Err(GoWalkerError::InvalidPath { path: path.clone() });
                    }
                }

                if let Some(config_path) = &args.config {
                    if !config_path.exists() {
                        return Err(GoWalkerError::ConfigNotFound {
                            path: config_path.clone(),
                        });
                    }
                }

                if args.quiet && args.verbose {
                    return Err(GoWalkerError::config_error("--quiet and --verbose cannot be combined"));
                }

                Ok(())
            }
            Command::Init => Ok(()),
        }
    }

    /// Run the command and map the outcome to a process exit code
    pub fn run(&self) -> i32 {
        match self.execute() {
            Ok(()) => 0,
            Err(err) => {
                eprintln!("{}: {}", err.severity(), err.user_message());
                exit_code(err.severity())
            }
        }
    }
}

fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Warning => 0,
        ErrorSeverity::Error => 1,
        ErrorSeverity::Critical => 2,
    }
}

fn run_analysis(settings: &Settings) -> Result<()> {
    if !settings.quiet {
        eprintln!("{} v{} - Go module dependency resolver", NAME, VERSION);
        eprintln!("Scanning path: {}", settings.scan_path.display());
        if !settings.exclude_patterns.is_empty() {
            eprintln!("Excluding: {}", settings.exclude_patterns.join(", "));
        }
    }
    tracing::debug!("Settings: {:?}", settings);

    let scanner = Scanner::with_go_cli(settings.clone())?;

    let reporter = ProgressReporter::new(settings.show_progress && !settings.quiet, settings.verbose);
    reporter.start(&format!("Scanning {}", settings.scan_path.display()));
    let outcome = scanner.analyze_with_progress(create_progress_callback(&reporter));
    match &outcome {
        Ok(results) => reporter.finish(&format!("Resolved {} project(s)", results.summary.total_projects)),
        Err(_) => reporter.clear(),
    }
    let results = outcome?;

    let formatter = create_formatter(
        &settings.output_format,
        settings.use_colors && settings.output_file.is_none(),
        settings.verbose,
        settings.quiet,
    );
    let output = formatter.format(&results)?;
    create_writer(settings.output_file.as_ref()).write(&output)?;

    if let Some(output_file) = &settings.output_file {
        if !settings.quiet {
            eprintln!("Results written to {}", output_file.display());
        }
    }

    report_errors(&results, settings.quiet);

    let failed = results.failed_count();
    if failed > 0 {
        return Err(GoWalkerError::ProjectsFailed {
            failed,
            total: failed + results.summary.total_projects,
            critical: results.has_critical_errors(),
        });
    }

    Ok(())
}

fn report_errors(results: &AnalysisResults, quiet: bool) {
    if quiet || results.errors.is_empty() {
        return;
    }

    eprintln!(
        "{} of {} project(s) could not be resolved",
        results.errors.len(),
        results.errors.len() + results.summary.total_projects
    );
    for error in &results.errors {
        eprintln!("  {}: {}", error.path.display(), error.error);
    }
}

fn init_config(config_path: &Path) -> Result<()> {
    if config_path.exists() {
        println!("Configuration file already exists at: {}", config_path.display());
        println!("To overwrite it, delete the file first and run this command again.");
        return Ok(());
    }

    parser::create_default_config(config_path)?;

    println!("Created default configuration file at: {}", config_path.display());
    println!("\nExample configuration options:");
    println!("  - scan_path: Directory to scan for go.mod files");
    println!("  - exclude_patterns: Patterns for directories to exclude");
    println!("  - go_binary: Go executable used to resolve modules");
    println!("  - why_chunk_size: Modules per 'go mod why' invocation");
    println!("  - include_vendor_scope: Whether to emit the vendor scope");

    Ok(())
}
