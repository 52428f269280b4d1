//! Command-line argument parsing

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// gowalker - Go module dependency analyzer
#[derive(Parser, Debug)]
#[command(name = "gowalker")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Resolve the dependency trees of Go modules")]
#[command(long_about = "gowalker finds go.mod files below a directory and uses the go tool to resolve the \
complete module dependency graph of each of them. Modules that are only needed by tests of dependencies are \
pruned, dependency cycles are broken, and the result is reported as a dependency tree per scope: 'main' holds \
the modules that take part in the build, 'vendor' everything 'go mod vendor' would fetch.")]
#[command(after_help = "EXAMPLES:

Basic Usage:
    # Analyze all modules below the current directory
    gowalker

    # Analyze a specific directory
    gowalker --path ./my-service

    # Skip directories matching a pattern (can be repeated)
    gowalker --exclude '**/testdata' --exclude '**/examples'

    # Limit directory traversal depth
    gowalker --max-depth 2

Output Options:
    # Output in JSON format
    gowalker --output json

    # One CSV row per package
    gowalker --output csv --output-file packages.csv

    # Only report the 'main' scope
    gowalker --no-vendor-scope

Go Toolchain:
    # Use a specific go binary
    gowalker --go-binary /usr/local/go1.21/bin/go

    # Use a corporate module proxy
    gowalker --go-proxy https://goproxy.example.com,direct

    # Query 'go mod why' with fewer modules per invocation
    gowalker --why-chunk-size 16

Configuration:
    # Use a specific configuration file
    gowalker --config ./gowalker.toml

    # Create a default configuration file
    gowalker --init

Verbosity:
    # Only print the results
    gowalker --quiet

    # Show every go invocation
    gowalker --verbose
")]
pub struct Args {
    /// Target directory to scan
    #[arg(short, long, value_name = "PATH", help = "Directory to scan for go.mod files (defaults to current directory if not specified)")]
    pub path: Option<PathBuf>,

    /// Exclude directories matching these glob patterns
    #[arg(short, long, value_name = "PATTERN", help = "Glob patterns for directories to exclude (can be specified multiple times)")]
    pub exclude: Vec<String>,

    /// Maximum depth for directory traversal
    #[arg(long, value_name = "DEPTH", help = "Maximum directory depth to search for go.mod files")]
    pub max_depth: Option<usize>,

    /// Output format (text, json, csv)
    #[arg(short, long, value_enum, help = "Output format for results: 'text' for dependency trees, 'json' for machine processing, 'csv' for one row per package")]
    pub output: Option<OutputFormat>,

    /// Output file path (stdout if not specified)
    #[arg(long, value_name = "FILE", help = "File to write output to (uses stdout if not specified)")]
    pub output_file: Option<PathBuf>,

    /// Suppress non-essential output
    #[arg(short, long, help = "Suppress non-essential output (only show results, no progress or summary information)")]
    pub quiet: bool,

    /// Show debug logging
    #[arg(short, long, help = "Show debug logging including every go command that is run")]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", help = "Path to configuration file (defaults to .gowalker.toml in the current directory, home directory or config directory)")]
    pub config: Option<PathBuf>,

    /// go executable
    #[arg(long, value_name = "BINARY", help = "Name or path of the go executable (default: go)")]
    pub go_binary: Option<PathBuf>,

    /// Modules per 'go mod why' query
    #[arg(long, value_name = "SIZE", help = "Maximum number of modules passed to a single 'go mod why' invocation (default: 32)")]
    pub why_chunk_size: Option<usize>,

    /// Module proxy override
    #[arg(long, value_name = "URL", help = "GOPROXY value used for the go tool and for source artifact URLs (defaults to the GOPROXY environment variable)")]
    pub go_proxy: Option<String>,

    /// Only report the main scope
    #[arg(long, help = "Do not report the 'vendor' scope")]
    pub no_vendor_scope: bool,

    /// Disable colored output
    #[arg(long, help = "Disable colored output (useful for terminals that don't support ANSI colors or for piping output)")]
    pub no_colors: bool,

    /// Disable progress spinners
    #[arg(long, help = "Disable progress spinners (useful for CI environments or when redirecting output)")]
    pub no_progress: bool,

    /// Initialize a default configuration file
    #[arg(long, help = "Create a default configuration file (.gowalker.toml) in the current directory")]
    pub init: bool,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Dependency trees for humans
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// CSV output, one row per package
    Csv,
}

impl From<OutputFormat> for crate::models::config::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => Self::Text,
            OutputFormat::Json => Self::Json,
            OutputFormat::Csv => Self::Csv,
        }
    }
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_go_options() {
        let args = Args::parse_from([
            "gowalker",
            "--path",
            "./svc",
            "--go-binary",
            "/opt/go/bin/go",
            "--why-chunk-size",
            "8",
            "--go-proxy",
            "https://goproxy.example.com",
            "--no-vendor-scope",
            "-o",
            "json",
        ]);

        assert_eq!(args.path, Some(PathBuf::from("./svc")));
        assert_eq!(args.go_binary, Some(PathBuf::from("/opt/go/bin/go")));
        assert_eq!(args.why_chunk_size, Some(8));
        assert_eq!(args.go_proxy.as_deref(), Some("https://goproxy.example.com"));
        assert!(args.no_vendor_scope);
        assert_eq!(args.output, Some(OutputFormat::Json));
    }

    #[test]
    fn test_defaults_leave_settings_unset() {
        let args = Args::parse_from(["gowalker"]);
        assert!(args.path.is_none());
        assert!(args.output.is_none());
        assert!(args.exclude.is_empty());
        assert!(!args.init);
    }
}
