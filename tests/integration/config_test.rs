//! Configuration loading through the public API

use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;
use gowalker::{
    cli::Args,
    config::{self, parse_config_content, CliArgs},
    error::GoWalkerError,
    models::config::OutputFormat,
};

#[test]
fn test_command_line_overrides_config_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("gowalker.toml");
    fs::write(
        &config_path,
        format!(
            r#"
scan_path = {:?}
exclude_patterns = ["**/third_party"]
why_chunk_size = 16
include_vendor_scope = false
output_format = "csv"
"#,
            dir.path().display().to_string()
        ),
    )
    .unwrap();

    let args = Args::parse_from([
        "gowalker",
        "--config",
        config_path.to_str().unwrap(),
        "--why-chunk-size",
        "4",
        "--output",
        "json",
        "--no-progress",
    ]);
    let settings = config::load_config_with_env_prefix(CliArgs::from(&args), "GOWALKER_IT_OVERRIDES").unwrap();

    assert_eq!(settings.scan_path, dir.path());
    assert_eq!(settings.exclude_patterns, vec!["**/third_party".to_string()]);
    assert_eq!(settings.why_chunk_size, 4);
    assert_eq!(settings.output_format, OutputFormat::Json);
    assert!(!settings.include_vendor_scope);
    assert!(!settings.show_progress);
    assert!(settings.use_colors);
}

#[test]
fn test_environment_sits_between_file_and_command_line() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("gowalker.toml");
    fs::write(&config_path, "go_proxy = \"https://file.example.com\"\nmax_depth = 2\n").unwrap();

    let prefix = "GOWALKER_IT_LAYERS";
    std::env::set_var(format!("{}_GO_PROXY", prefix), "https://env.example.com");
    std::env::set_var(format!("{}_GO_BINARY", prefix), "/env/go");
    std::env::set_var(format!("{}_SCAN_PATH", prefix), dir.path());

    let args = Args::parse_from([
        "gowalker",
        "--config",
        config_path.to_str().unwrap(),
        "--go-binary",
        "/cli/go",
    ]);
    let settings = config::load_config_with_env_prefix(CliArgs::from(&args), prefix).unwrap();

    assert_eq!(settings.max_depth, Some(2));
    assert_eq!(settings.go_proxy.as_deref(), Some("https://env.example.com"));
    assert_eq!(settings.go_binary, PathBuf::from("/cli/go"));
    assert_eq!(settings.scan_path, dir.path());
}

#[test]
fn test_missing_config_file_is_reported() {
    let args = Args::parse_from(["gowalker", "--config", "/definitely/not/here.toml"]);
    let result = config::load_config_with_env_prefix(CliArgs::from(&args), "GOWALKER_IT_MISSING");

    assert!(matches!(result, Err(GoWalkerError::ConfigNotFound { .. })));
}

#[test]
fn test_invalid_config_content() {
    let unknown_format = parse_config_content("output_format = \"xml\"", "bad.toml");
    assert!(matches!(unknown_format, Err(GoWalkerError::ConfigParse { .. })));

    let zero_chunk = parse_config_content("why_chunk_size = 0", "bad.toml");
    assert!(matches!(zero_chunk, Err(GoWalkerError::Config { .. })));

    let empty_binary = parse_config_content("go_binary = \"\"", "bad.toml");
    assert!(matches!(empty_binary, Err(GoWalkerError::Config { .. })));
}

#[test]
fn test_generated_default_config_loads() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join(".gowalker.toml");

    config::create_default_config(&config_path).unwrap();
    let partial = config::parse_config_file(&config_path).unwrap();

    assert_eq!(partial.why_chunk_size, Some(32));
    assert_eq!(partial.include_vendor_scope, Some(true));
    assert_eq!(partial.output_format, Some(OutputFormat::Text));
}
