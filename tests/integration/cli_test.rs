use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;
use gowalker::{
    cli::{args::OutputFormat, Args, Command},
    error::GoWalkerError,
    models::config,
};

#[test]
fn test_cli_args_parsing() {
    let args = Args::parse_from(["gowalker"]);
    assert_eq!(args.path, None);
    assert!(args.exclude.is_empty());
    assert_eq!(args.max_depth, None);
    assert_eq!(args.output, None);
    assert_eq!(args.why_chunk_size, None);
    assert!(!args.quiet);
    assert!(!args.no_vendor_scope);

    let args = Args::parse_from([
        "gowalker",
        "--path", "/test/path",
        "--exclude", "**/testdata",
        "--exclude", "**/third_party",
        "--max-depth", "5",
        "--output", "csv",
        "--output-file", "deps.csv",
        "--quiet",
        "--no-colors",
    ]);

    assert_eq!(args.path, Some(PathBuf::from("/test/path")));
    assert_eq!(args.exclude, vec!["**/testdata".to_string(), "**/third_party".to_string()]);
    assert_eq!(args.max_depth, Some(5));
    assert_eq!(args.output, Some(OutputFormat::Csv));
    assert_eq!(args.output_file, Some(PathBuf::from("deps.csv")));
    assert!(args.quiet);
    assert!(args.no_colors);
}

#[test]
fn test_cli_output_formats() {
    for (value, expected) in [
        ("text", config::OutputFormat::Text),
        ("json", config::OutputFormat::Json),
        ("csv", config::OutputFormat::Csv),
    ] {
        let args = Args::parse_from(["gowalker", "--output", value]);
        assert_eq!(args.output.map(config::OutputFormat::from), Some(expected));
    }
}

#[test]
fn test_cli_invalid_output_format() {
    assert!(Args::try_parse_from(["gowalker", "--output", "xml"]).is_err());
    assert!(Args::try_parse_from(["gowalker", "--why-chunk-size", "many"]).is_err());
}

#[test]
fn test_cli_commands() {
    let command = Command::from_args(Args::parse_from(["gowalker", "--init"]));
    assert!(matches!(command, Command::Init));

    let command = Command::from_args(Args::parse_from(["gowalker", "--path", "/definitely/not/here"]));
    assert!(matches!(command.validate(), Err(GoWalkerError::InvalidPath { .. })));
    assert_eq!(command.run(), 1);
}

fn module_dir(root: &Path) -> PathBuf {
    let dir = root.join("svc");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("go.mod"), "module example.com/svc\n\ngo 1.21\n").unwrap();
    dir
}

fn analyze(root: &Path, go_binary: &Path) -> Command {
    let output_file = root.join("report.txt");
    Command::from_args(Args::parse_from([
        "gowalker",
        "--path",
        root.to_str().unwrap(),
        "--go-binary",
        go_binary.to_str().unwrap(),
        "--output-file",
        output_file.to_str().unwrap(),
        "--quiet",
        "--no-progress",
    ]))
}

#[test]
fn test_missing_go_binary_exits_with_error() {
    let root = tempdir().unwrap();
    module_dir(root.path());

    let command = analyze(root.path(), Path::new("/definitely/not/go"));
    assert_eq!(command.run(), 1);
    assert!(!root.path().join("report.txt").exists());
}

#[cfg(unix)]
#[test]
fn test_failing_project_exits_with_error() {
    use std::os::unix::fs::PermissionsExt;

    let root = tempdir().unwrap();
    module_dir(root.path());

    // Reports a version but fails every module query
    let tools = tempdir().unwrap();
    let go = tools.path().join("go");
    fs::write(
        &go,
        "#!/bin/sh\n\
         if [ \"$1\" = version ]; then echo 'go version go1.21.3 linux/amd64'; exit 0; fi\n\
         echo 'go: cannot find main module' >&2\n\
         exit 1\n",
    )
    .unwrap();
    fs::set_permissions(&go, fs::Permissions::from_mode(0o755)).unwrap();

    let command = analyze(root.path(), &go);
    assert_eq!(command.run(), 1);

    let report = fs::read_to_string(root.path().join("report.txt")).unwrap();
    assert_eq!(report, "Projects: 0, Packages: 0, Used by builds: 0\n");
}
