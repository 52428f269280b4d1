//! Invocation of the go executable
//!
//! The resolution pipeline talks to the go tool only through the
//! [`GoCommand`] trait so that it can be driven by recorded output in tests.

use crate::error::{GoWalkerError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Runs go subcommands and returns their standard output
pub trait GoCommand {
    /// Run `go <args>` in `working_dir`
    ///
    /// A non-zero exit status is an error carrying the captured standard error.
    fn run(&self, args: &[&str], working_dir: &Path) -> Result<String>;

    /// Root of the module cache used by this runner, if it has one of its own
    fn gopath(&self) -> Option<&Path> {
        None
    }
}

/// [`GoCommand`] backed by the installed go toolchain
///
/// Every invocation uses a private scratch `GOPATH` so the user's module
/// cache is neither read nor modified. The directory lives as long as this
/// value and must not be shared by concurrent resolutions.
pub struct GoCli {
    binary: PathBuf,
    gopath: TempDir,
    goproxy: Option<String>,
}

impl GoCli {
    /// Create a runner for the given go binary
    pub fn new(binary: impl Into<PathBuf>) -> Result<Self> {
        let gopath = tempfile::Builder::new().prefix("gowalker-gopath").tempdir()?;
        tracing::debug!("Using scratch GOPATH {}", gopath.path().display());

        Ok(Self {
            binary: binary.into(),
            gopath,
            goproxy: None,
        })
    }

    /// Set GOPROXY for all invocations
    pub fn with_goproxy(mut self, goproxy: impl Into<String>) -> Self {
        self.goproxy = Some(goproxy.into());
        self
    }

    /// Query the toolchain version, e.g. `1.21.3` for `go version go1.21.3 linux/amd64`
    pub fn version(&self) -> Result<String> {
        let output = self.run(&["version"], Path::new("."))?;
        parse_go_version(&output).ok_or_else(|| {
            GoWalkerError::analysis_error(format!("Unexpected 'go version' output: {}", output.trim()))
        })
    }

    fn display_command(&self, args: &[&str]) -> String {
        let mut command = self.binary.display().to_string();
        for arg in args {
            command.push(' ');
            command.push_str(arg);
        }
        command
    }
}

impl GoCommand for GoCli {
    fn run(&self, args: &[&str], working_dir: &Path) -> Result<String> {
        let command_line = self.display_command(args);
        tracing::debug!("Running '{}' in {}", command_line, working_dir.display());

        let mut command = Command::new(&self.binary);
        command
            .args(args)
            .current_dir(working_dir)
            .env("GOPATH", self.gopath.path())
            .env("GOWORK", "off")
            .env("GOFLAGS", "-mod=readonly")
            .env("GOTOOLCHAIN", "local");
        if let Some(goproxy) = &self.goproxy {
            command.env("GOPROXY", goproxy);
        }

        let output = command.output().map_err(|source| GoWalkerError::CommandSpawn {
            command: command_line.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(GoWalkerError::CommandFailed {
                command: command_line,
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn gopath(&self) -> Option<&Path> {
        Some(self.gopath.path())
    }
}

/// Extract the version number from `go version` output
pub fn parse_go_version(output: &str) -> Option<String> {
    output
        .split_whitespace()
        .find_map(|token| token.strip_prefix("go").filter(|v| v.starts_with(|c: char| c.is_ascii_digit())))
        .map(str::to_string)
}
