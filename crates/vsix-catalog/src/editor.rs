//! External editor command boundary
//!
//! Listing installed extensions and installing a package both go
//! through the editor's own CLI. The trait keeps that boundary
//! substitutable so sources and the installer can be tested without a
//! real editor on PATH.

use std::io;
use std::path::Path;
use std::process::Command;

/// Captured result of one editor CLI invocation
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Whether the process exited with status zero
    pub success: bool,
    /// Captured stdout, lossily decoded
    pub stdout: String,
}

/// Interface to the editor's command-line surface
pub trait EditorCli {
    /// Run `--list-extensions --show-versions` and capture its output
    fn list_installed(&self) -> io::Result<CommandOutput>;

    /// Run `--install-extension <package>` for one downloaded file
    fn install(&self, package: &Path) -> io::Result<CommandOutput>;
}

/// Editor CLI backed by a real subprocess, `code` by default
#[derive(Debug, Clone)]
pub struct CodeCli {
    program: String,
}

impl CodeCli {
    /// Create a wrapper around the given editor executable
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, args: &[&str]) -> io::Result<CommandOutput> {
        let output = Command::new(&self.program).args(args).output()?;
        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        })
    }
}

impl Default for CodeCli {
    fn default() -> Self {
        Self::new("code")
    }
}

impl EditorCli for CodeCli {
    fn list_installed(&self) -> io::Result<CommandOutput> {
        self.run(&["--list-extensions", "--show-versions"])
    }

    fn install(&self, package: &Path) -> io::Result<CommandOutput> {
        let path = package.to_string_lossy();
        self.run(&["--install-extension", path.as_ref()])
    }
}
