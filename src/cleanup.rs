//! Dependency cleanup after the manifest is rewritten
//!
//! This module provides:
//! - The [`CleanupRunner`] seam the orchestrator calls
//! - Execution of `go mod tidy` with inherited output streams

use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// Command that tidies a Go module after its requirements change
pub const TIDY_COMMAND: &[&str] = &["go", "mod", "tidy"];

/// Result of running the cleanup command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupResult {
    /// The command that was executed
    pub command: String,
    /// Whether the command succeeded
    pub success: bool,
    /// Failure detail (exit status or spawn error)
    pub error: Option<String>,
}

impl CleanupResult {
    /// Create a successful cleanup result
    pub fn success(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            success: true,
            error: None,
        }
    }

    /// Create a failed cleanup result
    pub fn failure(command: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Trait for running the cleanup command
pub trait CleanupRunner {
    /// Human-readable command line
    fn command_line(&self) -> String;

    /// Run the cleanup in `working_dir`, waiting for it to finish
    fn run_cleanup(&self, working_dir: &Path) -> CleanupResult;
}

/// Cleanup runner that executes a real command
#[derive(Debug, Clone)]
pub struct SystemCleanup {
    command: Vec<String>,
}

impl SystemCleanup {
    /// Create a runner for `go mod tidy`
    pub fn new() -> Self {
        Self::with_command(TIDY_COMMAND.iter().map(|s| s.to_string()).collect())
    }

    /// Create a runner for an arbitrary command
    pub fn with_command(command: Vec<String>) -> Self {
        Self { command }
    }
}

impl Default for SystemCleanup {
    fn default() -> Self {
        Self::new()
    }
}

impl CleanupRunner for SystemCleanup {
    fn command_line(&self) -> String {
        self.command.join(" ")
    }

    fn run_cleanup(&self, working_dir: &Path) -> CleanupResult {
        let command_str = self.command_line();
        let Some((program, args)) = self.command.split_first() else {
            return CleanupResult::failure(command_str, "empty command");
        };

        debug!(command = %command_str, dir = %working_dir.display(), "running cleanup");
        let status = Command::new(program)
            .args(args)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status();

        match status {
            Ok(status) if status.success() => CleanupResult::success(command_str),
            Ok(status) => CleanupResult::failure(command_str, status.to_string()),
            Err(e) => CleanupResult::failure(command_str, format!("failed to execute command: {}", e)),
        }
    }
}
