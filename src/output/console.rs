//! Console narration for a run
//!
//! Status lines go to stdout; warnings, errors and their hints go to
//! stderr. Quiet mode keeps only warnings, errors and the final summary.

use crate::domain::VersionChange;
use crate::output::Verbosity;
use colored::Colorize;
use std::path::Path;

const SUCCESS_MARK: &str = "✔";
const WARNING_MARK: &str = "⚠";
const ERROR_MARK: &str = "✖";
const HINT_MARK: &str = "→";

/// Human-readable reporter
#[derive(Debug, Clone, Copy, Default)]
pub struct Console {
    verbosity: Verbosity,
}

impl Console {
    /// Create a console with the given verbosity
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    /// Whether progress spinners should be drawn
    pub fn shows_progress(&self) -> bool {
        self.verbosity != Verbosity::Quiet
    }

    fn status(&self, line: String) {
        if self.verbosity != Verbosity::Quiet {
            println!("{}", line);
        }
    }

    /// Print the run header
    pub fn banner(&self) {
        let title = format!(
            "modbump v{}: JFrog module version updater",
            env!("CARGO_PKG_VERSION")
        );
        let rule = "=".repeat(title.chars().count());
        self.status(title.bold().to_string());
        self.status(rule);
    }

    /// Print the manifest being updated
    pub fn target(&self, manifest: &Path) {
        self.status(target_line(manifest));
        self.status(String::new());
    }

    /// Report a repository already at its latest release
    pub fn up_to_date(&self, repo: &str, version: &str) {
        self.status(up_to_date_line(repo, version));
    }

    /// Report a moved pin
    pub fn updated(&self, repo: &str, from: Option<&str>, to: &str) {
        self.status(updated_line(repo, from, to));
    }

    /// Print a general status line
    pub fn info(&self, message: &str) {
        self.status(message.to_string());
    }

    /// Print a success line (kept in quiet mode)
    pub fn success(&self, message: &str) {
        println!("{}", success_line(message));
    }

    /// Print a warning
    pub fn warn(&self, message: &str) {
        eprintln!("{}", warning_line(message));
    }

    /// Print a fatal error
    pub fn error(&self, message: &str) {
        eprintln!("{}", error_line(message));
    }

    /// Print remediation guidance below a warning or error
    pub fn hint(&self, message: &str) {
        eprintln!("{}", hint_line(message));
    }
}

pub fn target_line(manifest: &Path) -> String {
    format!("Target: {}", manifest.display().to_string().bold())
}

pub fn up_to_date_line(repo: &str, version: &str) -> String {
    format!(
        "{} {} is already up to date ({})",
        SUCCESS_MARK.dimmed(),
        repo,
        version.dimmed()
    )
}

pub fn updated_line(repo: &str, from: Option<&str>, to: &str) -> String {
    let label = VersionChange::between(from, to).colored_label();
    match from {
        Some(from) => format!(
            "{} Updated {}: {} → {} [{}]",
            SUCCESS_MARK.green(),
            repo,
            from.dimmed(),
            to.green(),
            label
        ),
        None => format!(
            "{} Updated {} to {} [{}]",
            SUCCESS_MARK.green(),
            repo,
            to.green(),
            label
        ),
    }
}

pub fn success_line(message: &str) -> String {
    format!("{} {}", SUCCESS_MARK.green(), message)
}

pub fn warning_line(message: &str) -> String {
    format!("{} {}", WARNING_MARK.yellow(), message)
}

pub fn error_line(message: &str) -> String {
    format!("{} {}", ERROR_MARK.red().bold(), message)
}

pub fn hint_line(message: &str) -> String {
    format!("  {} {}", HINT_MARK.cyan(), message)
}
