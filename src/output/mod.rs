//! Output for a run
//!
//! This module provides:
//! - Console narration with colored markers
//! - Verbosity selection from CLI flags

mod console;

pub use console::Console;

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Minimal output
    Quiet,
    /// Normal output
    #[default]
    Normal,
    /// Detailed output with debug logging
    Verbose,
}

impl Verbosity {
    /// Create verbosity from CLI flags
    pub fn from_cli(verbose: bool, quiet: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }

    /// Default tracing filter directive for this verbosity
    pub fn log_filter(&self) -> &'static str {
        match self {
            Verbosity::Verbose => "modbump=debug",
            Verbosity::Quiet => "off",
            Verbosity::Normal => "error",
        }
    }
}
