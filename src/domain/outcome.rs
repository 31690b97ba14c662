//! Per-repository outcomes and the run summary

use std::fmt;

/// Reason why a tracked repository was skipped this run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The latest release could not be resolved
    ResolveFailed(String),
    /// The require directive could not be updated
    UpdateFailed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::ResolveFailed(msg) => write!(f, "resolve failed: {}", msg),
            SkipReason::UpdateFailed(msg) => write!(f, "update failed: {}", msg),
        }
    }
}

/// Final state of one tracked repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoOutcome {
    /// Pinned version already matches the latest release
    UpToDate { repo: String, version: String },
    /// Pin was moved to the latest release
    Updated {
        repo: String,
        /// Previous pin, absent if the module was not required before
        from: Option<String>,
        to: String,
        /// Whether an existing replace directive was rewritten as well
        override_rewritten: bool,
    },
    /// Repository was left alone because of an error
    Skipped { repo: String, reason: SkipReason },
}

impl RepoOutcome {
    /// Returns the repository identifier
    pub fn repo(&self) -> &str {
        match self {
            RepoOutcome::UpToDate { repo, .. }
            | RepoOutcome::Updated { repo, .. }
            | RepoOutcome::Skipped { repo, .. } => repo,
        }
    }

    /// Returns true if this repository's pin changed
    pub fn is_updated(&self) -> bool {
        matches!(self, RepoOutcome::Updated { .. })
    }

    /// Returns true if this repository was skipped
    pub fn is_skipped(&self) -> bool {
        matches!(self, RepoOutcome::Skipped { .. })
    }
}

/// Summary of a complete run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Outcomes in tracked-list order
    pub outcomes: Vec<RepoOutcome>,
    /// Whether the manifest was written back
    pub manifest_written: bool,
    /// Cleanup result: `None` when it was not run
    pub cleanup_succeeded: Option<bool>,
}

impl RunSummary {
    /// Number of repositories whose pin changed
    pub fn updated_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_updated()).count()
    }

    /// Number of repositories skipped because of an error
    pub fn skipped_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_skipped()).count()
    }
}
