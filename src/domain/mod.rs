//! Core domain models for modbump
//!
//! This module contains the fundamental types used throughout the application:
//! - Tracked repository identifiers and their owner/name coordinates
//! - Version tag normalization and change classification
//! - Per-repository outcomes and the run summary

mod outcome;
mod repository;
mod version;

pub use outcome::{RepoOutcome, RunSummary, SkipReason};
pub use repository::{RepoCoordinates, DEFAULT_TRACKED_REPOS};
pub(crate) use version::parse_go_version;
pub use version::{normalize_tag, VersionChange, VERSION_PREFIX};
