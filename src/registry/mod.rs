//! Release registry access
//!
//! This module provides:
//! - HTTP client shared foundation with timeout and credentials
//! - GitHub Releases adapter resolving a repository's latest version

mod client;
mod github;

pub use client::{HttpClient, DEFAULT_TIMEOUT};
pub use github::{GitHubReleases, DEFAULT_API_URL};

use crate::error::RegistryError;
use async_trait::async_trait;

/// Source of the latest published version of a tracked repository
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Get the registry name
    fn registry_name(&self) -> &'static str;

    /// Resolve the latest release of `repo`, normalized to a `v`-prefixed version
    async fn latest_version(&self, repo: &str) -> Result<String, RegistryError>;
}
