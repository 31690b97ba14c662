//! GitHub Releases adapter
//!
//! Resolves the latest published release of a repository.
//! API endpoint:
//! - Latest release: {api}/repos/{owner}/{repo}/releases/latest

use crate::domain::{normalize_tag, RepoCoordinates};
use crate::error::RegistryError;
use crate::registry::{HttpClient, ReleaseSource};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// Default base URL for GitHub API
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Latest release response; only the tag is used
#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
}

/// GitHub Releases adapter
pub struct GitHubReleases {
    client: HttpClient,
    base_url: String,
}

impl GitHubReleases {
    /// Create a new adapter against `base_url`
    pub fn new(client: HttpClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build the URL for the latest release
    fn build_latest_url(&self, coords: &RepoCoordinates) -> String {
        format!(
            "{}/repos/{}/{}/releases/latest",
            self.base_url, coords.owner, coords.name
        )
    }
}

#[async_trait]
impl ReleaseSource for GitHubReleases {
    fn registry_name(&self) -> &'static str {
        "GitHub Releases"
    }

    async fn latest_version(&self, repo: &str) -> Result<String, RegistryError> {
        let coords = RepoCoordinates::parse(repo)?;
        let url = self.build_latest_url(&coords);

        let release: Release = self.client.get_json(&url, repo).await?;
        if release.tag_name.trim().is_empty() {
            return Err(RegistryError::invalid_response(
                repo,
                "release has an empty tag_name",
            ));
        }

        let version = normalize_tag(&release.tag_name);
        debug!(repo, tag = %release.tag_name, %version, "resolved latest release");
        Ok(version)
    }
}
