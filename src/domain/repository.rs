//! Tracked repository identifiers

use crate::error::RegistryError;
use std::fmt;

/// Repositories whose latest releases are pinned in the go.mod by default
pub const DEFAULT_TRACKED_REPOS: &[&str] = &[
    "github.com/jfrog/build-info-go",
    "github.com/jfrog/froggit-go",
    "github.com/jfrog/gofrog",
    "github.com/jfrog/jfrog-cli-core/v2",
    "github.com/jfrog/jfrog-client-go",
];

/// Owner and name of a hosted repository, derived from a module path
///
/// `github.com/jfrog/jfrog-cli-core/v2` maps to owner `jfrog`, name
/// `jfrog-cli-core`; the host and any trailing major-version suffix are
/// not part of the coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoCoordinates {
    pub owner: String,
    pub name: String,
}

impl RepoCoordinates {
    /// Split a tracked identifier into owner/name
    ///
    /// Identifiers need at least `host/owner/name`; anything shorter, or
    /// with an empty owner or name segment, is rejected.
    pub fn parse(repo: &str) -> Result<Self, RegistryError> {
        let parts: Vec<&str> = repo.split('/').collect();
        if parts.len() < 3 {
            return Err(RegistryError::invalid_repo_format(repo));
        }

        let (owner, name) = (parts[1], parts[2]);
        if owner.is_empty() || name.is_empty() {
            return Err(RegistryError::invalid_repo_format(repo));
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for RepoCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
