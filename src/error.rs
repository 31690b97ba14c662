//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ManifestError: Issues with reading, parsing, editing or writing go.mod
//! - RegistryError: Issues with resolving a repository's latest release
//! - IoError: Working directory and layout failures

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Release registry related errors
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// IO related errors
    #[error(transparent)]
    Io(#[from] IoError),
}

/// Errors related to manifest file operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write manifest file
    #[error("failed to write manifest file {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// go.mod parsing error
    #[error("failed to parse go.mod in {path}: {message}")]
    GoModParseError { path: PathBuf, message: String },

    /// A version that is not `v` followed by a semantic version
    #[error("invalid version '{version}' for {module}: {message}")]
    InvalidVersion {
        module: String,
        version: String,
        message: String,
    },

    /// Module path that cannot be written as a go.mod token
    #[error("invalid module path '{module}': {message}")]
    InvalidModulePath { module: String, message: String },

    /// No replace directive exists for the module
    #[error("no replace directive for {module}")]
    ReplaceNotFound { module: String },
}

/// Errors related to release registry communication
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Repository identifier does not have host/owner/name segments
    #[error("invalid repo format: {repo}")]
    InvalidRepoFormat { repo: String },

    /// Network request failed
    #[error("failed to fetch latest release of '{repo}': {message}")]
    NetworkError { repo: String, message: String },

    /// Timeout
    #[error("timeout while fetching latest release of '{repo}'")]
    Timeout { repo: String },

    /// Repository has no published release (or does not exist)
    #[error("no published release found for '{repo}'")]
    ReleaseNotFound { repo: String },

    /// Rate limit exceeded
    #[error("rate limit exceeded while fetching '{repo}' (status {status})")]
    RateLimitExceeded { repo: String, status: u16 },

    /// Any other non-200 status
    #[error("GitHub API returned status {status} for '{repo}'")]
    UnexpectedStatus { repo: String, status: u16 },

    /// Invalid response body
    #[error("invalid response for '{repo}': {message}")]
    InvalidResponse { repo: String, message: String },

    /// HTTP client could not be constructed
    #[error("failed to create HTTP client: {message}")]
    ClientBuild { message: String },
}

/// Errors related to the working directory layout
#[derive(Error, Debug)]
pub enum IoError {
    /// Directory not found
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// The process working directory could not be determined
    #[error("failed to get current directory: {source}")]
    CurrentDir {
        #[source]
        source: std::io::Error,
    },
}

impl ManifestError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new WriteError
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::WriteError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new GoModParseError
    pub fn parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::GoModParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidVersion error
    pub fn invalid_version(
        module: impl Into<String>,
        version: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ManifestError::InvalidVersion {
            module: module.into(),
            version: version.into(),
            message: message.into(),
        }
    }
}

impl RegistryError {
    /// Creates a new InvalidRepoFormat error
    pub fn invalid_repo_format(repo: impl Into<String>) -> Self {
        RegistryError::InvalidRepoFormat { repo: repo.into() }
    }

    /// Creates a new NetworkError
    pub fn network_error(repo: impl Into<String>, message: impl Into<String>) -> Self {
        RegistryError::NetworkError {
            repo: repo.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(repo: impl Into<String>, message: impl Into<String>) -> Self {
        RegistryError::InvalidResponse {
            repo: repo.into(),
            message: message.into(),
        }
    }
}

impl IoError {
    /// Creates a new DirectoryNotFound error
    pub fn directory_not_found(path: impl Into<PathBuf>) -> Self {
        IoError::DirectoryNotFound { path: path.into() }
    }
}
