//! HTTP client shared foundation
//!
//! This module provides a shared HTTP client with:
//! - Fixed per-request timeout and User-Agent
//! - Optional `Authorization: token` credential
//! - Status classification into registry errors (no retries)

use crate::error::RegistryError;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Default timeout for HTTP requests (10 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("modbump/", env!("CARGO_PKG_VERSION"));

/// Media type GitHub recommends for REST requests
const ACCEPT: &str = "application/vnd.github+json";

/// HTTP client wrapper carrying the optional API credential
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new(token: Option<String>) -> Result<Self, RegistryError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, token)
    }

    /// Create a new HTTP client with a custom timeout
    pub fn with_timeout(timeout: Duration, token: Option<String>) -> Result<Self, RegistryError> {
        Self::with_config(timeout, DEFAULT_USER_AGENT, token)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(
        timeout: Duration,
        user_agent: &str,
        token: Option<String>,
    ) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| RegistryError::ClientBuild {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            token: token.filter(|t| !t.is_empty()),
        })
    }

    /// Whether requests carry an Authorization header
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Perform a single GET request; anything but 200 is an error
    pub async fn get(&self, url: &str, repo: &str) -> Result<reqwest::Response, RegistryError> {
        let mut request = self.client.get(url).header("Accept", ACCEPT);
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("token {}", token));
        }

        debug!(url, authenticated = self.token.is_some(), "GET");
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                RegistryError::Timeout {
                    repo: repo.to_string(),
                }
            } else {
                RegistryError::network_error(repo, e.to_string())
            }
        })?;

        let status = response.status();
        debug!(url, status = status.as_u16(), "response");

        match status {
            StatusCode::OK => Ok(response),
            StatusCode::NOT_FOUND => Err(RegistryError::ReleaseNotFound {
                repo: repo.to_string(),
            }),
            StatusCode::TOO_MANY_REQUESTS => Err(RegistryError::RateLimitExceeded {
                repo: repo.to_string(),
                status: status.as_u16(),
            }),
            StatusCode::FORBIDDEN if is_rate_limited(&response) => {
                Err(RegistryError::RateLimitExceeded {
                    repo: repo.to_string(),
                    status: status.as_u16(),
                })
            }
            _ => Err(RegistryError::UnexpectedStatus {
                repo: repo.to_string(),
                status: status.as_u16(),
            }),
        }
    }

    /// Perform a GET request and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        repo: &str,
    ) -> Result<T, RegistryError> {
        let response = self.get(url, repo).await?;
        let body = response.text().await.map_err(|e| {
            RegistryError::invalid_response(repo, format!("failed to read body: {}", e))
        })?;

        serde_json::from_str(&body).map_err(|e| {
            RegistryError::invalid_response(repo, format!("failed to parse JSON: {}", e))
        })
    }
}

/// GitHub answers an exhausted quota with 403 and zero remaining requests
fn is_rate_limited(response: &reqwest::Response) -> bool {
    response
        .headers()
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "0")
}
