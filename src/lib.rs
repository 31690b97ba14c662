//! modbump - JFrog module version updater library
//!
//! This library keeps the JFrog modules pinned in a Go module's go.mod
//! at their latest GitHub releases:
//! - Resolves each tracked repository's latest release tag
//! - Rewrites the matching require and replace directives
//! - Writes go.mod once and runs `go mod tidy`

pub mod cleanup;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod locator;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod registry;
