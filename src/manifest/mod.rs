//! Manifest parsing, editing and persistence
//!
//! This module provides:
//! - The [`Manifest`] capability the orchestrator edits through
//! - A line-preserving go.mod implementation ([`GoMod`])
//! - Reading and writing the manifest file

mod go_mod;
mod syntax;
mod writer;

pub use go_mod::{GoMod, Replace, Require};
pub use writer::{read_manifest, write_manifest};

use crate::error::ManifestError;

/// Version pins of a dependency manifest
///
/// Implementations keep edits in memory until [`Manifest::serialize`];
/// the orchestrator never touches format-specific structures.
pub trait Manifest {
    /// Currently pinned version of `module`, if it is required
    fn pinned(&self, module: &str) -> Option<String>;

    /// Pin `module` at `version`, adding a require if none exists
    fn set_pinned(&mut self, module: &str, version: &str) -> Result<(), ManifestError>;

    /// Whether an override (replace directive) exists for `module`
    fn has_override(&self, module: &str) -> bool;

    /// Rewrite the existing override of `module` to point at `module version`
    fn set_override(&mut self, module: &str, version: &str) -> Result<(), ManifestError>;

    /// Canonicalize the in-memory representation before serialization
    fn cleanup(&mut self);

    /// Render the manifest to bytes
    fn serialize(&self) -> Result<Vec<u8>, ManifestError>;
}
