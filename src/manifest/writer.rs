//! Manifest file reading and writing
//!
//! This module provides:
//! - Loading go.mod from disk into a [`GoMod`]
//! - Writing a mutated manifest back in one call after cleanup

use crate::error::ManifestError;
use crate::manifest::{GoMod, Manifest};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Permissions for a rewritten manifest on unix
#[cfg(unix)]
const MANIFEST_MODE: u32 = 0o644;

/// Read and parse the manifest at `path`
pub fn read_manifest(path: &Path) -> Result<GoMod, ManifestError> {
    let content = fs::read_to_string(path).map_err(|e| ManifestError::read_error(path, e))?;
    debug!(path = %path.display(), bytes = content.len(), "read manifest");
    GoMod::parse(path, &content)
}

/// Clean up, serialize and overwrite the manifest at `path`
///
/// Serialization completes in memory before the file is opened, so a
/// format failure leaves the original untouched.
pub fn write_manifest(path: &Path, manifest: &mut dyn Manifest) -> Result<usize, ManifestError> {
    manifest.cleanup();
    let bytes = manifest.serialize()?;

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(MANIFEST_MODE);
    }

    let mut file = options
        .open(path)
        .map_err(|e| ManifestError::write_error(path, e))?;
    file.write_all(&bytes)
        .map_err(|e| ManifestError::write_error(path, e))?;

    debug!(path = %path.display(), bytes = bytes.len(), "wrote manifest");
    Ok(bytes.len())
}
