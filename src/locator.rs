//! Manifest location from the working directory
//!
//! The tool runs either from the workspace root or from its scripts
//! directory; both resolve to the same dependency directory.

use crate::config::Layout;
use crate::error::IoError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolved paths of the module being updated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestLocation {
    /// Directory holding the manifest; cleanup runs here
    pub module_dir: PathBuf,
    /// The manifest file itself
    pub manifest_path: PathBuf,
}

/// Derive the manifest location from `cwd`
///
/// Fails if the dependency directory does not exist.
pub fn locate(cwd: &Path, layout: &Layout) -> Result<ManifestLocation, IoError> {
    let in_scripts_dir = cwd
        .file_name()
        .is_some_and(|name| name == layout.scripts_dir.as_str());

    let base = match cwd.parent() {
        Some(parent) if in_scripts_dir => parent,
        _ => cwd,
    };

    let module_dir = base.join(&layout.module_dir);
    debug!(cwd = %cwd.display(), module_dir = %module_dir.display(), in_scripts_dir, "locating manifest");

    if !module_dir.is_dir() {
        return Err(IoError::directory_not_found(module_dir));
    }

    let manifest_path = module_dir.join(&layout.manifest_file);
    Ok(ManifestLocation {
        module_dir,
        manifest_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn layout() -> Layout {
        Layout::default()
    }

    #[test]
    fn test_locate_from_root() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("jfrog-cli-artifactory")).unwrap();

        let location = locate(root.path(), &layout()).unwrap();
        assert_eq!(location.module_dir, root.path().join("jfrog-cli-artifactory"));
        assert_eq!(
            location.manifest_path,
            root.path().join("jfrog-cli-artifactory").join("go.mod")
        );
    }

    #[test]
    fn test_locate_from_scripts_dir() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("jfrog-cli-artifactory")).unwrap();
        let scripts = root.path().join("automation-scripts");
        fs::create_dir(&scripts).unwrap();

        let location = locate(&scripts, &layout()).unwrap();
        assert_eq!(location.module_dir, root.path().join("jfrog-cli-artifactory"));
    }

    #[test]
    fn test_locate_missing_directory() {
        let root = TempDir::new().unwrap();
        let err = locate(root.path(), &layout()).unwrap_err();
        match err {
            IoError::DirectoryNotFound { path } => {
                assert_eq!(path, root.path().join("jfrog-cli-artifactory"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_locate_regular_file_is_not_a_directory() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("jfrog-cli-artifactory"), "").unwrap();
        assert!(locate(root.path(), &layout()).is_err());
    }

    #[test]
    fn test_locate_does_not_require_manifest_file() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("jfrog-cli-artifactory")).unwrap();
        let location = locate(root.path(), &layout()).unwrap();
        assert!(!location.manifest_path.exists());
    }
}
