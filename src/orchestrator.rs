//! Update orchestrator for coordinating the entire update workflow
//!
//! This module provides:
//! - Workflow coordination: locate → read → resolve → edit → write → tidy
//! - Per-repository error isolation (a failed lookup never aborts the run)
//! - Dry-run mode support

use crate::cleanup::CleanupRunner;
use crate::config::Config;
use crate::domain::{RepoOutcome, RunSummary, SkipReason};
use crate::error::AppError;
use crate::locator::{locate, ManifestLocation};
use crate::manifest::{read_manifest, write_manifest, Manifest};
use crate::output::Console;
use crate::progress::Progress;
use crate::registry::ReleaseSource;
use std::path::Path;
use tracing::{debug, info, warn};

/// Orchestrator for coordinating the update workflow
pub struct Orchestrator<'a> {
    config: &'a Config,
    source: &'a dyn ReleaseSource,
    cleanup: Option<&'a dyn CleanupRunner>,
    console: Console,
}

impl<'a> Orchestrator<'a> {
    /// Create a new orchestrator
    ///
    /// `cleanup` is `None` when the post-write command should be skipped.
    pub fn new(
        config: &'a Config,
        source: &'a dyn ReleaseSource,
        cleanup: Option<&'a dyn CleanupRunner>,
        console: Console,
    ) -> Self {
        Self {
            config,
            source,
            cleanup,
            console,
        }
    }

    /// Run the update workflow starting from `cwd`
    pub async fn run(&self, cwd: &Path) -> Result<RunSummary, AppError> {
        let location = locate(cwd, &self.config.layout)?;
        self.run_at(&location).await
    }

    /// Run the update workflow against an already located manifest
    pub async fn run_at(&self, location: &ManifestLocation) -> Result<RunSummary, AppError> {
        self.console.target(&location.manifest_path);
        let mut manifest = read_manifest(&location.manifest_path)?;

        let outcomes = self.update_manifest(&mut manifest).await;
        let mut summary = RunSummary {
            outcomes,
            ..RunSummary::default()
        };

        let updated = summary.updated_count();
        let skipped = summary.skipped_count();
        info!(updated, skipped, "resolution finished");

        if updated == 0 {
            self.console
                .success("All tracked repositories are already up to date!");
            self.report_skipped(skipped);
            return Ok(summary);
        }

        if self.config.dry_run {
            self.console.success(&format!(
                "Dry run: {} {} would be updated",
                updated,
                plural(updated)
            ));
            self.report_skipped(skipped);
            return Ok(summary);
        }

        write_manifest(&location.manifest_path, &mut manifest)?;
        summary.manifest_written = true;
        self.console.success(&format!(
            "Successfully updated {} {}",
            updated,
            plural(updated)
        ));
        self.report_skipped(skipped);

        if let Some(cleanup) = self.cleanup {
            summary.cleanup_succeeded = Some(self.run_cleanup(cleanup, &location.module_dir));
        }
        self.console.info("All done!");

        Ok(summary)
    }

    /// Bring every tracked repository's pin up to its latest release
    ///
    /// Repositories are processed one at a time in configured order. Each
    /// failure is reported and recorded as a skip; the manifest is only
    /// touched for repositories whose pin actually moves.
    pub async fn update_manifest(&self, manifest: &mut dyn Manifest) -> Vec<RepoOutcome> {
        let mut progress = Progress::new(self.console.shows_progress());
        let mut outcomes = Vec::with_capacity(self.config.repos.len());
        debug!(
            registry = self.source.registry_name(),
            repos = self.config.repos.len(),
            "resolving latest releases"
        );

        for repo in &self.config.repos {
            let checking = format!("Checking {}...", repo);
            progress.spinner(&checking);
            if !progress.is_visible() {
                self.console.info(&checking);
            }
            let resolved = self.source.latest_version(repo).await;
            progress.finish_and_clear();

            let outcome = match resolved {
                Ok(latest) => self.apply(manifest, repo, latest),
                Err(e) => {
                    warn!(repo = %repo, error = %e, "release lookup failed");
                    self.console.warn(&format!(
                        "Failed to get latest version for {}: {}",
                        repo, e
                    ));
                    RepoOutcome::Skipped {
                        repo: repo.clone(),
                        reason: SkipReason::ResolveFailed(e.to_string()),
                    }
                }
            };
            outcomes.push(outcome);
        }

        outcomes
    }

    fn apply(&self, manifest: &mut dyn Manifest, repo: &str, latest: String) -> RepoOutcome {
        let current = manifest.pinned(repo);
        debug!(repo, current = ?current, latest = %latest, "comparing pin");

        if current.as_deref() == Some(latest.as_str()) {
            self.console.up_to_date(repo, &latest);
            return RepoOutcome::UpToDate {
                repo: repo.to_string(),
                version: latest,
            };
        }

        if let Err(e) = manifest.set_pinned(repo, &latest) {
            warn!(repo, error = %e, "require update failed");
            self.console
                .warn(&format!("Failed to update {}: {}", repo, e));
            return RepoOutcome::Skipped {
                repo: repo.to_string(),
                reason: SkipReason::UpdateFailed(e.to_string()),
            };
        }

        // A broken replace rewrite does not undo the require change.
        let mut override_rewritten = false;
        if manifest.has_override(repo) {
            match manifest.set_override(repo, &latest) {
                Ok(()) => override_rewritten = true,
                Err(e) => {
                    warn!(repo, error = %e, "replace update failed");
                    self.console.warn(&format!(
                        "Failed to update replace directive for {}: {}",
                        repo, e
                    ));
                }
            }
        }

        self.console.updated(repo, current.as_deref(), &latest);
        RepoOutcome::Updated {
            repo: repo.to_string(),
            from: current,
            to: latest,
            override_rewritten,
        }
    }

    fn run_cleanup(&self, cleanup: &dyn CleanupRunner, module_dir: &Path) -> bool {
        let command = cleanup.command_line();
        self.console.info("");
        self.console
            .info(&format!("Running {} in {}...", command, module_dir.display()));

        let result = cleanup.run_cleanup(module_dir);
        if result.success {
            self.console.success(&format!("Successfully ran {}", command));
            return true;
        }

        let detail = result.error.unwrap_or_default();
        warn!(command = %command, error = %detail, "cleanup failed");
        self.console
            .warn(&format!("{} failed: {}", command, detail));
        let dir_name = module_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| module_dir.display().to_string());
        self.console
            .hint(&format!("Run '{}' manually in {}", command, dir_name));
        false
    }

    fn report_skipped(&self, skipped: usize) {
        if skipped > 0 {
            self.console.warn(&format!(
                "{} {} could not be checked or updated",
                skipped,
                plural(skipped)
            ));
        }
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        "repository"
    } else {
        "repositories"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cleanup::CleanupResult;
    use crate::error::{IoError, RegistryError};
    use crate::manifest::GoMod;
    use crate::output::Verbosity;
    use async_trait::async_trait;
    use std::cell::Cell;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    const A: &str = "github.com/jfrog/a";
    const B: &str = "github.com/jfrog/b";

    const GO_MOD: &str = "\
module github.com/jfrog/jfrog-cli-artifactory

go 1.23

require (
\tgithub.com/jfrog/a v1.0.0
\tgithub.com/jfrog/b v2.0.0
)

replace github.com/jfrog/a => github.com/jfrog/a v1.0.0
";

    /// Release source answering from a fixed table; unknown repos 404
    struct FakeReleases {
        latest: HashMap<String, String>,
    }

    impl FakeReleases {
        fn new(entries: &[(&str, &str)]) -> Self {
            Self {
                latest: entries
                    .iter()
                    .map(|(r, v)| (r.to_string(), v.to_string()))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl ReleaseSource for FakeReleases {
        fn registry_name(&self) -> &'static str {
            "fake"
        }

        async fn latest_version(&self, repo: &str) -> Result<String, RegistryError> {
            self.latest
                .get(repo)
                .cloned()
                .ok_or_else(|| RegistryError::ReleaseNotFound {
                    repo: repo.to_string(),
                })
        }
    }

    struct CountingCleanup {
        calls: Cell<usize>,
        succeed: bool,
    }

    impl CountingCleanup {
        fn new(succeed: bool) -> Self {
            Self {
                calls: Cell::new(0),
                succeed,
            }
        }
    }

    impl CleanupRunner for CountingCleanup {
        fn command_line(&self) -> String {
            "go mod tidy".to_string()
        }

        fn run_cleanup(&self, _working_dir: &Path) -> CleanupResult {
            self.calls.set(self.calls.get() + 1);
            if self.succeed {
                CleanupResult::success(self.command_line())
            } else {
                CleanupResult::failure(self.command_line(), "exit status: 1")
            }
        }
    }

    fn config(repos: &[&str]) -> Config {
        Config {
            repos: repos.iter().map(|r| r.to_string()).collect(),
            ..Config::default()
        }
    }

    fn quiet() -> Console {
        Console::new(Verbosity::Quiet)
    }

    fn workspace(go_mod: &str) -> TempDir {
        let root = TempDir::new().unwrap();
        let module_dir = root.path().join("jfrog-cli-artifactory");
        fs::create_dir(&module_dir).unwrap();
        fs::write(module_dir.join("go.mod"), go_mod).unwrap();
        root
    }

    fn read_go_mod(root: &TempDir) -> String {
        fs::read_to_string(root.path().join("jfrog-cli-artifactory").join("go.mod")).unwrap()
    }

    fn parse(content: &str) -> GoMod {
        GoMod::parse(Path::new("go.mod"), content).unwrap()
    }

    #[tokio::test]
    async fn test_update_manifest_moves_require_and_replace() {
        let config = config(&[A, B]);
        let source = FakeReleases::new(&[(A, "v1.2.0"), (B, "v2.0.0")]);
        let orchestrator = Orchestrator::new(&config, &source, None, quiet());

        let mut manifest = parse(GO_MOD);
        let outcomes = orchestrator.update_manifest(&mut manifest).await;

        assert_eq!(
            outcomes[0],
            RepoOutcome::Updated {
                repo: A.to_string(),
                from: Some("v1.0.0".to_string()),
                to: "v1.2.0".to_string(),
                override_rewritten: true,
            }
        );
        assert_eq!(
            outcomes[1],
            RepoOutcome::UpToDate {
                repo: B.to_string(),
                version: "v2.0.0".to_string(),
            }
        );
        assert_eq!(manifest.pinned(A).as_deref(), Some("v1.2.0"));
        let replace = &manifest.replaces()[0];
        assert_eq!(replace.new_version.as_deref(), Some("v1.2.0"));
    }

    #[tokio::test]
    async fn test_update_manifest_skips_failed_lookup() {
        let config = config(&[A, B]);
        let source = FakeReleases::new(&[(B, "v2.1.0")]);
        let orchestrator = Orchestrator::new(&config, &source, None, quiet());

        let mut manifest = parse(GO_MOD);
        let outcomes = orchestrator.update_manifest(&mut manifest).await;

        assert!(outcomes[0].is_skipped());
        assert!(matches!(
            &outcomes[0],
            RepoOutcome::Skipped {
                reason: SkipReason::ResolveFailed(_),
                ..
            }
        ));
        assert!(outcomes[1].is_updated());
        assert_eq!(manifest.pinned(A).as_deref(), Some("v1.0.0"));
        assert_eq!(manifest.pinned(B).as_deref(), Some("v2.1.0"));
    }

    #[tokio::test]
    async fn test_update_manifest_adds_missing_require() {
        let config = config(&["github.com/jfrog/new"]);
        let source = FakeReleases::new(&[("github.com/jfrog/new", "v0.3.0")]);
        let orchestrator = Orchestrator::new(&config, &source, None, quiet());

        let mut manifest = parse(GO_MOD);
        let outcomes = orchestrator.update_manifest(&mut manifest).await;

        assert_eq!(
            outcomes[0],
            RepoOutcome::Updated {
                repo: "github.com/jfrog/new".to_string(),
                from: None,
                to: "v0.3.0".to_string(),
                override_rewritten: false,
            }
        );
        assert_eq!(
            manifest.pinned("github.com/jfrog/new").as_deref(),
            Some("v0.3.0")
        );
    }

    #[tokio::test]
    async fn test_update_manifest_rejects_non_semver_tag() {
        let config = config(&[A]);
        let source = FakeReleases::new(&[(A, "vnext")]);
        let orchestrator = Orchestrator::new(&config, &source, None, quiet());

        let mut manifest = parse(GO_MOD);
        let outcomes = orchestrator.update_manifest(&mut manifest).await;

        assert!(matches!(
            &outcomes[0],
            RepoOutcome::Skipped {
                reason: SkipReason::UpdateFailed(_),
                ..
            }
        ));
        assert_eq!(manifest.pinned(A).as_deref(), Some("v1.0.0"));
    }

    #[tokio::test]
    async fn test_run_writes_and_tidies() {
        let root = workspace(GO_MOD);
        let config = config(&[A, B]);
        let source = FakeReleases::new(&[(A, "v1.2.0"), (B, "v2.0.0")]);
        let cleanup = CountingCleanup::new(true);
        let orchestrator = Orchestrator::new(&config, &source, Some(&cleanup), quiet());

        let summary = orchestrator.run(root.path()).await.unwrap();

        assert_eq!(summary.updated_count(), 1);
        assert!(summary.manifest_written);
        assert_eq!(summary.cleanup_succeeded, Some(true));
        assert_eq!(cleanup.calls.get(), 1);

        let written = read_go_mod(&root);
        assert!(written.contains("github.com/jfrog/a v1.2.0"));
        assert!(written.contains("github.com/jfrog/b v2.0.0"));
        assert!(written.contains("replace github.com/jfrog/a => github.com/jfrog/a v1.2.0"));
        assert!(!written.contains("v1.0.0"));
    }

    #[tokio::test]
    async fn test_run_all_up_to_date_leaves_file_alone() {
        let root = workspace(GO_MOD);
        let config = config(&[A, B]);
        let source = FakeReleases::new(&[(A, "v1.0.0"), (B, "v2.0.0")]);
        let cleanup = CountingCleanup::new(true);
        let orchestrator = Orchestrator::new(&config, &source, Some(&cleanup), quiet());

        let summary = orchestrator.run(root.path()).await.unwrap();

        assert_eq!(summary.updated_count(), 0);
        assert!(!summary.manifest_written);
        assert_eq!(summary.cleanup_succeeded, None);
        assert_eq!(cleanup.calls.get(), 0);
        assert_eq!(read_go_mod(&root), GO_MOD);
    }

    #[tokio::test]
    async fn test_run_all_lookups_failed_is_not_an_error() {
        let root = workspace(GO_MOD);
        let config = config(&[A, B]);
        let source = FakeReleases::new(&[]);
        let orchestrator = Orchestrator::new(&config, &source, None, quiet());

        let summary = orchestrator.run(root.path()).await.unwrap();

        assert_eq!(summary.skipped_count(), 2);
        assert!(!summary.manifest_written);
        assert_eq!(read_go_mod(&root), GO_MOD);
    }

    #[tokio::test]
    async fn test_run_dry_run_does_not_write() {
        let root = workspace(GO_MOD);
        let mut config = config(&[A]);
        config.dry_run = true;
        let source = FakeReleases::new(&[(A, "v1.2.0")]);
        let cleanup = CountingCleanup::new(true);
        let orchestrator = Orchestrator::new(&config, &source, Some(&cleanup), quiet());

        let summary = orchestrator.run(root.path()).await.unwrap();

        assert_eq!(summary.updated_count(), 1);
        assert!(!summary.manifest_written);
        assert_eq!(cleanup.calls.get(), 0);
        assert_eq!(read_go_mod(&root), GO_MOD);
    }

    #[tokio::test]
    async fn test_run_cleanup_failure_is_not_fatal() {
        let root = workspace(GO_MOD);
        let config = config(&[A]);
        let source = FakeReleases::new(&[(A, "v1.1.0")]);
        let cleanup = CountingCleanup::new(false);
        let orchestrator = Orchestrator::new(&config, &source, Some(&cleanup), quiet());

        let summary = orchestrator.run(root.path()).await.unwrap();

        assert!(summary.manifest_written);
        assert_eq!(summary.cleanup_succeeded, Some(false));
        assert!(read_go_mod(&root).contains("github.com/jfrog/a v1.1.0"));
    }

    #[tokio::test]
    async fn test_run_missing_module_directory() {
        let root = TempDir::new().unwrap();
        let config = config(&[A]);
        let source = FakeReleases::new(&[(A, "v1.1.0")]);
        let orchestrator = Orchestrator::new(&config, &source, None, quiet());

        let err = orchestrator.run(root.path()).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Io(IoError::DirectoryNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_run_malformed_manifest() {
        let root = workspace("module\n");
        let config = config(&[A]);
        let source = FakeReleases::new(&[(A, "v1.1.0")]);
        let orchestrator = Orchestrator::new(&config, &source, None, quiet());

        let err = orchestrator.run(root.path()).await.unwrap_err();
        assert!(matches!(err, AppError::Manifest(_)));
        assert_eq!(read_go_mod(&root), "module\n");
    }

    #[tokio::test]
    async fn test_run_missing_manifest_file() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("jfrog-cli-artifactory")).unwrap();
        let config = config(&[A]);
        let source = FakeReleases::new(&[(A, "v1.1.0")]);
        let orchestrator = Orchestrator::new(&config, &source, None, quiet());

        let err = orchestrator.run(root.path()).await.unwrap_err();
        assert!(err.to_string().contains("failed to read manifest file"));
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1), "repository");
        assert_eq!(plural(0), "repositories");
        assert_eq!(plural(3), "repositories");
    }
}
