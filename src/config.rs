//! Run configuration
//!
//! Everything the orchestrator needs from the environment is gathered
//! here once, so the rest of the crate never reads globals.

use crate::cli::CliArgs;
use crate::cleanup::TIDY_COMMAND;
use crate::domain::DEFAULT_TRACKED_REPOS;
use std::time::Duration;

/// Environment variable holding the GitHub API token
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Directory the tool may be launched from instead of the workspace root
pub const SCRIPTS_DIR: &str = "automation-scripts";

/// Module directory whose go.mod is updated
pub const MODULE_DIR: &str = "jfrog-cli-artifactory";

/// Manifest file name inside the module directory
pub const MANIFEST_FILE: &str = "go.mod";

/// Fixed directory layout around the manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub scripts_dir: String,
    pub module_dir: String,
    pub manifest_file: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            scripts_dir: SCRIPTS_DIR.to_string(),
            module_dir: MODULE_DIR.to_string(),
            manifest_file: MANIFEST_FILE.to_string(),
        }
    }
}

/// Configuration for a run
#[derive(Debug, Clone)]
pub struct Config {
    /// Repositories to check, processed in order
    pub repos: Vec<String>,
    /// Optional API token sent as `Authorization: token <value>`
    pub token: Option<String>,
    /// Base URL of the release API
    pub api_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Where the manifest lives relative to the working directory
    pub layout: Layout,
    /// Command run in the module directory after writing, `None` to skip
    pub cleanup_command: Option<Vec<String>>,
    /// Report only; never write or run cleanup
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repos: DEFAULT_TRACKED_REPOS.iter().map(|r| r.to_string()).collect(),
            token: None,
            api_url: crate::registry::DEFAULT_API_URL.to_string(),
            timeout: crate::registry::DEFAULT_TIMEOUT,
            layout: Layout::default(),
            cleanup_command: Some(TIDY_COMMAND.iter().map(|s| s.to_string()).collect()),
            dry_run: false,
        }
    }
}

impl Config {
    /// Build configuration from CLI arguments and the token variable's value
    pub fn from_cli(args: &CliArgs, token: Option<String>) -> Self {
        let mut config = Self::default();

        if !args.repos.is_empty() {
            config.repos = args.repos.clone();
        }
        config.token = token.filter(|t| !t.trim().is_empty());
        config.api_url = args.api_url.clone();
        config.dry_run = args.dry_run;
        if args.no_tidy {
            config.cleanup_command = None;
        }

        config
    }

    /// Build configuration from CLI arguments and the process environment
    pub fn from_env(args: &CliArgs) -> Self {
        Self::from_cli(args, std::env::var(TOKEN_ENV).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn make_args(args: &[&str]) -> CliArgs {
        CliArgs::parse_from(args)
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.repos.len(), 5);
        assert_eq!(config.repos[3], "github.com/jfrog/jfrog-cli-core/v2");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.api_url, "https://api.github.com");
        assert_eq!(
            config.cleanup_command,
            Some(vec!["go".to_string(), "mod".to_string(), "tidy".to_string()])
        );
        assert!(!config.dry_run);
    }

    #[test]
    fn test_default_layout() {
        let layout = Layout::default();
        assert_eq!(layout.scripts_dir, "automation-scripts");
        assert_eq!(layout.module_dir, "jfrog-cli-artifactory");
        assert_eq!(layout.manifest_file, "go.mod");
    }

    #[test]
    fn test_from_cli_keeps_default_repos() {
        let config = Config::from_cli(&make_args(&["modbump"]), None);
        assert_eq!(config.repos, Config::default().repos);
        assert!(config.token.is_none());
    }

    #[test]
    fn test_from_cli_repo_override() {
        let config = Config::from_cli(&make_args(&["modbump", "--repo", "github.com/a/a"]), None);
        assert_eq!(config.repos, vec!["github.com/a/a"]);
    }

    #[test]
    fn test_from_cli_token() {
        let args = make_args(&["modbump"]);
        assert_eq!(
            Config::from_cli(&args, Some("abc".to_string())).token.as_deref(),
            Some("abc")
        );
        assert!(Config::from_cli(&args, Some(String::new())).token.is_none());
    }

    #[test]
    fn test_from_cli_flags() {
        let config = Config::from_cli(&make_args(&["modbump", "--dry-run", "--no-tidy"]), None);
        assert!(config.dry_run);
        assert!(config.cleanup_command.is_none());
    }
}
