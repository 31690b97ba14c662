//! CLI argument parsing module for modbump

use clap::{ArgAction, Parser};

/// Bump pinned JFrog modules in go.mod to their latest releases
#[derive(Parser, Debug, Clone)]
#[command(
    name = "modbump",
    about = "Bump pinned JFrog modules in go.mod to their latest GitHub releases"
)]
pub struct CliArgs {
    /// Track these repositories instead of the built-in list (can be specified multiple times)
    #[arg(long = "repo", value_name = "MODULE", action = ArgAction::Append)]
    pub repos: Vec<String>,

    /// Base URL of the GitHub REST API
    #[arg(long, value_name = "URL", default_value = crate::registry::DEFAULT_API_URL)]
    pub api_url: String,

    /// Dry run mode - show what would be updated without making changes
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Write go.mod but do not run 'go mod tidy' afterwards
    #[arg(long)]
    pub no_tidy: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - only warnings, errors and the summary
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print version information
    #[arg(short = 'V', long = "version")]
    pub print_version: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = CliArgs::parse_from(["modbump"]);
        assert!(args.repos.is_empty());
        assert_eq!(args.api_url, "https://api.github.com");
        assert!(!args.dry_run);
        assert!(!args.no_tidy);
        assert!(!args.verbose);
        assert!(!args.quiet);
        assert!(!args.print_version);
    }

    #[test]
    fn test_repeated_repo() {
        let args = CliArgs::parse_from([
            "modbump",
            "--repo",
            "github.com/a/a",
            "--repo",
            "github.com/b/b",
        ]);
        assert_eq!(args.repos, vec!["github.com/a/a", "github.com/b/b"]);
    }

    #[test]
    fn test_dry_run_flags() {
        assert!(CliArgs::parse_from(["modbump", "-n"]).dry_run);
        assert!(CliArgs::parse_from(["modbump", "--dry-run"]).dry_run);
    }

    #[test]
    fn test_api_url() {
        let args = CliArgs::parse_from(["modbump", "--api-url", "http://localhost:8080"]);
        assert_eq!(args.api_url, "http://localhost:8080");
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = CliArgs::try_parse_from(["modbump", "--quiet", "--verbose"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_version_flag() {
        assert!(CliArgs::parse_from(["modbump", "-V"]).print_version);
    }
}
