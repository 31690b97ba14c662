//! modbump - JFrog module version updater CLI tool
//!
//! Run from the workspace root (or its automation-scripts directory) to
//! bump the JFrog modules in jfrog-cli-artifactory/go.mod.

use clap::Parser;
use modbump::cleanup::{CleanupRunner, SystemCleanup};
use modbump::cli::CliArgs;
use modbump::config::{Config, MODULE_DIR, SCRIPTS_DIR};
use modbump::error::{AppError, IoError};
use modbump::orchestrator::Orchestrator;
use modbump::output::{Console, Verbosity};
use modbump::registry::{GitHubReleases, HttpClient};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Usage errors exit 1 like every other fatal error; help output exits 0
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // Handle version flag
    if args.print_version {
        println!("modbump {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    let verbosity = Verbosity::from_cli(args.verbose, args.quiet);
    init_logging(verbosity);
    let console = Console::new(verbosity);

    // Run the main logic and handle errors
    match run(&args, console).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            console.error(&e.to_string());
            if let Some(AppError::Io(IoError::DirectoryNotFound { .. })) = e.downcast_ref::<AppError>() {
                console.hint(&format!(
                    "Run from the directory containing {}",
                    MODULE_DIR
                ));
                console.hint(&format!("or from its {} directory", SCRIPTS_DIR));
            }
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the verbosity default
fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Main application logic
async fn run(args: &CliArgs, console: Console) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()
        .map_err(|source| AppError::from(IoError::CurrentDir { source }))?;
    let config = Config::from_env(args);

    console.banner();
    if config.dry_run {
        console.info("Mode: dry-run");
    }
    tracing::debug!(
        repos = config.repos.len(),
        api_url = %config.api_url,
        authenticated = config.token.is_some(),
        "configuration loaded"
    );

    let client = HttpClient::with_timeout(config.timeout, config.token.clone())
        .map_err(AppError::from)?;
    let source = GitHubReleases::new(client, &config.api_url);
    let cleanup = config.cleanup_command.clone().map(SystemCleanup::with_command);
    let cleanup_ref = cleanup.as_ref().map(|c| c as &dyn CleanupRunner);

    let orchestrator = Orchestrator::new(&config, &source, cleanup_ref, console);
    orchestrator.run(&cwd).await?;
    Ok(())
}
