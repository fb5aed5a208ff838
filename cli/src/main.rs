//! CLI for the webcompat mover.
//!
//! Moves one Bugzilla bug to webcompat.com and resolves it as MOVED.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use webcompat_mover::{
    AttemptSummary, BugzillaClient, ConfigError, CoordinatorOptions, FetchError,
    MigrationCoordinator, MigrationOutcome, MoverConfig, ProductDetailsClient, RestHost,
    SubmissionError, TemplateError, VersionError, WebcompatClient,
};

/// Move a Bugzilla bug to webcompat.com and resolve it as MOVED.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Bug to move.
    #[arg(long)]
    bug: Option<String>,

    /// Path to a config.toml overriding endpoints and text formats.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Bugzilla origin, e.g. https://bugzilla.mozilla.org.
    #[arg(long)]
    tracker_origin: Option<String>,

    /// Bugzilla API key, needed to resolve the bug.
    #[arg(long, env = "BUGZILLA_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Build and print the report without submitting anything.
    #[arg(long)]
    dry_run: bool,
}

/// Errors that stop the CLI before a move attempt starts.
#[derive(Debug, Error)]
enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Tracker(#[from] FetchError),
    #[error(transparent)]
    ReleaseMetadata(#[from] VersionError),
    #[error(transparent)]
    Intake(#[from] SubmissionError),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error("Resolving the bug needs a Bugzilla API key; pass --api-key, set BUGZILLA_API_KEY, or use --dry-run")]
    MissingApiKey,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();

    match run(args).await {
        Ok(summary) => {
            print_summary(&summary);

            match summary.outcome {
                MigrationOutcome::Moved { .. } | MigrationOutcome::DryRun(_) => ExitCode::from(0),
                MigrationOutcome::MissingFields(_) | MigrationOutcome::Failed(_) => {
                    ExitCode::from(1)
                }
            }
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Logs go to stderr in compact single-line form; `RUST_LOG` overrides the
/// default `info` level.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false).with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Builds the clients and runs one move attempt.
async fn run(args: Args) -> Result<AttemptSummary, SetupError> {
    let mut config = match &args.config {
        Some(path) => MoverConfig::load(path)?,
        None => MoverConfig::production()?,
    };
    if let Some(origin) = &args.tracker_origin {
        config = config.with_tracker_origin(origin)?;
    }
    if let Some(api_key) = args.api_key {
        config = config.with_api_key(api_key);
    }
    check_credentials(&config, args.dry_run)?;

    let bugzilla = BugzillaClient::new(
        config.tracker_origin().clone(),
        config.api_key(),
        config.timeout(),
    )?;
    let host = Arc::new(RestHost::new(bugzilla.clone(), args.bug));
    let metadata =
        ProductDetailsClient::new(config.product_details_endpoint().clone(), config.timeout())?;
    let intake = WebcompatClient::new(config.intake_endpoint().clone(), config.timeout())?;

    let options = CoordinatorOptions::from_config(&config).with_dry_run(args.dry_run);
    let mut coordinator = MigrationCoordinator::new(
        host.clone(),
        Arc::new(bugzilla),
        Arc::new(metadata),
        Arc::new(intake),
        options,
    )?;

    let summary = coordinator.start().await;

    for notification in host.notifications() {
        println!("{notification}");
    }

    Ok(summary)
}

/// Fails early when a real move could not resolve the bug afterwards.
///
/// Without an API key the report would be created but the bug left open,
/// and every retry would create another report.
fn check_credentials(config: &MoverConfig, dry_run: bool) -> Result<(), SetupError> {
    if dry_run || config.api_key().is_some() {
        return Ok(());
    }
    Err(SetupError::MissingApiKey)
}

/// Prints the final attempt summary.
fn print_summary(summary: &AttemptSummary) {
    println!("\nSummary:");
    println!(
        "  Bug: {}",
        summary.record_id.as_deref().unwrap_or("(none)")
    );
    let states: Vec<String> = summary.states.iter().map(ToString::to_string).collect();
    println!("  States: {}", states.join(" -> "));

    match &summary.outcome {
        MigrationOutcome::Moved { cross_reference } => {
            println!("  Result: moved to {cross_reference}");
        }
        MigrationOutcome::MissingFields(missing) => {
            println!("  Result: {} required field(s) missing", missing.len());
        }
        MigrationOutcome::DryRun(submission) => {
            println!("  Result: dry run");
            for (name, value) in submission.form_fields() {
                println!("    {name}: {value}");
            }
        }
        MigrationOutcome::Failed(e) => {
            println!("  Result: failed ({:?})", e.kind());
        }
    }
}
