//! commit-clock: log git commits as Clockify time entries
//!
//! This binary selects commits from a local repository and records the time
//! between them in Clockify, folding in any running timer.

use anyhow::Context;
use clap::Parser;
use tracing::info;

use commit_clock::clockify::ClockifyClient;
use commit_clock::config::Config;
use commit_clock::sync::{Syncer, load_commits};
use commit_clock::time::TimeConverter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr; RUST_LOG can refine the level chosen by -v/-q
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    let run = config.run_config()?;
    info!(repo = %run.repo_path.display(), "Reading commits");
    let commits = load_commits(&run).context("Failed to select commits")?;

    let client = ClockifyClient::new(config.api_url(), config.api_key.as_deref().unwrap_or_default())?;
    let converter = TimeConverter::current();
    info!(offset = %converter.offset(), dry_run = run.dry_run, "Starting sync");

    Syncer::new(&client, converter, &run)
        .run(&commits)
        .await
        .context("Sync aborted")?;
    Ok(())
}
