//! Maestro - multi-agent chat orchestrator
//!
//! CLI entry point.

#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use tracing::debug;

mod cli;
mod logging;
mod providers;
mod settings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    let _ = dotenvy::dotenv();

    let settings = settings::load_settings()?;
    let _log_guard = logging::init(&settings.logging);
    debug!(version = env!("CARGO_PKG_VERSION"), "Starting maestro");

    cli::run(cli, settings).await
}
