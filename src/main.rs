//! svtool CLI - Signal Verification Tool
//!
//! Command-line interface for the signal verification pipeline.

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::{debug, error};

use svtool::cli::{commands, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logger; RUST_LOG still wins over the default filter
    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    debug!("svtool v{}", env!("CARGO_PKG_VERSION"));

    commands::run(&cli)
        .map_err(|e| {
            error!("[{}] {}", e.error_code(), e);
            if let Some(hint) = e.recovery_suggestion() {
                error!("{}", hint);
            }
            e
        })
        .context("signal verification run failed")
}
