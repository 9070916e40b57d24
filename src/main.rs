use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use primetime::app::primes::SieveLookup;
use primetime::config::Config;
use primetime::driver::{build_store, Command, Driver};
use primetime::telemetry::init_tracing;

/// Drive the PrimeTime store from the command line.
#[derive(Parser, Debug)]
#[command(name = "primetime")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file (default: platform config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Starting count, overriding `app.initial_count`
    #[arg(long, allow_negative_numbers = true)]
    count: Option<i64>,

    /// Commands to run in order: incr, decr, save, remove,
    /// delete:<i>[,<j>...], nth, dismiss, state
    #[arg(required = true, value_name = "COMMAND")]
    commands: Vec<Command>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;
    if let Some(count) = cli.count {
        config.app.initial_count = count;
    }
    tracing::info!(?config, "configuration loaded");

    let store = build_store(&config).context("failed to set up transition logging")?;
    let lookup = Arc::new(SieveLookup::new(config.lookup.max_n));
    let mut driver = Driver::new(store.clone(), lookup, std::io::stdout());

    driver
        .run(&cli.commands)
        .await
        .context("failed to run commands")?;
    driver.print_state().context("failed to print final state")?;

    store.dispose();
    Ok(())
}
