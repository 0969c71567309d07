//! option-pricer - Command Line Option Pricing
//!
//! Estimates spot, volatility and time to maturity from a price history,
//! then prices a vanilla call and put in closed form and by simulation.
//!
//! # Commands
//!
//! - `option-pricer price --ticker <T> --strike <K> --expiry <YYYY-MM-DD> --history <csv>`
//! - `option-pricer check` - Validate the configuration file and environment
//!
//! # Configuration
//!
//! Defaults, then `option-pricer.toml` (or `--config`), then `OPTION_PRICER_*`
//! environment variables, then command line flags.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod providers;

pub use error::{CliError, Result};

use commands::price::PriceArgs;
use config::CliConfig;

/// Vanilla option pricer
#[derive(Parser)]
#[command(name = "option-pricer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (default: option-pricer.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a call and put and check put-call parity
    Price(PriceArgs),

    /// Check the configuration file and environment overrides
    Check,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    debug!("Verbose mode enabled");

    let config = CliConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match &cli.command {
        Commands::Price(args) => commands::price::run(args, &config).context("Pricing failed")?,
        Commands::Check => commands::check::run(&config)?,
    }
    Ok(())
}
