//! Check command implementation
//!
//! Validates the effective configuration and prints it.

use tracing::info;

use crate::config::CliConfig;
use crate::Result;

/// Run the check command
pub fn run(config: &CliConfig) -> Result<()> {
    config.validate()?;
    let mc = config.monte_carlo(None, None)?;
    info!(
        n_trials = mc.n_trials(),
        n_batches = mc.n_batches(),
        look_back_window = config.look_back_window,
        "Configuration valid"
    );
    print!("{}", toml::to_string_pretty(config)?);
    println!("# configuration OK");
    Ok(())
}
