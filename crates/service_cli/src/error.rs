//! Error types for the command line.

use pricer_core::types::PricingError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// A path given on the command line does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// An argument combination that cannot be priced.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration file or environment rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Failure inside estimation or pricing.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// JSON rendering failed.
    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML rendering failed.
    #[error("TOML output error: {0}")]
    Toml(#[from] toml::ser::Error),
}

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;
