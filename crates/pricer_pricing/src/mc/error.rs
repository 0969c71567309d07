//! Error types for Monte Carlo configuration.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Configuration error for the Monte Carlo engine.
///
/// These errors occur during construction when invalid parameters are provided.
///
/// # Examples
/// ```
/// use pricer_pricing::mc::ConfigError;
///
/// let err = ConfigError::InvalidTrialCount(0);
/// assert!(err.to_string().contains("Invalid trial count 0"));
/// ```
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Zero trials.
    #[error("Invalid trial count {0}: must be positive")]
    InvalidTrialCount(usize),

    /// Trial count above `MAX_TRIALS`.
    #[error("Too many trials: {requested} exceeds the limit of {max}")]
    TooManyTrials {
        /// Requested trial count.
        requested: usize,
        /// Configured upper bound.
        max: usize,
    },

    /// Batch size of zero.
    #[error("Invalid batch size {0}: must be positive")]
    InvalidBatchSize(usize),
}

impl From<ConfigError> for PricingError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::InvalidTrialCount(n) => PricingError::InvalidTrialCount(n),
            ConfigError::TooManyTrials { .. } | ConfigError::InvalidBatchSize(_) => {
                PricingError::InvalidInput(err.to_string())
            }
        }
    }
}
