//! Instrument error types.
//!
//! This module provides structured error handling for option contract
//! construction.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Instrument-related errors.
///
/// # Variants
/// - `EmptyTicker`: Ticker is empty or whitespace
/// - `InvalidStrike`: Strike price is non-positive or not finite
/// - `InvalidDividendYield`: Dividend yield is not finite
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidStrike { strike: -100.0 };
/// assert!(format!("{}", err).contains("-100"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Ticker is empty.
    #[error("Ticker must not be empty")]
    EmptyTicker,

    /// Invalid strike price.
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid dividend yield.
    #[error("Invalid dividend yield: q = {dividend_yield}")]
    InvalidDividendYield {
        /// The invalid yield
        dividend_yield: f64,
    },
}

impl From<InstrumentError> for PricingError {
    fn from(err: InstrumentError) -> Self {
        PricingError::InvalidContract(err.to_string())
    }
}
