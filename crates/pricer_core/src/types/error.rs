//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: The discriminated failure kinds surfaced to callers
//! - `DateError`: Errors from date construction and parsing
//!
//! Module-level errors in the other crates (`EstimationError`,
//! `AnalyticalError`, `ConfigError`, ...) convert into `PricingError` so a
//! caller that drives a whole session can match on one type.

use thiserror::Error;

/// Categorised pricing errors.
///
/// Every variant is raised where the violated precondition is first
/// detected and is never retried by the pricing core.
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidTrialCount(0);
/// assert_eq!(format!("{}", err), "Invalid trial count 0: must be positive");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Expiry is not strictly in the future, or τ is not positive.
    #[error("Invalid expiry: {0}")]
    InvalidExpiry(String),

    /// Too few prices to compute a log-return.
    #[error("Insufficient history: got {got} prices, need at least {need}")]
    InsufficientHistory {
        /// Number of prices supplied
        got: usize,
        /// Minimum number required
        need: usize,
    },

    /// No historical data was available to estimate from.
    #[error("Historical data unavailable: {0}")]
    DataUnavailable(String),

    /// Volatility or time to maturity is zero where an engine divides by σ√τ.
    #[error("Degenerate parameters: σ = {volatility}, τ = {expiry}")]
    DegenerateParameters {
        /// Volatility (σ)
        volatility: f64,
        /// Time to maturity in years (τ)
        expiry: f64,
    },

    /// Monte Carlo engine configured with no trials.
    #[error("Invalid trial count {0}: must be positive")]
    InvalidTrialCount(usize),

    /// A close price that is non-positive or not finite, so no log-return exists.
    #[error("Invalid price {value} at position {index}")]
    InvalidPrice {
        /// Position of the offending close in the series
        index: usize,
        /// The offending close
        value: f64,
    },

    /// Option contract fields rejected at construction.
    #[error("Invalid contract: {0}")]
    InvalidContract(String),

    /// Invalid input data or parameters.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Failure reported by an external data provider.
    #[error("Provider error: {0}")]
    Provider(String),
}

/// Date-related errors.
///
/// # Examples
/// ```
/// use pricer_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Invalid date components (e.g., February 30th).
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Failed to parse date string.
    #[error("Date parse error: {0}")]
    ParseError(String),

    /// Date arithmetic left chrono's supported range.
    #[error("Date arithmetic out of range from {0}")]
    OutOfRange(String),
}

impl From<DateError> for PricingError {
    fn from(err: DateError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}
