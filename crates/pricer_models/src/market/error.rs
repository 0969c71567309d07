//! Error types for market parameter estimation and context construction.
//!
//! This module provides:
//! - `EstimationError`: failures deriving spot, σ, τ and r from raw data
//! - `ContextError`: rejected `PricingContext` fields

use pricer_core::market_data::MarketDataError;
use pricer_core::types::{Date, PricingError};
use thiserror::Error;

/// Market parameter estimation errors.
///
/// # Examples
/// ```
/// use pricer_models::market::EstimationError;
///
/// let err = EstimationError::InsufficientHistory { got: 1, need: 2 };
/// assert!(format!("{}", err).contains("got 1"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimationError {
    /// The price series has no observations.
    #[error("Price series is empty")]
    EmptySeries,

    /// Too few prices to form a log-return.
    #[error("Insufficient history: got {got} prices, need at least {need}")]
    InsufficientHistory {
        /// Prices available in the look-back window
        got: usize,
        /// Minimum required
        need: usize,
    },

    /// A close that cannot enter a logarithm.
    #[error("Invalid price {value} at position {index}")]
    InvalidPrice {
        /// Position in the series
        index: usize,
        /// Offending close
        value: f64,
    },

    /// Expiry on or before the valuation date.
    #[error("Expiry {expiry} is not after valuation date {valuation_date}")]
    ExpiryNotAfterValuation {
        /// Contract expiry
        expiry: Date,
        /// Valuation date
        valuation_date: Date,
    },

    /// Reference rate is NaN or infinite.
    #[error("Reference rate {0} is not finite")]
    NonFiniteRate(f64),

    /// Estimator configuration rejected by validation.
    #[error("Invalid estimator parameter '{name}': {value}")]
    InvalidConfig {
        /// Parameter name
        name: &'static str,
        /// Description of the invalid value
        value: String,
    },

    /// Failure reported by a data provider.
    #[error(transparent)]
    MarketData(#[from] MarketDataError),
}

impl From<EstimationError> for PricingError {
    fn from(err: EstimationError) -> Self {
        match err {
            EstimationError::EmptySeries => PricingError::DataUnavailable(err.to_string()),
            EstimationError::InsufficientHistory { got, need } => {
                PricingError::InsufficientHistory { got, need }
            }
            EstimationError::InvalidPrice { index, value } => {
                PricingError::InvalidPrice { index, value }
            }
            EstimationError::ExpiryNotAfterValuation { .. } => {
                PricingError::InvalidExpiry(err.to_string())
            }
            EstimationError::NonFiniteRate(_) | EstimationError::InvalidConfig { .. } => {
                PricingError::InvalidInput(err.to_string())
            }
            EstimationError::MarketData(inner) => inner.into(),
        }
    }
}

/// `PricingContext` construction errors.
///
/// # Examples
/// ```
/// use pricer_models::market::ContextError;
///
/// let err = ContextError::NonPositiveExpiry { expiry: 0.0 };
/// assert_eq!(format!("{}", err), "Time to maturity must be positive: τ = 0");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContextError {
    /// A required builder field was never set.
    #[error("Missing pricing context field '{0}'")]
    MissingField(&'static str),

    /// Spot is not a positive finite number.
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The rejected spot
        spot: f64,
    },

    /// Strike is not a positive finite number.
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The rejected strike
        strike: f64,
    },

    /// Volatility is negative or not finite.
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The rejected volatility
        volatility: f64,
    },

    /// τ is zero, negative or not finite.
    #[error("Time to maturity must be positive: τ = {expiry}")]
    NonPositiveExpiry {
        /// The rejected time to maturity
        expiry: f64,
    },

    /// A rate or yield is NaN or infinite.
    #[error("Non-finite {name}: {value}")]
    NonFinite {
        /// Field name
        name: &'static str,
        /// The rejected value
        value: f64,
    },
}

impl From<ContextError> for PricingError {
    fn from(err: ContextError) -> Self {
        match err {
            ContextError::NonPositiveExpiry { .. } => PricingError::InvalidExpiry(err.to_string()),
            _ => PricingError::InvalidInput(err.to_string()),
        }
    }
}
