//! Market data error types.
//!
//! This module provides structured error handling for historical price
//! series construction and data-provider calls.

use crate::types::PricingError;
use thiserror::Error;

/// Market data operation errors.
///
/// # Variants
///
/// - `UnorderedDates`: Series dates are not strictly increasing
/// - `Empty`: Provider returned no observations
/// - `Provider`: Transport or parsing failure inside a provider
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketDataError;
///
/// let err = MarketDataError::UnorderedDates { index: 3 };
/// assert!(format!("{}", err).contains("index 3"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Dates are not strictly increasing.
    #[error("Price series dates not strictly increasing at index {index}")]
    UnorderedDates {
        /// Index of the first out-of-order observation
        index: usize,
    },

    /// No observations available for the ticker.
    #[error("No price history for {ticker}")]
    Empty {
        /// Requested ticker
        ticker: String,
    },

    /// Provider failure (I/O, parsing, remote service).
    #[error("Provider error: {0}")]
    Provider(String),
}

impl From<MarketDataError> for PricingError {
    fn from(err: MarketDataError) -> Self {
        match err {
            MarketDataError::Empty { .. } => PricingError::DataUnavailable(err.to_string()),
            MarketDataError::UnorderedDates { .. } => PricingError::InvalidInput(err.to_string()),
            MarketDataError::Provider(msg) => PricingError::Provider(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_maps_to_data_unavailable() {
        let err: PricingError = MarketDataError::Empty {
            ticker: "AAPL".to_string(),
        }
        .into();
        assert_eq!(err, PricingError::DataUnavailable("No price history for AAPL".to_string()));
    }

    #[test]
    fn test_provider_maps_to_provider() {
        let err: PricingError = MarketDataError::Provider("timeout".to_string()).into();
        assert_eq!(err, PricingError::Provider("timeout".to_string()));
    }
}
