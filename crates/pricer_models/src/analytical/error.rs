//! Error types for analytical pricing operations.
//!
//! This module provides:
//! - `AnalyticalError`: Errors specific to closed-form pricing

use pricer_core::types::PricingError;
use thiserror::Error;

/// Analytical pricing errors.
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::DegenerateParameters { volatility: 0.0, expiry: 1.0 };
/// assert!(format!("{}", err).contains("σ√τ"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// σ√τ is zero (or not finite), so d1 is undefined.
    #[error("Degenerate parameters: σ√τ undefined for σ = {volatility}, τ = {expiry}")]
    DegenerateParameters {
        /// Volatility (σ)
        volatility: f64,
        /// Time to maturity in years (τ)
        expiry: f64,
    },
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        match err {
            AnalyticalError::DegenerateParameters { volatility, expiry } => {
                PricingError::DegenerateParameters { volatility, expiry }
            }
        }
    }
}
