//! Put-call parity verification.
//!
//! For European options on an asset with continuous yield q:
//!
//! ```text
//! C − P = S·e^(−qτ) − K·e^(−rτ)
//! ```

use pricer_core::types::PricingError;
use tracing::debug;

use crate::engine::OptionPrices;
use crate::market::PricingContext;

/// Outcome of a parity check.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParityReport {
    /// C − P
    pub lhs: f64,
    /// S·e^(−qτ) − K·e^(−rτ)
    pub rhs: f64,
    /// lhs − rhs
    pub difference: f64,
    /// Absolute tolerance the check used
    pub tolerance: f64,
    /// `|difference| <= tolerance`
    pub passed: bool,
}

/// Checks a call/put pair against put-call parity.
///
/// The tolerance is absolute, in price units.
///
/// # Examples
/// ```
/// use pricer_models::engine::OptionPrices;
/// use pricer_models::market::PricingContext;
/// use pricer_models::parity::ParityChecker;
///
/// let ctx = PricingContext::builder()
///     .spot(100.0).strike(100.0).rate(0.0).volatility(0.2).expiry(1.0)
///     .build()
///     .unwrap();
///
/// let checker = ParityChecker::new(1e-6).unwrap();
/// assert!(checker.check(&ctx, &OptionPrices::new(8.0, 8.0)).passed);
/// assert!(!checker.check(&ctx, &OptionPrices::new(8.1, 8.0)).passed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParityChecker {
    tolerance: f64,
}

impl ParityChecker {
    /// Creates a checker with an absolute `tolerance`.
    ///
    /// # Errors
    /// `PricingError::InvalidInput` if `tolerance` is negative or not finite.
    pub fn new(tolerance: f64) -> Result<Self, PricingError> {
        if !(tolerance >= 0.0 && tolerance.is_finite()) {
            return Err(PricingError::InvalidInput(format!(
                "parity tolerance must be a non-negative finite number, got {}",
                tolerance
            )));
        }
        Ok(Self { tolerance })
    }

    /// Absolute tolerance.
    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Compares `prices` with the parity relation implied by `ctx`.
    pub fn check(&self, ctx: &PricingContext, prices: &OptionPrices) -> ParityReport {
        let lhs = prices.call - prices.put;
        let rhs = ctx.spot() * ctx.dividend_discount() - ctx.strike() * ctx.discount_factor();
        let difference = lhs - rhs;
        let passed = difference.abs() <= self.tolerance;
        debug!(lhs, rhs, difference, tolerance = self.tolerance, passed, "Put-call parity check");
        ParityReport {
            lhs,
            rhs,
            difference,
            tolerance: self.tolerance,
            passed,
        }
    }
}
