//! Black-Scholes-Merton pricing for European options.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^(−qτ)·N(d₁) − K·e^(−rτ)·N(d₂)
//! **Put Price**: P = K·e^(−rτ)·N(−d₂) − S·e^(−qτ)·N(−d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r − q + σ²/2)τ) / (σ√τ)
//! - d₂ = d₁ − σ√τ

use pricer_core::types::PricingError;
use tracing::debug;

use super::distributions::norm_cdf;
use super::error::AnalyticalError;
use crate::engine::{OptionPrices, PricingEngine};
use crate::instruments::ExerciseStyle;
use crate::market::PricingContext;

/// Closed-form European pricer with continuous dividend yield.
///
/// Both legs are computed from the same d₁/d₂, so put-call parity holds to
/// floating-point precision.
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticEuropeanEngine;
/// use pricer_models::market::PricingContext;
///
/// let ctx = PricingContext::builder()
///     .spot(100.0)
///     .strike(100.0)
///     .rate(0.05)
///     .volatility(0.2)
///     .expiry(1.0)
///     .build()
///     .unwrap();
///
/// let prices = AnalyticEuropeanEngine.price(&ctx).unwrap();
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = prices.call - prices.put - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalyticEuropeanEngine;

impl AnalyticEuropeanEngine {
    /// Computes (d₁, d₂).
    ///
    /// # Errors
    /// `AnalyticalError::DegenerateParameters` if σ√τ is zero or not finite;
    /// checked before any division.
    pub fn d1_d2(&self, ctx: &PricingContext) -> Result<(f64, f64), AnalyticalError> {
        let vol_sqrt_t = ctx
            .vol_sqrt_expiry()
            .ok_or(AnalyticalError::DegenerateParameters {
                volatility: ctx.volatility(),
                expiry: ctx.expiry(),
            })?;

        let sigma = ctx.volatility();
        let log_moneyness = (ctx.spot() / ctx.strike()).ln();
        let drift = (ctx.rate() - ctx.dividend_yield() + 0.5 * sigma * sigma) * ctx.expiry();

        let d1 = (log_moneyness + drift) / vol_sqrt_t;
        Ok((d1, d1 - vol_sqrt_t))
    }

    /// Prices the call and the put.
    ///
    /// # Errors
    /// `AnalyticalError::DegenerateParameters` as for [`d1_d2`](Self::d1_d2).
    pub fn price(&self, ctx: &PricingContext) -> Result<OptionPrices, AnalyticalError> {
        let (d1, d2) = self.d1_d2(ctx)?;

        let forward_spot = ctx.spot() * ctx.dividend_discount();
        let discounted_strike = ctx.strike() * ctx.discount_factor();

        let call = forward_spot * norm_cdf(d1) - discounted_strike * norm_cdf(d2);
        let put = discounted_strike * norm_cdf(-d2) - forward_spot * norm_cdf(-d1);

        debug!(d1, d2, call, put, "Black-Scholes-Merton prices");
        Ok(OptionPrices::new(call, put))
    }
}

impl PricingEngine for AnalyticEuropeanEngine {
    fn name(&self) -> &'static str {
        "black-scholes-merton"
    }

    fn exercise_style(&self) -> ExerciseStyle {
        ExerciseStyle::European
    }

    fn price(&self, ctx: &PricingContext) -> Result<OptionPrices, PricingError> {
        Ok(AnalyticEuropeanEngine::price(self, ctx)?)
    }
}
