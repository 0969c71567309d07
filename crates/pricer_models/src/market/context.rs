//! Immutable pricing snapshot shared by every engine.

use super::error::ContextError;

/// Everything an engine needs to price one contract.
///
/// Built once per session and passed by value; engines never mutate it.
/// σ = 0 is accepted here and rejected by the engines, while τ ≤ 0 is a
/// construction error.
///
/// # Examples
/// ```
/// use pricer_models::market::PricingContext;
///
/// let ctx = PricingContext::builder()
///     .spot(300.0)
///     .strike(300.0)
///     .rate(0.02)
///     .volatility(0.4)
///     .expiry(0.25)
///     .build()
///     .unwrap();
///
/// assert_eq!(ctx.dividend_yield(), 0.0);
/// assert!((ctx.discount_factor() - (-0.005_f64).exp()).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingContext {
    spot: f64,
    strike: f64,
    rate: f64,
    dividend_yield: f64,
    volatility: f64,
    expiry: f64,
}

impl PricingContext {
    /// Creates a new context builder.
    #[inline]
    pub fn builder() -> PricingContextBuilder {
        PricingContextBuilder::default()
    }

    /// Spot price S.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Strike K.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Continuously compounded risk-free rate r.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Continuous dividend yield q.
    #[inline]
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }

    /// Annualised volatility σ.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Time to maturity τ in years.
    #[inline]
    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    /// e^(−rτ)
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.expiry).exp()
    }

    /// e^(−qτ)
    #[inline]
    pub fn dividend_discount(&self) -> f64 {
        (-self.dividend_yield * self.expiry).exp()
    }

    /// √τ
    #[inline]
    pub fn sqrt_expiry(&self) -> f64 {
        self.expiry.sqrt()
    }

    /// σ√τ when it is strictly positive and finite.
    ///
    /// `None` means the lognormal terminal distribution collapses to a point
    /// and any formula dividing by σ√τ is undefined.
    #[inline]
    pub fn vol_sqrt_expiry(&self) -> Option<f64> {
        let v = self.volatility * self.sqrt_expiry();
        (v > 0.0 && v.is_finite()).then_some(v)
    }

    /// Returns a copy with a different strike.
    ///
    /// # Errors
    /// `ContextError::InvalidStrike` if `strike` is not positive and finite.
    pub fn with_strike(self, strike: f64) -> Result<Self, ContextError> {
        validate_strike(strike)?;
        Ok(Self { strike, ..self })
    }
}

fn validate_strike(strike: f64) -> Result<(), ContextError> {
    if strike > 0.0 && strike.is_finite() {
        Ok(())
    } else {
        Err(ContextError::InvalidStrike { strike })
    }
}

fn require(value: Option<f64>, name: &'static str) -> Result<f64, ContextError> {
    value.ok_or(ContextError::MissingField(name))
}

/// Builder for [`PricingContext`].
///
/// `rate` and `dividend_yield` default to zero; every other field is
/// required.
#[derive(Debug, Clone, Default)]
pub struct PricingContextBuilder {
    spot: Option<f64>,
    strike: Option<f64>,
    rate: f64,
    dividend_yield: f64,
    volatility: Option<f64>,
    expiry: Option<f64>,
}

impl PricingContextBuilder {
    /// Sets the spot price.
    #[inline]
    pub fn spot(mut self, spot: f64) -> Self {
        self.spot = Some(spot);
        self
    }

    /// Sets the strike.
    #[inline]
    pub fn strike(mut self, strike: f64) -> Self {
        self.strike = Some(strike);
        self
    }

    /// Sets the risk-free rate (decimal, may be negative).
    #[inline]
    pub fn rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    /// Sets the continuous dividend yield.
    #[inline]
    pub fn dividend_yield(mut self, dividend_yield: f64) -> Self {
        self.dividend_yield = dividend_yield;
        self
    }

    /// Sets the annualised volatility.
    #[inline]
    pub fn volatility(mut self, volatility: f64) -> Self {
        self.volatility = Some(volatility);
        self
    }

    /// Sets the time to maturity in years.
    #[inline]
    pub fn expiry(mut self, expiry: f64) -> Self {
        self.expiry = Some(expiry);
        self
    }

    /// Validates and builds the context.
    ///
    /// # Errors
    /// - `ContextError::MissingField` if spot, strike, volatility or expiry is unset
    /// - `ContextError::InvalidSpot` / `InvalidStrike` for non-positive or non-finite values
    /// - `ContextError::InvalidVolatility` for σ < 0 or non-finite σ
    /// - `ContextError::NonPositiveExpiry` for τ ≤ 0 or non-finite τ
    /// - `ContextError::NonFinite` for a NaN or infinite rate or yield
    pub fn build(self) -> Result<PricingContext, ContextError> {
        let spot = require(self.spot, "spot")?;
        let strike = require(self.strike, "strike")?;
        let volatility = require(self.volatility, "volatility")?;
        let expiry = require(self.expiry, "expiry")?;

        if !(spot > 0.0 && spot.is_finite()) {
            return Err(ContextError::InvalidSpot { spot });
        }
        validate_strike(strike)?;
        if !(volatility >= 0.0 && volatility.is_finite()) {
            return Err(ContextError::InvalidVolatility { volatility });
        }
        if !(expiry > 0.0 && expiry.is_finite()) {
            return Err(ContextError::NonPositiveExpiry { expiry });
        }
        if !self.rate.is_finite() {
            return Err(ContextError::NonFinite {
                name: "rate",
                value: self.rate,
            });
        }
        if !self.dividend_yield.is_finite() {
            return Err(ContextError::NonFinite {
                name: "dividend yield",
                value: self.dividend_yield,
            });
        }

        Ok(PricingContext {
            spot,
            strike,
            rate: self.rate,
            dividend_yield: self.dividend_yield,
            volatility,
            expiry,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn base() -> PricingContextBuilder {
        PricingContext::builder()
            .spot(100.0)
            .strike(95.0)
            .rate(0.05)
            .dividend_yield(0.01)
            .volatility(0.2)
            .expiry(0.5)
    }

    #[test]
    fn test_build_valid() {
        let ctx = base().build().unwrap();
        assert_eq!(ctx.spot(), 100.0);
        assert_eq!(ctx.strike(), 95.0);
        assert_eq!(ctx.rate(), 0.05);
        assert_eq!(ctx.dividend_yield(), 0.01);
        assert_eq!(ctx.volatility(), 0.2);
        assert_eq!(ctx.expiry(), 0.5);
    }

    #[test]
    fn test_discount_factors() {
        let ctx = base().build().unwrap();
        assert_relative_eq!(ctx.discount_factor(), (-0.025_f64).exp(), epsilon = 1e-15);
        assert_relative_eq!(ctx.dividend_discount(), (-0.005_f64).exp(), epsilon = 1e-15);
        assert_relative_eq!(ctx.sqrt_expiry(), 0.5_f64.sqrt(), epsilon = 1e-15);
    }

    #[test]
    fn test_missing_field() {
        let result = PricingContext::builder().spot(100.0).strike(100.0).expiry(1.0).build();
        assert_eq!(result, Err(ContextError::MissingField("volatility")));
    }

    #[test]
    fn test_zero_expiry_rejected_not_clamped() {
        assert_eq!(
            base().expiry(0.0).build(),
            Err(ContextError::NonPositiveExpiry { expiry: 0.0 })
        );
        assert!(base().expiry(-1.0 / 365.0).build().is_err());
        assert!(base().expiry(f64::NAN).build().is_err());
    }

    #[test]
    fn test_zero_volatility_accepted() {
        let ctx = base().volatility(0.0).build().unwrap();
        assert_eq!(ctx.vol_sqrt_expiry(), None);
    }

    #[test]
    fn test_negative_volatility_rejected() {
        assert!(matches!(
            base().volatility(-0.1).build(),
            Err(ContextError::InvalidVolatility { .. })
        ));
    }

    #[test]
    fn test_non_positive_spot_and_strike_rejected() {
        assert!(matches!(
            base().spot(0.0).build(),
            Err(ContextError::InvalidSpot { .. })
        ));
        assert!(matches!(
            base().strike(-5.0).build(),
            Err(ContextError::InvalidStrike { .. })
        ));
    }

    #[test]
    fn test_negative_rate_allowed() {
        let ctx = base().rate(-0.005).build().unwrap();
        assert!(ctx.discount_factor() > 1.0);
    }

    #[test]
    fn test_non_finite_rate_rejected() {
        assert!(matches!(
            base().rate(f64::INFINITY).build(),
            Err(ContextError::NonFinite { name: "rate", .. })
        ));
    }

    #[test]
    fn test_with_strike() {
        let ctx = base().build().unwrap().with_strike(110.0).unwrap();
        assert_eq!(ctx.strike(), 110.0);
        assert!(base().build().unwrap().with_strike(0.0).is_err());
    }
}
