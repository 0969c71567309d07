//! Engine abstraction shared by the closed-form and simulation pricers.

use pricer_core::types::PricingError;

use crate::instruments::{ExerciseStyle, PayoffType};
use crate::market::PricingContext;

/// Call and put values for one strike and expiry.
///
/// Values are returned as computed; no clamping is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionPrices {
    /// Call price
    pub call: f64,
    /// Put price
    pub put: f64,
}

impl OptionPrices {
    /// Creates a price pair.
    #[inline]
    pub fn new(call: f64, put: f64) -> Self {
        Self { call, put }
    }

    /// Price of one leg.
    #[inline]
    pub fn get(&self, payoff: PayoffType) -> f64 {
        match payoff {
            PayoffType::Call => self.call,
            PayoffType::Put => self.put,
        }
    }
}

/// A pricer consuming a shared [`PricingContext`].
///
/// Engines are stateless with respect to the context: the same context can
/// be priced by several engines, in any order.
///
/// # Examples
///
/// ```rust
/// use pricer_models::analytical::AnalyticEuropeanEngine;
/// use pricer_models::engine::PricingEngine;
/// use pricer_models::market::PricingContext;
///
/// fn describe(engine: &dyn PricingEngine, ctx: &PricingContext) -> String {
///     let prices = engine.price(ctx).unwrap();
///     format!("{} ({}): call {:.2}", engine.name(), engine.exercise_style(), prices.call)
/// }
///
/// let ctx = PricingContext::builder()
///     .spot(100.0).strike(100.0).rate(0.05).volatility(0.2).expiry(1.0)
///     .build()
///     .unwrap();
/// assert_eq!(describe(&AnalyticEuropeanEngine, &ctx), "black-scholes-merton (European): call 10.45");
/// ```
pub trait PricingEngine {
    /// Short identifier for logs and reports.
    fn name(&self) -> &'static str;

    /// Exercise style this engine is labelled with.
    fn exercise_style(&self) -> ExerciseStyle;

    /// Prices both legs.
    ///
    /// # Errors
    /// `PricingError::DegenerateParameters` when σ√τ is zero, plus any
    /// engine-specific failure.
    fn price(&self, ctx: &PricingContext) -> Result<OptionPrices, PricingError>;
}

impl<E: PricingEngine + ?Sized> PricingEngine for &E {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn exercise_style(&self) -> ExerciseStyle {
        (**self).exercise_style()
    }

    fn price(&self, ctx: &PricingContext) -> Result<OptionPrices, PricingError> {
        (**self).price(ctx)
    }
}
