//! Market parameter estimation.
//!
//! Control flow is leaf-first:
//! provider data → [`MarketParameterEstimator`] → [`PricingContext`].
//! [`PricingSession`] wires the two data-provider traits from
//! `pricer_core::market_data` to the estimator.

mod context;
mod error;
mod estimator;
mod session;

pub use context::{PricingContext, PricingContextBuilder};
pub use error::{ContextError, EstimationError};
pub use estimator::{
    EstimatorConfig, EstimatorConfigBuilder, MarketParameterEstimator, DEFAULT_LOOK_BACK_WINDOW,
    DEFAULT_TRADING_DAYS_PER_YEAR,
};
pub use session::PricingSession;
