//! Monte Carlo pricing of vanilla calls and puts.
//!
//! # Architecture
//!
//! ```text
//! MonteCarloEngine
//! ├── MonteCarloConfig  (trials, batch size, seed, parallelism)
//! ├── PricerRng         (one stream per batch)
//! └── RunningStats      (per-batch mean/variance, merged in batch order)
//! ```
//!
//! # Example
//!
//! ```rust
//! use pricer_models::engine::PricingEngine;
//! use pricer_models::market::PricingContext;
//! use pricer_pricing::mc::MonteCarloEngine;
//!
//! let ctx = PricingContext::builder()
//!     .spot(100.0).strike(110.0).rate(0.03).dividend_yield(0.01)
//!     .volatility(0.25).expiry(0.75)
//!     .build()
//!     .unwrap();
//!
//! let engine = MonteCarloEngine::with_trials(10_000).unwrap();
//! let prices = engine.price(&ctx).unwrap();
//! assert!(prices.call > 0.0 && prices.put > 0.0);
//! ```

mod config;
mod engine;
mod error;
mod stats;

pub use config::{
    MonteCarloConfig, MonteCarloConfigBuilder, DEFAULT_BATCH_SIZE, DEFAULT_TRIALS, MAX_TRIALS,
};
pub use engine::{LegEstimate, MonteCarloEngine, MonteCarloResult};
pub use error::ConfigError;
pub use stats::RunningStats;
