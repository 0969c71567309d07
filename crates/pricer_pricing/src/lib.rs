//! # Pricer Pricing (Layer 3: Simulation Engine)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing provides the simulation counterpart to the closed-form
//! engine in `pricer_models`:
//! - [`rng`]: seeded generators and independent per-batch streams
//! - [`mc`]: Monte Carlo configuration, running statistics and the engine
//!
//! Both engines implement `pricer_models::engine::PricingEngine`, so a caller
//! can price one `PricingContext` with either and compare the results.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_models::analytical::AnalyticEuropeanEngine;
//! use pricer_models::market::PricingContext;
//! use pricer_pricing::mc::{MonteCarloConfig, MonteCarloEngine};
//!
//! let ctx = PricingContext::builder()
//!     .spot(100.0)
//!     .strike(100.0)
//!     .rate(0.05)
//!     .volatility(0.2)
//!     .expiry(1.0)
//!     .build()
//!     .unwrap();
//!
//! let config = MonteCarloConfig::builder().n_trials(50_000).seed(42).build().unwrap();
//! let result = MonteCarloEngine::new(config).unwrap().simulate(&ctx).unwrap();
//! let exact = AnalyticEuropeanEngine.price(&ctx).unwrap();
//!
//! assert!((result.call.price - exact.call).abs() < 4.0 * result.call.std_error);
//! ```
//!
//! ## Reproducibility
//!
//! With a fixed seed, results are identical whether batches run on the rayon
//! pool or sequentially, and independent of the pool's thread count.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod mc;
pub mod rng;
