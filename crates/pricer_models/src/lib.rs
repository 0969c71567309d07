//! # Pricer Models (L2: Business Logic)
//!
//! Option contracts, market parameter estimation and closed-form pricing.
//!
//! This crate provides:
//! - [`instruments`]: `OptionContract`, payoffs and exercise styles
//! - [`market`]: `MarketParameterEstimator`, `PricingContext`, `PricingSession`
//! - [`analytical`]: Black-Scholes-Merton engine and normal distribution functions
//! - [`engine`]: the `PricingEngine` trait shared with the simulation crate
//! - [`parity`]: put-call parity verification
//!
//! ## Design Principles
//!
//! - **One immutable context** consumed by independent engines
//! - **Builder pattern** for validated construction with sensible defaults
//! - **Structured diagnostics** via `tracing` events; no subscriber is installed here
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_models::analytical::AnalyticEuropeanEngine;
//! use pricer_models::market::PricingContext;
//! use pricer_models::parity::ParityChecker;
//!
//! let ctx = PricingContext::builder()
//!     .spot(300.0)
//!     .strike(300.0)
//!     .rate(0.02)
//!     .volatility(0.4)
//!     .expiry(0.25)
//!     .build()
//!     .unwrap();
//!
//! let prices = AnalyticEuropeanEngine.price(&ctx).unwrap();
//! assert!(ParityChecker::new(1e-6).unwrap().check(&ctx, &prices).passed);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod engine;
pub mod instruments;
pub mod market;
pub mod parity;
