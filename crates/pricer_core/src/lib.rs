//! # pricer_core: Foundation for the option pricer
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Time types: `Date`, `DayCountConvention` (`types::time`)
//! - Error types: `PricingError`, `DateError` (`types::error`)
//! - Historical price series and data-provider traits (`market_data`)
//! - Sample statistics for return series (`math::statistics`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - chrono: Date arithmetic
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::market_data::{HistoricalPriceSeries, PricePoint};
//! use pricer_core::types::{Date, DayCountConvention};
//!
//! let valuation = Date::from_ymd(2024, 1, 2).unwrap();
//! let expiry = Date::from_ymd(2024, 7, 2).unwrap();
//! let tau = DayCountConvention::default().year_fraction(valuation, expiry);
//! assert!((tau - 182.0 / 365.0).abs() < 1e-12);
//!
//! let series = HistoricalPriceSeries::new(vec![
//!     PricePoint::new(Date::from_ymd(2024, 1, 1).unwrap(), 100.0),
//!     PricePoint::new(valuation, 101.0),
//! ])
//! .unwrap();
//! assert_eq!(series.last().unwrap().close, 101.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for Date, DayCountConvention and price series

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod types;
