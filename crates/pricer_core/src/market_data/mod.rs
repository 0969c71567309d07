//! Historical market data and the provider contracts that supply it.
//!
//! # Components
//!
//! - [`series`]: `HistoricalPriceSeries` of chronologically ordered closes
//! - [`provider`]: `PriceHistoryProvider` and `RateProvider` traits
//! - [`error`]: Market data error types (MarketDataError)

pub mod error;
pub mod provider;
pub mod series;

pub use error::MarketDataError;
pub use provider::{FixedRate, PriceHistoryProvider, RateProvider};
pub use series::{HistoricalPriceSeries, PricePoint};
