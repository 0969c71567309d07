//! Data-provider contracts consumed by the pricing core.
//!
//! Historical prices and reference rates come from outside the core
//! (market data vendors, files, treasury feeds). The core only sees these
//! two traits; retry policy belongs to the implementor.

use super::error::MarketDataError;
use super::series::HistoricalPriceSeries;
use crate::types::Date;

/// Source of historical closing prices.
pub trait PriceHistoryProvider {
    /// Returns closes for `ticker` from `start` to `end` (open-ended when `None`).
    ///
    /// An empty series is a valid return value; the caller decides whether
    /// that is fatal.
    fn price_history(
        &self,
        ticker: &str,
        start: Date,
        end: Option<Date>,
    ) -> Result<HistoricalPriceSeries, MarketDataError>;
}

/// Source of the risk-free reference rate.
pub trait RateProvider {
    /// Returns the reference rate as a percentage (e.g. `2.35` for 2.35%).
    fn reference_rate(&self) -> Result<f64, MarketDataError>;
}

/// An in-memory series serves itself regardless of ticker.
impl PriceHistoryProvider for HistoricalPriceSeries {
    fn price_history(
        &self,
        _ticker: &str,
        start: Date,
        end: Option<Date>,
    ) -> Result<HistoricalPriceSeries, MarketDataError> {
        Ok(self.between(start, end))
    }
}

/// A constant reference rate, quoted in percent.
///
/// ```
/// use pricer_core::market_data::{FixedRate, RateProvider};
///
/// assert_eq!(FixedRate::new(2.0).reference_rate().unwrap(), 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedRate {
    percent: f64,
}

impl FixedRate {
    /// Creates a provider that always returns `percent`.
    pub fn new(percent: f64) -> Self {
        Self { percent }
    }
}

impl RateProvider for FixedRate {
    fn reference_rate(&self) -> Result<f64, MarketDataError> {
        if !self.percent.is_finite() {
            return Err(MarketDataError::Provider(format!(
                "non-finite reference rate {}",
                self.percent
            )));
        }
        Ok(self.percent)
    }
}

impl<P: PriceHistoryProvider + ?Sized> PriceHistoryProvider for &P {
    fn price_history(
        &self,
        ticker: &str,
        start: Date,
        end: Option<Date>,
    ) -> Result<HistoricalPriceSeries, MarketDataError> {
        (**self).price_history(ticker, start, end)
    }
}

impl<R: RateProvider + ?Sized> RateProvider for &R {
    fn reference_rate(&self) -> Result<f64, MarketDataError> {
        (**self).reference_rate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::PricePoint;

    #[test]
    fn test_series_provider_filters_by_start() {
        let series = HistoricalPriceSeries::new(vec![
            PricePoint::new(Date::from_ymd(2024, 1, 1).unwrap(), 1.0),
            PricePoint::new(Date::from_ymd(2024, 2, 1).unwrap(), 2.0),
        ])
        .unwrap();
        let fetched = series
            .price_history("ANY", Date::from_ymd(2024, 1, 15).unwrap(), None)
            .unwrap();
        assert_eq!(fetched.len(), 1);
    }

    #[test]
    fn test_fixed_rate_rejects_nan() {
        assert!(FixedRate::new(f64::NAN).reference_rate().is_err());
    }
}
