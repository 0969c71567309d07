//! Historical closing-price series.

use super::error::MarketDataError;
use crate::types::Date;

/// A single (date, close) observation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricePoint {
    /// Observation date
    pub date: Date,
    /// Closing price
    pub close: f64,
}

impl PricePoint {
    /// Creates a new observation.
    #[inline]
    pub fn new(date: Date, close: f64) -> Self {
        Self { date, close }
    }
}

/// Chronologically ordered closing prices for one underlying.
///
/// Dates are strictly increasing; prices are not validated here because a
/// provider may legitimately return zero or missing closes that only become
/// an error once a log-return is taken.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::{HistoricalPriceSeries, PricePoint};
/// use pricer_core::types::Date;
///
/// let series = HistoricalPriceSeries::new(vec![
///     PricePoint::new(Date::from_ymd(2024, 1, 2).unwrap(), 100.0),
///     PricePoint::new(Date::from_ymd(2024, 1, 3).unwrap(), 101.5),
/// ])
/// .unwrap();
///
/// assert_eq!(series.len(), 2);
/// assert_eq!(series.last().unwrap().close, 101.5);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistoricalPriceSeries {
    points: Vec<PricePoint>,
}

impl HistoricalPriceSeries {
    /// Builds a series, rejecting dates that are not strictly increasing.
    ///
    /// # Errors
    /// `MarketDataError::UnorderedDates` with the index of the offending point.
    pub fn new(points: Vec<PricePoint>) -> Result<Self, MarketDataError> {
        if let Some(index) = points
            .windows(2)
            .position(|pair| pair[1].date <= pair[0].date)
        {
            return Err(MarketDataError::UnorderedDates { index: index + 1 });
        }
        Ok(Self { points })
    }

    /// Builds a series from unordered observations by sorting on date.
    ///
    /// Duplicate dates are still rejected.
    pub fn from_unsorted(mut points: Vec<PricePoint>) -> Result<Self, MarketDataError> {
        points.sort_by_key(|p| p.date);
        Self::new(points)
    }

    /// Number of observations.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the series holds no observations.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All observations, oldest first.
    #[inline]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Most recent observation.
    #[inline]
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Closing prices, oldest first.
    pub fn closes(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.close)
    }

    /// The most recent `n` observations (or all of them if fewer exist).
    pub fn tail(&self, n: usize) -> &[PricePoint] {
        let start = self.points.len().saturating_sub(n);
        &self.points[start..]
    }

    /// Observations with `start <= date` and, when given, `date <= end`.
    pub fn between(&self, start: Date, end: Option<Date>) -> Self {
        let points = self
            .points
            .iter()
            .filter(|p| p.date >= start && end.map_or(true, |e| p.date <= e))
            .copied()
            .collect();
        Self { points }
    }
}
