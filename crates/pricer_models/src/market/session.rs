//! Provider-backed construction of a [`PricingContext`].

use pricer_core::market_data::{MarketDataError, PriceHistoryProvider, RateProvider};
use pricer_core::types::{Date, PricingError};
use tracing::{debug, info};

use super::context::PricingContext;
use super::estimator::{EstimatorConfig, MarketParameterEstimator};
use crate::instruments::OptionContract;

/// Fetches market data for one contract and turns it into a context.
///
/// The history request starts `look_back_window` business days before the
/// valuation date (unless overridden) and ends on the valuation date.
///
/// # Examples
///
/// ```rust
/// use pricer_core::market_data::{FixedRate, HistoricalPriceSeries, PricePoint};
/// use pricer_core::types::Date;
/// use pricer_models::instruments::OptionContract;
/// use pricer_models::market::PricingSession;
///
/// let today = Date::from_ymd(2024, 1, 5).unwrap();
/// let history = HistoricalPriceSeries::new(vec![
///     PricePoint::new(Date::from_ymd(2024, 1, 2).unwrap(), 100.0),
///     PricePoint::new(Date::from_ymd(2024, 1, 3).unwrap(), 102.0),
///     PricePoint::new(Date::from_ymd(2024, 1, 4).unwrap(), 101.0),
/// ])
/// .unwrap();
///
/// let session = PricingSession::new(history, FixedRate::new(2.0), today);
/// let contract = OptionContract::new("ACME", 100.0, Date::from_ymd(2024, 7, 5).unwrap()).unwrap();
/// let ctx = session.build_context(&contract).unwrap();
///
/// assert_eq!(ctx.spot(), 101.0);
/// assert!((ctx.rate() - 0.02).abs() < 1e-15);
/// ```
#[derive(Debug, Clone)]
pub struct PricingSession<P, R> {
    history: P,
    rates: R,
    estimator: MarketParameterEstimator,
    history_start: Option<Date>,
}

impl<P: PriceHistoryProvider, R: RateProvider> PricingSession<P, R> {
    /// Creates a session with the default estimator configuration.
    pub fn new(history: P, rates: R, valuation_date: Date) -> Self {
        Self {
            history,
            rates,
            estimator: MarketParameterEstimator::new(valuation_date),
            history_start: None,
        }
    }

    /// Replaces the estimator configuration.
    pub fn with_estimator_config(mut self, config: EstimatorConfig) -> Self {
        self.estimator =
            MarketParameterEstimator::with_config(self.estimator.valuation_date(), config);
        self
    }

    /// Requests history from `start` instead of the default look-back date.
    pub fn with_history_start(mut self, start: Date) -> Self {
        self.history_start = Some(start);
        self
    }

    /// The estimator driving this session.
    #[inline]
    pub fn estimator(&self) -> &MarketParameterEstimator {
        &self.estimator
    }

    /// First date requested from the history provider.
    ///
    /// # Errors
    /// `PricingError::InvalidInput` if stepping back leaves the date range.
    pub fn history_start(&self) -> Result<Date, PricingError> {
        match self.history_start {
            Some(start) => Ok(start),
            None => {
                let window = self.estimator.config().look_back_window();
                let days = u32::try_from(window).unwrap_or(u32::MAX);
                Ok(self.estimator.valuation_date().sub_business_days(days)?)
            }
        }
    }

    /// Fetches the rate and history for `contract` and estimates its context.
    ///
    /// Expiry is validated before any provider is called.
    ///
    /// # Errors
    /// - `PricingError::InvalidExpiry` for an expiry on or before the valuation date
    /// - `PricingError::Provider` when a provider fails
    /// - `PricingError::DataUnavailable` when the history is empty
    /// - Any estimation error from [`MarketParameterEstimator::estimate`]
    pub fn build_context(&self, contract: &OptionContract) -> Result<PricingContext, PricingError> {
        self.estimator.time_to_maturity(contract.expiry())?;

        let rate_percent = self.rates.reference_rate()?;

        let start = self.history_start()?;
        let end = self.estimator.valuation_date();
        debug!(ticker = contract.ticker(), %start, %end, "Requesting price history");
        let series = self
            .history
            .price_history(contract.ticker(), start, Some(end))?;
        if series.is_empty() {
            return Err(MarketDataError::Empty {
                ticker: contract.ticker().to_string(),
            }
            .into());
        }

        let ctx = self.estimator.estimate(contract, &series, rate_percent)?;

        info!(
            ticker = contract.ticker(),
            strike = ctx.strike(),
            dividend_yield = ctx.dividend_yield(),
            volatility = ctx.volatility(),
            expiry_years = ctx.expiry(),
            rate = ctx.rate(),
            spot = ctx.spot(),
            observations = series.len(),
            "Pricing parameters estimated"
        );
        Ok(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::market_data::{FixedRate, HistoricalPriceSeries, PricePoint};
    use std::cell::Cell;

    fn valuation() -> Date {
        Date::from_ymd(2018, 6, 1).unwrap()
    }

    fn history(n: u32) -> HistoricalPriceSeries {
        let points = (0..n)
            .map(|i| {
                let date = valuation().sub_business_days(n - i).unwrap();
                PricePoint::new(date, 300.0 + f64::from(i % 5))
            })
            .collect();
        HistoricalPriceSeries::new(points).unwrap()
    }

    fn contract() -> OptionContract {
        OptionContract::new("TSLA", 300.0, Date::from_ymd(2018, 9, 1).unwrap()).unwrap()
    }

    /// Records how often it was called and returns an empty series.
    #[derive(Default)]
    struct CountingProvider {
        calls: Cell<usize>,
    }

    impl PriceHistoryProvider for CountingProvider {
        fn price_history(
            &self,
            _ticker: &str,
            _start: Date,
            _end: Option<Date>,
        ) -> Result<HistoricalPriceSeries, MarketDataError> {
            self.calls.set(self.calls.get() + 1);
            Ok(HistoricalPriceSeries::default())
        }
    }

    #[test]
    fn test_build_context() {
        let session = PricingSession::new(history(300), FixedRate::new(2.0), valuation());
        let ctx = session.build_context(&contract()).unwrap();
        assert!(ctx.volatility() > 0.0);
        assert_eq!(ctx.strike(), 300.0);
    }

    #[test]
    fn test_default_history_start_is_window_business_days_back() {
        let session = PricingSession::new(history(5), FixedRate::new(2.0), valuation());
        assert_eq!(
            session.history_start().unwrap(),
            valuation().sub_business_days(252).unwrap()
        );
    }

    #[test]
    fn test_history_start_override_filters_series() {
        let start = valuation().sub_business_days(3).unwrap();
        let session =
            PricingSession::new(history(300), FixedRate::new(2.0), valuation()).with_history_start(start);
        assert_eq!(session.history_start().unwrap(), start);
        // 3 closes → 2 returns; still a valid estimate
        assert!(session.build_context(&contract()).is_ok());
    }

    #[test]
    fn test_expired_contract_never_hits_provider() {
        let provider = CountingProvider::default();
        let session = PricingSession::new(&provider, FixedRate::new(2.0), valuation());
        let expired = OptionContract::new("TSLA", 300.0, valuation()).unwrap();
        let err = session.build_context(&expired).unwrap_err();
        assert!(matches!(err, PricingError::InvalidExpiry(_)));
        assert_eq!(provider.calls.get(), 0);
    }

    #[test]
    fn test_empty_history_is_data_unavailable() {
        let provider = CountingProvider::default();
        let session = PricingSession::new(&provider, FixedRate::new(2.0), valuation());
        let err = session.build_context(&contract()).unwrap_err();
        assert_eq!(
            err,
            PricingError::DataUnavailable("No price history for TSLA".to_string())
        );
        assert_eq!(provider.calls.get(), 1);
    }

    #[test]
    fn test_single_point_history_is_insufficient() {
        let session = PricingSession::new(history(1), FixedRate::new(2.0), valuation());
        let err = session.build_context(&contract()).unwrap_err();
        assert_eq!(err, PricingError::InsufficientHistory { got: 1, need: 2 });
    }

    #[test]
    fn test_history_after_valuation_is_excluded() {
        let mut points = history(10).points().to_vec();
        points.push(PricePoint::new(Date::from_ymd(2018, 6, 4).unwrap(), 1_000.0));
        let series = HistoricalPriceSeries::new(points).unwrap();
        let session = PricingSession::new(series, FixedRate::new(2.0), valuation());
        let ctx = session.build_context(&contract()).unwrap();
        assert!(ctx.spot() < 1_000.0);
    }
}
