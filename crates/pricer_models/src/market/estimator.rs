//! Derives spot, volatility, time to maturity and rate from raw market data.
//!
//! The estimator is deterministic: the valuation date is injected instead
//! of read from the clock, and input series are never mutated.

use pricer_core::market_data::{HistoricalPriceSeries, PricePoint, RateProvider};
use pricer_core::math::statistics::sample_std_dev;
use pricer_core::types::{Date, DayCountConvention, PricingError};
use tracing::debug;

use super::context::PricingContext;
use super::error::EstimationError;
use crate::instruments::OptionContract;

/// Default number of log-returns in the volatility window.
pub const DEFAULT_LOOK_BACK_WINDOW: usize = 252;

/// Default annualisation factor for daily returns.
pub const DEFAULT_TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Estimator configuration.
///
/// Use [`EstimatorConfigBuilder`] to construct instances; `Default` gives
/// a 252-return window, 252 trading days per year and ACT/365.
///
/// # Examples
///
/// ```rust
/// use pricer_models::market::EstimatorConfig;
///
/// let config = EstimatorConfig::builder()
///     .look_back_window(60)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.look_back_window(), 60);
/// assert_eq!(config.trading_days_per_year(), 252.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EstimatorConfig {
    look_back_window: usize,
    trading_days_per_year: f64,
    day_count: DayCountConvention,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            look_back_window: DEFAULT_LOOK_BACK_WINDOW,
            trading_days_per_year: DEFAULT_TRADING_DAYS_PER_YEAR,
            day_count: DayCountConvention::default(),
        }
    }
}

impl EstimatorConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> EstimatorConfigBuilder {
        EstimatorConfigBuilder::default()
    }

    /// Number of most recent log-returns used for volatility.
    #[inline]
    pub fn look_back_window(&self) -> usize {
        self.look_back_window
    }

    /// Annualisation factor; volatility scales by its square root.
    #[inline]
    pub fn trading_days_per_year(&self) -> f64 {
        self.trading_days_per_year
    }

    /// Day count used for time to maturity.
    #[inline]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `EstimationError::InvalidConfig` if:
    /// - `look_back_window` is 0
    /// - `trading_days_per_year` is not positive and finite
    pub fn validate(&self) -> Result<(), EstimationError> {
        if self.look_back_window == 0 {
            return Err(EstimationError::InvalidConfig {
                name: "look_back_window",
                value: "must be at least 1".to_string(),
            });
        }
        if !(self.trading_days_per_year > 0.0 && self.trading_days_per_year.is_finite()) {
            return Err(EstimationError::InvalidConfig {
                name: "trading_days_per_year",
                value: format!("{} is not positive", self.trading_days_per_year),
            });
        }
        Ok(())
    }
}

/// Builder for [`EstimatorConfig`].
#[derive(Clone, Debug, Default)]
pub struct EstimatorConfigBuilder {
    look_back_window: Option<usize>,
    trading_days_per_year: Option<f64>,
    day_count: Option<DayCountConvention>,
}

impl EstimatorConfigBuilder {
    /// Sets the number of log-returns in the volatility window.
    #[inline]
    pub fn look_back_window(mut self, window: usize) -> Self {
        self.look_back_window = Some(window);
        self
    }

    /// Sets the annualisation factor.
    #[inline]
    pub fn trading_days_per_year(mut self, days: f64) -> Self {
        self.trading_days_per_year = Some(days);
        self
    }

    /// Sets the day count for time to maturity.
    #[inline]
    pub fn day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = Some(day_count);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    /// `EstimationError::InvalidConfig` when validation fails.
    pub fn build(self) -> Result<EstimatorConfig, EstimationError> {
        let defaults = EstimatorConfig::default();
        let config = EstimatorConfig {
            look_back_window: self.look_back_window.unwrap_or(defaults.look_back_window),
            trading_days_per_year: self
                .trading_days_per_year
                .unwrap_or(defaults.trading_days_per_year),
            day_count: self.day_count.unwrap_or(defaults.day_count),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Derives market parameters for one valuation date.
///
/// # Examples
///
/// ```rust
/// use pricer_core::market_data::{HistoricalPriceSeries, PricePoint};
/// use pricer_core::types::Date;
/// use pricer_models::market::MarketParameterEstimator;
///
/// let today = Date::from_ymd(2024, 1, 5).unwrap();
/// let estimator = MarketParameterEstimator::new(today);
///
/// let series = HistoricalPriceSeries::new(vec![
///     PricePoint::new(Date::from_ymd(2024, 1, 2).unwrap(), 100.0),
///     PricePoint::new(Date::from_ymd(2024, 1, 3).unwrap(), 101.0),
///     PricePoint::new(Date::from_ymd(2024, 1, 4).unwrap(), 100.5),
/// ])
/// .unwrap();
///
/// assert_eq!(estimator.spot_price(&series).unwrap(), 100.5);
/// assert!(estimator.annualised_volatility(&series).unwrap() > 0.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarketParameterEstimator {
    valuation_date: Date,
    config: EstimatorConfig,
}

impl MarketParameterEstimator {
    /// Creates an estimator with the default configuration.
    pub fn new(valuation_date: Date) -> Self {
        Self::with_config(valuation_date, EstimatorConfig::default())
    }

    /// Creates an estimator with an explicit configuration.
    pub fn with_config(valuation_date: Date, config: EstimatorConfig) -> Self {
        Self {
            valuation_date,
            config,
        }
    }

    /// The injected "today".
    #[inline]
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// Active configuration.
    #[inline]
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Most recent close.
    ///
    /// # Errors
    /// - `EstimationError::EmptySeries` if the series has no observations
    /// - `EstimationError::InvalidPrice` if the last close is not positive and finite
    pub fn spot_price(&self, series: &HistoricalPriceSeries) -> Result<f64, EstimationError> {
        let last = series.last().ok_or(EstimationError::EmptySeries)?;
        check_close(series.len() - 1, last.close)?;
        Ok(last.close)
    }

    /// Year fraction from the valuation date to `expiry`.
    ///
    /// # Errors
    /// `EstimationError::ExpiryNotAfterValuation` if `expiry` is on or before
    /// the valuation date.
    pub fn time_to_maturity(&self, expiry: Date) -> Result<f64, EstimationError> {
        if expiry <= self.valuation_date {
            return Err(EstimationError::ExpiryNotAfterValuation {
                expiry,
                valuation_date: self.valuation_date,
            });
        }
        Ok(self
            .config
            .day_count
            .year_fraction(self.valuation_date, expiry))
    }

    /// Log-returns `ln(P_t / P_{t−1})` over the most recent window.
    ///
    /// At most `look_back_window` returns are produced, from the last
    /// `look_back_window + 1` closes.
    ///
    /// # Errors
    /// - `EstimationError::InsufficientHistory` for fewer than 2 closes
    /// - `EstimationError::InvalidPrice` for a non-positive or non-finite close
    pub fn log_returns(&self, series: &HistoricalPriceSeries) -> Result<Vec<f64>, EstimationError> {
        if series.len() < 2 {
            return Err(EstimationError::InsufficientHistory {
                got: series.len(),
                need: 2,
            });
        }

        let window = series.tail(self.config.look_back_window.saturating_add(1));
        let offset = series.len() - window.len();
        for (i, point) in window.iter().enumerate() {
            check_close(offset + i, point.close)?;
        }

        Ok(window
            .windows(2)
            .map(|pair| log_return(&pair[0], &pair[1]))
            .collect())
    }

    /// Annualised volatility: sample standard deviation of the windowed
    /// log-returns times `sqrt(trading_days_per_year)`.
    ///
    /// A constant series gives exactly 0. A single return has no sample
    /// dispersion and also gives 0.
    ///
    /// # Errors
    /// Same as [`log_returns`](Self::log_returns).
    pub fn annualised_volatility(
        &self,
        series: &HistoricalPriceSeries,
    ) -> Result<f64, EstimationError> {
        let returns = self.log_returns(series)?;
        let daily = sample_std_dev(&returns).unwrap_or(0.0);
        let sigma = daily * self.config.trading_days_per_year.sqrt();
        debug!(
            returns = returns.len(),
            daily_std_dev = daily,
            volatility = sigma,
            "Estimated annualised volatility"
        );
        Ok(sigma)
    }

    /// Fetches the reference rate and converts percent to decimal.
    ///
    /// # Errors
    /// - `EstimationError::MarketData` if the provider fails
    /// - `EstimationError::NonFiniteRate` if the quote is NaN or infinite
    pub fn risk_free_rate<R: RateProvider>(&self, provider: &R) -> Result<f64, EstimationError> {
        let percent = provider.reference_rate()?;
        rate_from_percent(percent)
    }

    /// Builds the [`PricingContext`] for `contract`.
    ///
    /// Expiry is checked first so that an expired contract fails before the
    /// series is inspected.
    ///
    /// # Errors
    /// Any estimation error above, or a rejected context field mapped into
    /// `PricingError`.
    pub fn estimate(
        &self,
        contract: &OptionContract,
        series: &HistoricalPriceSeries,
        rate_percent: f64,
    ) -> Result<PricingContext, PricingError> {
        let expiry = self.time_to_maturity(contract.expiry())?;
        let rate = rate_from_percent(rate_percent)?;
        let spot = self.spot_price(series)?;
        let volatility = self.annualised_volatility(series)?;

        let ctx = PricingContext::builder()
            .spot(spot)
            .strike(contract.strike())
            .rate(rate)
            .dividend_yield(contract.dividend_yield())
            .volatility(volatility)
            .expiry(expiry)
            .build()?;
        Ok(ctx)
    }
}

fn rate_from_percent(percent: f64) -> Result<f64, EstimationError> {
    if !percent.is_finite() {
        return Err(EstimationError::NonFiniteRate(percent));
    }
    Ok(percent / 100.0)
}

fn check_close(index: usize, value: f64) -> Result<(), EstimationError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(EstimationError::InvalidPrice { index, value })
    }
}

#[inline]
fn log_return(prev: &PricePoint, next: &PricePoint) -> f64 {
    (next.close / prev.close).ln()
}
