//! Single-underlying option contract.

use pricer_core::types::Date;

use super::error::InstrumentError;

/// The contract being priced: what, at which strike, until when.
///
/// Immutable once constructed. The same contract yields both a call and a
/// put price; the leg is chosen by the engine output, not stored here.
///
/// # Examples
/// ```
/// use pricer_core::types::Date;
/// use pricer_models::instruments::OptionContract;
///
/// let expiry = Date::from_ymd(2025, 9, 19).unwrap();
/// let contract = OptionContract::new("TSLA", 300.0, expiry)
///     .unwrap()
///     .with_dividend_yield(0.01)
///     .unwrap();
///
/// assert_eq!(contract.ticker(), "TSLA");
/// assert_eq!(contract.dividend_yield(), 0.01);
/// assert!(OptionContract::new("", 300.0, expiry).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionContract {
    ticker: String,
    strike: f64,
    expiry: Date,
    dividend_yield: f64,
}

impl OptionContract {
    /// Creates a contract with zero dividend yield.
    ///
    /// # Errors
    /// - `InstrumentError::EmptyTicker` if `ticker` is blank
    /// - `InstrumentError::InvalidStrike` if `strike` is not positive and finite
    pub fn new(
        ticker: impl Into<String>,
        strike: f64,
        expiry: Date,
    ) -> Result<Self, InstrumentError> {
        let ticker = ticker.into().trim().to_string();
        if ticker.is_empty() {
            return Err(InstrumentError::EmptyTicker);
        }
        if !(strike > 0.0 && strike.is_finite()) {
            return Err(InstrumentError::InvalidStrike { strike });
        }
        Ok(Self {
            ticker,
            strike,
            expiry,
            dividend_yield: 0.0,
        })
    }

    /// Sets the continuous dividend yield (decimal).
    ///
    /// # Errors
    /// `InstrumentError::InvalidDividendYield` if `dividend_yield` is not finite.
    pub fn with_dividend_yield(self, dividend_yield: f64) -> Result<Self, InstrumentError> {
        if !dividend_yield.is_finite() {
            return Err(InstrumentError::InvalidDividendYield { dividend_yield });
        }
        Ok(Self {
            dividend_yield,
            ..self
        })
    }

    /// Underlying identifier.
    #[inline]
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Strike price K.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Expiry date.
    #[inline]
    pub fn expiry(&self) -> Date {
        self.expiry
    }

    /// Continuous dividend yield q.
    #[inline]
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }
}
