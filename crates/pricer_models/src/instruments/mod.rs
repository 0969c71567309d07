//! Option contract definitions.
//!
//! - [`OptionContract`]: ticker, strike, expiry and dividend yield
//! - [`PayoffType`]: call and put terminal payoffs
//! - [`ExerciseStyle`]: European or American labelling of an engine
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::Date;
//! use pricer_models::instruments::{OptionContract, PayoffType};
//!
//! let contract = OptionContract::new("TSLA", 300.0, Date::from_ymd(2018, 9, 1).unwrap()).unwrap();
//! let payoff = PayoffType::Call.evaluate(310.0, contract.strike());
//! assert_eq!(payoff, 10.0);
//! ```

mod error;
mod exercise;
mod option;
mod payoff;

pub use error::InstrumentError;
pub use exercise::ExerciseStyle;
pub use option::OptionContract;
pub use payoff::PayoffType;
