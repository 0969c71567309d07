//! Closed-form pricing for European options.
//!
//! - [`AnalyticEuropeanEngine`]: Black-Scholes-Merton with continuous dividend yield
//! - [`distributions`]: standard normal CDF
//!
//! ## Design Principles
//!
//! - **Generic distributions over `T: Float`**
//! - **No silent clamping**: degenerate σ√τ is an error, never a NaN
//! - **Numerical Stability**: erfc-based CDF with relative tail accuracy

pub mod black_scholes;
pub mod distributions;
pub mod error;

pub use black_scholes::AnalyticEuropeanEngine;
pub use distributions::norm_cdf;
pub use error::AnalyticalError;
