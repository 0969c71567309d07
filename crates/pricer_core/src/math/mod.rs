//! Numerical helpers shared across the pricer crates.
//!
//! - [`statistics`]: mean, sample variance and standard deviation

pub mod statistics;
