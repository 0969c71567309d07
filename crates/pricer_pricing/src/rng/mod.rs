//! # Random Number Generation Infrastructure
//!
//! - **Reproducibility**: All generators support seeding for deterministic sequences
//! - **Independence**: [`PricerRng::for_stream`] derives one generator per
//!   simulation batch so parallel runs do not share state
//! - **Efficiency**: Zero-allocation batch operations via `&mut [f64]` slices
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::PricerRng;
//!
//! let mut rng = PricerRng::from_seed(12345);
//! let normal_value = rng.gen_normal();
//!
//! let mut buffer = vec![0.0; 1000];
//! rng.fill_normal(&mut buffer);
//! ```

pub mod prng;

pub use prng::{stream_seed, PricerRng};
