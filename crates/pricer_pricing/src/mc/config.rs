//! Monte Carlo simulation configuration.
//!
//! This module provides the configuration type and builder for the terminal
//! price simulation.

use super::error::ConfigError;

/// Maximum number of trials allowed.
pub const MAX_TRIALS: usize = 10_000_000;

/// Trials used when none are specified.
pub const DEFAULT_TRIALS: usize = 100_000;

/// Trials per independently seeded batch.
pub const DEFAULT_BATCH_SIZE: usize = 10_000;

/// Monte Carlo simulation configuration.
///
/// Immutable configuration specifying simulation parameters.
/// Use [`MonteCarloConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::MonteCarloConfig;
///
/// let config = MonteCarloConfig::builder()
///     .n_trials(200_000)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_trials(), 200_000);
/// assert_eq!(config.n_batches(), 20);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonteCarloConfig {
    /// Number of simulated terminal prices.
    n_trials: usize,
    /// Trials per batch; each batch owns one generator.
    batch_size: usize,
    /// Optional seed for reproducibility.
    seed: Option<u64>,
    /// Run batches on the rayon pool.
    parallel: bool,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            n_trials: DEFAULT_TRIALS,
            batch_size: DEFAULT_BATCH_SIZE,
            seed: None,
            parallel: true,
        }
    }
}

impl MonteCarloConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> MonteCarloConfigBuilder {
        MonteCarloConfigBuilder::default()
    }

    /// Returns the number of trials.
    #[inline]
    pub fn n_trials(&self) -> usize {
        self.n_trials
    }

    /// Returns the batch size.
    #[inline]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Number of batches, the last one possibly partial.
    #[inline]
    pub fn n_batches(&self) -> usize {
        self.n_trials.div_ceil(self.batch_size.max(1))
    }

    /// Returns the optional seed for reproducibility.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Whether batches run in parallel.
    #[inline]
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `n_trials` is 0 (`InvalidTrialCount`)
    /// - `n_trials` is greater than [`MAX_TRIALS`] (`TooManyTrials`)
    /// - `batch_size` is 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_trials == 0 {
            return Err(ConfigError::InvalidTrialCount(self.n_trials));
        }
        if self.n_trials > MAX_TRIALS {
            return Err(ConfigError::TooManyTrials {
                requested: self.n_trials,
                max: MAX_TRIALS,
            });
        }
        if self.batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize(self.batch_size));
        }
        Ok(())
    }
}

/// Builder for [`MonteCarloConfig`].
///
/// Unset fields take the [`Default`] values: 100,000 trials in batches of
/// 10,000, entropy seeding, parallel execution.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::MonteCarloConfig;
///
/// let config = MonteCarloConfig::builder()
///     .seed(12345)
///     .parallel(false)
///     .build()
///     .expect("valid config");
/// assert_eq!(config.n_trials(), 100_000);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MonteCarloConfigBuilder {
    n_trials: Option<usize>,
    batch_size: Option<usize>,
    seed: Option<u64>,
    parallel: Option<bool>,
}

impl MonteCarloConfigBuilder {
    /// Sets the number of trials.
    ///
    /// # Arguments
    ///
    /// * `n_trials` - Number of trials in [1, 10_000_000]
    #[inline]
    pub fn n_trials(mut self, n_trials: usize) -> Self {
        self.n_trials = Some(n_trials);
        self
    }

    /// Sets the number of trials per batch.
    #[inline]
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    /// Sets the seed for reproducibility.
    ///
    /// # Arguments
    ///
    /// * `seed` - 64-bit seed value
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets an optional seed; `None` draws one from entropy per run.
    #[inline]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Enables or disables parallel batch execution.
    #[inline]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the trial count or batch size is invalid.
    pub fn build(self) -> Result<MonteCarloConfig, ConfigError> {
        let defaults = MonteCarloConfig::default();
        let config = MonteCarloConfig {
            n_trials: self.n_trials.unwrap_or(defaults.n_trials),
            batch_size: self.batch_size.unwrap_or(defaults.batch_size),
            seed: self.seed,
            parallel: self.parallel.unwrap_or(defaults.parallel),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = MonteCarloConfig::builder().build().unwrap();

        assert_eq!(config.n_trials(), DEFAULT_TRIALS);
        assert_eq!(config.batch_size(), DEFAULT_BATCH_SIZE);
        assert_eq!(config.seed(), None);
        assert!(config.parallel());
        assert_eq!(config, MonteCarloConfig::default());
    }

    #[test]
    fn test_config_builder_with_seed() {
        let config = MonteCarloConfig::builder()
            .n_trials(1000)
            .seed(42)
            .build()
            .unwrap();

        assert_eq!(config.seed(), Some(42));
        assert_eq!(
            MonteCarloConfig::builder().seed(1).maybe_seed(None).build().unwrap().seed(),
            None
        );
    }

    #[test]
    fn test_config_invalid_zero_trials() {
        let result = MonteCarloConfig::builder().n_trials(0).build();

        assert!(matches!(result, Err(ConfigError::InvalidTrialCount(0))));
    }

    #[test]
    fn test_config_invalid_too_many_trials() {
        let result = MonteCarloConfig::builder().n_trials(2 * MAX_TRIALS).build();

        assert_eq!(
            result,
            Err(ConfigError::TooManyTrials {
                requested: 2 * MAX_TRIALS,
                max: MAX_TRIALS
            })
        );
        assert!(MonteCarloConfig::builder().n_trials(MAX_TRIALS).build().is_ok());
    }

    #[test]
    fn test_config_invalid_zero_batch() {
        let result = MonteCarloConfig::builder().batch_size(0).build();

        assert!(matches!(result, Err(ConfigError::InvalidBatchSize(0))));
    }

    #[test]
    fn test_batch_count_rounds_up() {
        let config = MonteCarloConfig::builder()
            .n_trials(25_001)
            .batch_size(5_000)
            .build()
            .unwrap();
        assert_eq!(config.n_batches(), 6);

        let single = MonteCarloConfig::builder().n_trials(7).build().unwrap();
        assert_eq!(single.n_batches(), 1);
    }
}
