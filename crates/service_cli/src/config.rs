//! Command line configuration.
//!
//! Loaded from an optional TOML file, then overridden by `OPTION_PRICER_*`
//! environment variables. Command line flags override both at the point of
//! use.

use pricer_models::market::{EstimatorConfig, DEFAULT_LOOK_BACK_WINDOW};
use pricer_pricing::mc::{MonteCarloConfig, DEFAULT_BATCH_SIZE, DEFAULT_TRIALS};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// File read when no `--config` is given, if present.
pub const DEFAULT_CONFIG_FILE: &str = "option-pricer.toml";

/// Prefix of the environment overrides.
pub const ENV_PREFIX: &str = "OPTION_PRICER_";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable {name}={value} could not be parsed")]
    EnvError { name: String, value: String },

    #[error("Invalid configuration value '{name}': {value}")]
    Invalid { name: &'static str, value: String },
}

/// Effective settings for a pricing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Monte Carlo trials
    pub trials: usize,
    /// Monte Carlo trials per seeded batch
    pub batch_size: usize,
    /// Monte Carlo master seed; entropy when absent
    pub seed: Option<u64>,
    /// Run Monte Carlo batches on all cores
    pub parallel: bool,
    /// Absolute put-call parity tolerance in price units
    pub parity_tolerance: f64,
    /// Volatility look-back window in returns
    pub look_back_window: usize,
    /// Reference rate in percent, used when `--rate` is absent
    pub rate_percent: Option<f64>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            batch_size: DEFAULT_BATCH_SIZE,
            seed: None,
            parallel: true,
            parity_tolerance: 0.5,
            look_back_window: DEFAULT_LOOK_BACK_WINDOW,
            rate_percent: None,
        }
    }
}

impl CliConfig {
    /// Loads file, applies process environment, validates.
    ///
    /// An explicit `path` must exist; without one, [`DEFAULT_CONFIG_FILE`] is
    /// read only if it is present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.apply_env_with(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML file; unspecified keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), "Loaded configuration file");
        toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Overrides fields from `OPTION_PRICER_*` variables found by `lookup`.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = parse_env(&lookup, "TRIALS")? {
            self.trials = v;
        }
        if let Some(v) = parse_env(&lookup, "BATCH_SIZE")? {
            self.batch_size = v;
        }
        if let Some(v) = parse_env(&lookup, "SEED")? {
            self.seed = Some(v);
        }
        if let Some(v) = parse_env(&lookup, "PARALLEL")? {
            self.parallel = v;
        }
        if let Some(v) = parse_env(&lookup, "TOLERANCE")? {
            self.parity_tolerance = v;
        }
        if let Some(v) = parse_env(&lookup, "LOOK_BACK_WINDOW")? {
            self.look_back_window = v;
        }
        if let Some(v) = parse_env(&lookup, "RATE")? {
            self.rate_percent = Some(v);
        }
        Ok(())
    }

    /// Validates every field against the engine builders.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.monte_carlo(None, None)?;
        self.estimator()?;
        if !(self.parity_tolerance >= 0.0 && self.parity_tolerance.is_finite()) {
            return Err(ConfigError::Invalid {
                name: "parity_tolerance",
                value: self.parity_tolerance.to_string(),
            });
        }
        if let Some(rate) = self.rate_percent.filter(|r| !r.is_finite()) {
            return Err(ConfigError::Invalid {
                name: "rate_percent",
                value: rate.to_string(),
            });
        }
        Ok(())
    }

    /// Monte Carlo configuration with optional flag overrides.
    pub fn monte_carlo(
        &self,
        trials: Option<usize>,
        seed: Option<u64>,
    ) -> Result<MonteCarloConfig, ConfigError> {
        MonteCarloConfig::builder()
            .n_trials(trials.unwrap_or(self.trials))
            .batch_size(self.batch_size)
            .maybe_seed(seed.or(self.seed))
            .parallel(self.parallel)
            .build()
            .map_err(|e| ConfigError::Invalid {
                name: "monte carlo",
                value: e.to_string(),
            })
    }

    /// Estimator configuration.
    pub fn estimator(&self) -> Result<EstimatorConfig, ConfigError> {
        EstimatorConfig::builder()
            .look_back_window(self.look_back_window)
            .build()
            .map_err(|e| ConfigError::Invalid {
                name: "look_back_window",
                value: e.to_string(),
            })
    }
}

fn parse_env<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let name = format!("{ENV_PREFIX}{key}");
    match lookup(&name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvError { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.trials, 100_000);
        assert_eq!(config.look_back_window, 252);
        assert_eq!(config.seed, None);
        assert!(config.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_deserialization() {
        let config: CliConfig = toml::from_str("trials = 5000\nseed = 9").unwrap();
        assert_eq!(config.trials, 5_000);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.parity_tolerance, 0.5);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(toml::from_str::<CliConfig>("n_paths = 10").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = CliConfig::default();
        config
            .apply_env_with(env(&[
                ("OPTION_PRICER_TRIALS", "2000"),
                ("OPTION_PRICER_SEED", "17"),
                ("OPTION_PRICER_PARALLEL", "false"),
                ("OPTION_PRICER_RATE", "2.5"),
            ]))
            .unwrap();
        assert_eq!(config.trials, 2_000);
        assert_eq!(config.seed, Some(17));
        assert!(!config.parallel);
        assert_eq!(config.rate_percent, Some(2.5));
    }

    #[test]
    fn test_bad_env_value_named_in_error() {
        let mut config = CliConfig::default();
        let err = config
            .apply_env_with(env(&[("OPTION_PRICER_TRIALS", "many")]))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Environment variable OPTION_PRICER_TRIALS=many could not be parsed"
        );
    }

    #[test]
    fn test_zero_trials_invalid() {
        let config = CliConfig {
            trials: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { name: "monte carlo", .. })
        ));
    }

    #[test]
    fn test_negative_tolerance_invalid() {
        let config = CliConfig {
            parity_tolerance: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_flag_overrides_win() {
        let config = CliConfig {
            trials: 1_000,
            seed: Some(1),
            ..Default::default()
        };
        let mc = config.monte_carlo(Some(3_000), Some(2)).unwrap();
        assert_eq!(mc.n_trials(), 3_000);
        assert_eq!(mc.seed(), Some(2));

        let mc = config.monte_carlo(None, None).unwrap();
        assert_eq!(mc.n_trials(), 1_000);
        assert_eq!(mc.seed(), Some(1));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "look_back_window = 60\nrate_percent = 1.75").unwrap();
        let config = CliConfig::from_file(file.path()).unwrap();
        assert_eq!(config.look_back_window, 60);
        assert_eq!(config.rate_percent, Some(1.75));
        assert_eq!(config.estimator().unwrap().look_back_window(), 60);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let err = CliConfig::load(Some(Path::new("/nonexistent/option-pricer.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::FileError(_)));
    }
}
