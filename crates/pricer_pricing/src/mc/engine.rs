//! Terminal-price Monte Carlo engine.
//!
//! Under GBM the terminal price has the closed form
//!
//! ```text
//! S_T = S·exp[(r − σ²/2)τ + σ√τ·Z],  Z ~ N(0, 1)
//! ```
//!
//! so one normal draw per trial suffices. Each draw prices both legs.

use pricer_core::types::PricingError;
use pricer_models::engine::{OptionPrices, PricingEngine};
use pricer_models::instruments::{ExerciseStyle, PayoffType};
use pricer_models::market::PricingContext;
use rayon::prelude::*;
use tracing::{debug, info};

use super::config::MonteCarloConfig;
use super::error::ConfigError;
use super::stats::RunningStats;
use crate::rng::PricerRng;

/// Estimate of one leg.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::LegEstimate;
///
/// let leg = LegEstimate { price: 10.5, std_error: 0.05 };
/// assert!((leg.confidence_95() - 0.098).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegEstimate {
    /// Discounted mean payoff.
    pub price: f64,
    /// Standard error of the price estimate.
    pub std_error: f64,
}

impl LegEstimate {
    /// Returns the 95% confidence interval half-width.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }
}

/// Call and put estimates from one simulation run.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonteCarloResult {
    /// Call leg.
    pub call: LegEstimate,
    /// Put leg.
    pub put: LegEstimate,
    /// Trials simulated.
    pub n_trials: usize,
    /// Master seed actually used, drawn from entropy when none was configured.
    pub seed: u64,
}

impl MonteCarloResult {
    /// Point estimates only.
    #[inline]
    pub fn prices(&self) -> OptionPrices {
        OptionPrices::new(self.call.price, self.put.price)
    }

    /// Estimate for one leg.
    #[inline]
    pub fn leg(&self, payoff: PayoffType) -> LegEstimate {
        match payoff {
            PayoffType::Call => self.call,
            PayoffType::Put => self.put,
        }
    }
}

/// Per-batch payoff accumulators.
#[derive(Clone, Copy, Debug, Default)]
struct BatchStats {
    call: RunningStats,
    put: RunningStats,
}

impl BatchStats {
    fn merge(&mut self, other: &BatchStats) {
        self.call.merge(&other.call);
        self.put.merge(&other.put);
    }

    fn into_result(self, discount: f64, n_trials: usize, seed: u64) -> MonteCarloResult {
        let leg = |stats: &RunningStats| LegEstimate {
            price: discount * stats.mean(),
            std_error: discount * stats.std_error(),
        };
        MonteCarloResult {
            call: leg(&self.call),
            put: leg(&self.put),
            n_trials,
            seed,
        }
    }
}

/// Terminal distribution parameters shared by every batch.
#[derive(Clone, Copy, Debug)]
struct Terminal {
    spot: f64,
    strike: f64,
    drift: f64,
    diffusion: f64,
}

impl Terminal {
    /// Fails with `DegenerateParameters` when σ√τ is zero or not finite.
    fn from_context(ctx: &PricingContext) -> Result<Self, PricingError> {
        let diffusion = ctx
            .vol_sqrt_expiry()
            .ok_or(PricingError::DegenerateParameters {
                volatility: ctx.volatility(),
                expiry: ctx.expiry(),
            })?;
        let sigma = ctx.volatility();
        Ok(Self {
            spot: ctx.spot(),
            strike: ctx.strike(),
            drift: (ctx.rate() - 0.5 * sigma * sigma) * ctx.expiry(),
            diffusion,
        })
    }

    #[inline]
    fn price(&self, z: f64) -> f64 {
        self.spot * (self.drift + self.diffusion * z).exp()
    }
}

/// Monte Carlo pricer for vanilla calls and puts.
///
/// Trials are split into fixed-size batches. Batch `i` draws from
/// `PricerRng::for_stream(seed, i)` and batch statistics are merged in index
/// order, so a seeded run returns the same numbers for any thread count and
/// with parallelism switched off.
///
/// The terminal drift is `(r − σ²/2)τ` and ignores the context's dividend
/// yield. For q > 0 the estimates therefore differ from the closed-form
/// engine and do not satisfy the q-adjusted parity `S·e^(−qτ) − K·e^(−rτ)`.
///
/// # Examples
///
/// ```rust
/// use pricer_models::market::PricingContext;
/// use pricer_pricing::mc::{MonteCarloConfig, MonteCarloEngine};
///
/// let ctx = PricingContext::builder()
///     .spot(300.0).strike(300.0).rate(0.02).volatility(0.4).expiry(0.25)
///     .build()
///     .unwrap();
///
/// let engine = MonteCarloEngine::new(
///     MonteCarloConfig::builder().n_trials(20_000).seed(7).build().unwrap(),
/// ).unwrap();
///
/// let first = engine.simulate(&ctx).unwrap();
/// let second = engine.simulate(&ctx).unwrap();
/// assert_eq!(first, second);
/// assert!(first.call.price > 0.0 && first.put.price > 0.0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MonteCarloEngine {
    config: MonteCarloConfig,
}

impl MonteCarloEngine {
    /// Creates an engine from a configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration fails validation.
    pub fn new(config: MonteCarloConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Default configuration with `n_trials` trials.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidTrialCount` for 0, `ConfigError::TooManyTrials`
    /// above `MAX_TRIALS`.
    pub fn with_trials(n_trials: usize) -> Result<Self, ConfigError> {
        Self::new(MonteCarloConfig::builder().n_trials(n_trials).build()?)
    }

    /// Returns the engine configuration.
    #[inline]
    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Simulates both legs with their standard errors.
    ///
    /// # Errors
    ///
    /// `PricingError::DegenerateParameters` when σ√τ is zero or not finite;
    /// checked before any sampling.
    pub fn simulate(&self, ctx: &PricingContext) -> Result<MonteCarloResult, PricingError> {
        let terminal = Terminal::from_context(ctx)?;

        let seed = self.config.seed().unwrap_or_else(rand::random);
        let n_trials = self.config.n_trials();
        let batch_size = self.config.batch_size();
        let n_batches = self.config.n_batches();
        debug!(
            n_trials,
            n_batches,
            seed,
            parallel = self.config.parallel(),
            "Starting Monte Carlo simulation"
        );

        let run = |index: usize| {
            let start = index * batch_size;
            let len = batch_size.min(n_trials - start);
            simulate_batch(&terminal, seed, index, len)
        };
        let batches: Vec<BatchStats> = if self.config.parallel() {
            (0..n_batches).into_par_iter().map(run).collect()
        } else {
            (0..n_batches).map(run).collect()
        };

        let mut total = BatchStats::default();
        for batch in &batches {
            total.merge(batch);
        }

        let result = total.into_result(ctx.discount_factor(), n_trials, seed);

        info!(
            call = result.call.price,
            call_std_error = result.call.std_error,
            put = result.put.price,
            put_std_error = result.put.std_error,
            n_trials,
            seed,
            "Monte Carlo prices"
        );
        Ok(result)
    }

    /// Simulates with a caller-owned generator on the current thread.
    ///
    /// The configured seed and batching are ignored; all trials draw from
    /// `rng` in order. `MonteCarloResult::seed` reports `rng.seed()`.
    ///
    /// # Errors
    ///
    /// `PricingError::DegenerateParameters` as for [`simulate`](Self::simulate).
    pub fn simulate_with_rng(
        &self,
        ctx: &PricingContext,
        rng: &mut PricerRng,
    ) -> Result<MonteCarloResult, PricingError> {
        let terminal = Terminal::from_context(ctx)?;

        let n_trials = self.config.n_trials();
        let mut stats = BatchStats::default();
        let mut buffer = vec![0.0; self.config.batch_size().min(n_trials)];
        let mut remaining = n_trials;
        while remaining > 0 {
            let len = remaining.min(buffer.len());
            rng.fill_normal(&mut buffer[..len]);
            accumulate(&terminal, &buffer[..len], &mut stats);
            remaining -= len;
        }

        Ok(stats.into_result(ctx.discount_factor(), n_trials, rng.seed()))
    }
}

fn simulate_batch(terminal: &Terminal, seed: u64, index: usize, len: usize) -> BatchStats {
    let mut rng = PricerRng::for_stream(seed, index as u64);
    let mut normals = vec![0.0; len];
    rng.fill_normal(&mut normals);

    let mut stats = BatchStats::default();
    accumulate(terminal, &normals, &mut stats);
    stats
}

#[inline]
fn accumulate(terminal: &Terminal, normals: &[f64], stats: &mut BatchStats) {
    for &z in normals {
        let s_t = terminal.price(z);
        stats.call.push(PayoffType::Call.evaluate(s_t, terminal.strike));
        stats.put.push(PayoffType::Put.evaluate(s_t, terminal.strike));
    }
}

impl PricingEngine for MonteCarloEngine {
    fn name(&self) -> &'static str {
        "monte-carlo"
    }

    /// Labelled American; the payoff is still evaluated at expiry only.
    fn exercise_style(&self) -> ExerciseStyle {
        ExerciseStyle::American
    }

    fn price(&self, ctx: &PricingContext) -> Result<OptionPrices, PricingError> {
        Ok(self.simulate(ctx)?.prices())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_models::analytical::AnalyticEuropeanEngine;

    fn ctx(vol: f64, expiry: f64) -> PricingContext {
        PricingContext::builder()
            .spot(100.0)
            .strike(100.0)
            .rate(0.05)
            .volatility(vol)
            .expiry(expiry)
            .build()
            .unwrap()
    }

    fn engine(n_trials: usize, seed: u64, parallel: bool) -> MonteCarloEngine {
        MonteCarloEngine::new(
            MonteCarloConfig::builder()
                .n_trials(n_trials)
                .batch_size(1_000)
                .seed(seed)
                .parallel(parallel)
                .build()
                .unwrap(),
        )
        .unwrap()
    }

    // ==========================================================
    // Construction
    // ==========================================================

    #[test]
    fn test_default_engine_uses_100k_trials() {
        let engine = MonteCarloEngine::default();
        assert_eq!(engine.config().n_trials(), 100_000);
    }

    #[test]
    fn test_zero_trials_rejected() {
        assert!(matches!(
            MonteCarloEngine::with_trials(0),
            Err(ConfigError::InvalidTrialCount(0))
        ));
        let err: PricingError = MonteCarloEngine::with_trials(0).unwrap_err().into();
        assert_eq!(err, PricingError::InvalidTrialCount(0));
    }

    #[test]
    fn test_engine_metadata() {
        let engine = MonteCarloEngine::default();
        assert_eq!(engine.name(), "monte-carlo");
        assert!(engine.exercise_style().is_american());
    }

    // ==========================================================
    // Degenerate inputs
    // ==========================================================

    #[test]
    fn test_zero_volatility_rejected_before_sampling() {
        let err = engine(1_000, 1, false).simulate(&ctx(0.0, 1.0)).unwrap_err();
        assert_eq!(
            err,
            PricingError::DegenerateParameters {
                volatility: 0.0,
                expiry: 1.0
            }
        );

        let mut rng = PricerRng::from_seed(1);
        let before = rng.clone().gen_normal();
        assert!(engine(1_000, 1, false)
            .simulate_with_rng(&ctx(0.0, 1.0), &mut rng)
            .is_err());
        assert_eq!(rng.gen_normal(), before);
    }

    // ==========================================================
    // Reproducibility
    // ==========================================================

    #[test]
    fn test_parallel_matches_sequential() {
        let c = ctx(0.2, 1.0);
        let par = engine(25_500, 99, true).simulate(&c).unwrap();
        let seq = engine(25_500, 99, false).simulate(&c).unwrap();
        assert_eq!(par, seq);
        assert_eq!(par.n_trials, 25_500);
        assert_eq!(par.seed, 99);
    }

    #[test]
    fn test_different_seeds_differ() {
        let c = ctx(0.2, 1.0);
        let a = engine(5_000, 1, false).simulate(&c).unwrap();
        let b = engine(5_000, 2, false).simulate(&c).unwrap();
        assert_ne!(a.call.price, b.call.price);
    }

    #[test]
    fn test_unseeded_run_reports_its_seed() {
        let c = ctx(0.2, 1.0);
        let engine = MonteCarloEngine::new(
            MonteCarloConfig::builder().n_trials(2_000).build().unwrap(),
        )
        .unwrap();
        let first = engine.simulate(&c).unwrap();
        let replay = MonteCarloEngine::new(
            MonteCarloConfig::builder().n_trials(2_000).seed(first.seed).build().unwrap(),
        )
        .unwrap()
        .simulate(&c)
        .unwrap();
        assert_eq!(first, replay);
    }

    #[test]
    fn test_simulate_with_rng_is_deterministic() {
        let c = ctx(0.2, 1.0);
        let e = engine(10_000, 0, false);
        let a = e.simulate_with_rng(&c, &mut PricerRng::from_seed(5)).unwrap();
        let b = e.simulate_with_rng(&c, &mut PricerRng::from_seed(5)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.seed, 5);
    }

    // ==========================================================
    // Accuracy
    // ==========================================================

    #[test]
    fn test_close_to_analytic() {
        let c = ctx(0.2, 1.0);
        let exact = AnalyticEuropeanEngine.price(&c).unwrap();
        let mc = engine(100_000, 42, true).simulate(&c).unwrap();

        assert!((mc.call.price - exact.call).abs() < 4.0 * mc.call.std_error);
        assert!((mc.put.price - exact.put).abs() < 4.0 * mc.put.std_error);
    }

    #[test]
    fn test_std_error_positive_and_small() {
        let mc = engine(50_000, 3, true).simulate(&ctx(0.2, 1.0)).unwrap();
        assert!(mc.call.std_error > 0.0);
        assert!(mc.call.std_error < mc.call.price * 0.1);
        assert_relative_eq!(mc.call.confidence_95(), 1.96 * mc.call.std_error);
    }

    #[test]
    fn test_same_samples_give_near_parity() {
        // Shared draws make C − P track the sampled forward closely.
        let c = ctx(0.2, 1.0);
        let mc = engine(200_000, 11, true).simulate(&c).unwrap();
        let rhs = c.spot() - c.strike() * c.discount_factor();
        assert!(((mc.call.price - mc.put.price) - rhs).abs() < 0.25);
    }

    #[test]
    fn test_trait_price_matches_simulate() {
        let c = ctx(0.3, 0.5);
        let e = engine(8_000, 21, true);
        let via_trait = PricingEngine::price(&e, &c).unwrap();
        assert_eq!(via_trait, e.simulate(&c).unwrap().prices());
        assert_eq!(e.simulate(&c).unwrap().leg(PayoffType::Put).price, via_trait.put);
    }
}
