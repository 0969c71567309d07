//! Monte Carlo convergence against the closed-form engine.
//!
//! # Test Categories
//!
//! 1. **Scenario accuracy**: N = 200,000 within 2% of analytic across seeds
//! 2. **Convergence rate**: standard error shrinks as 1/√N
//! 3. **Shared context**: both engines behind `PricingEngine`

use approx::assert_relative_eq;
use pricer_core::types::PricingError;
use pricer_models::analytical::AnalyticEuropeanEngine;
use pricer_models::engine::PricingEngine;
use pricer_models::market::PricingContext;
use pricer_models::parity::ParityChecker;
use pricer_pricing::mc::{MonteCarloConfig, MonteCarloEngine};

fn scenario() -> PricingContext {
    // S=300, K=300, r=2%, q=0, σ=40%, τ=0.25
    PricingContext::builder()
        .spot(300.0)
        .strike(300.0)
        .rate(0.02)
        .volatility(0.4)
        .expiry(0.25)
        .build()
        .unwrap()
}

fn seeded(n_trials: usize, seed: u64) -> MonteCarloEngine {
    MonteCarloEngine::new(
        MonteCarloConfig::builder()
            .n_trials(n_trials)
            .seed(seed)
            .build()
            .unwrap(),
    )
    .unwrap()
}

// ============================================================================
// Scenario accuracy
// ============================================================================

#[test]
fn test_200k_trials_within_two_percent_across_seeds() {
    let ctx = scenario();
    let exact = AnalyticEuropeanEngine.price(&ctx).unwrap();

    for seed in [1, 7, 42, 2024, 31_337] {
        let mc = seeded(200_000, seed).simulate(&ctx).unwrap();
        let call_err = (mc.call.price - exact.call).abs() / exact.call;
        let put_err = (mc.put.price - exact.put).abs() / exact.put;
        assert!(call_err < 0.02, "seed {seed}: call error {call_err}");
        assert!(put_err < 0.02, "seed {seed}: put error {put_err}");
    }
}

#[test]
fn test_dividend_yield_left_out_of_drift() {
    // S=K=100, r=q=5%, σ=20%, τ=1
    let with_q = PricingContext::builder()
        .spot(100.0)
        .strike(100.0)
        .rate(0.05)
        .dividend_yield(0.05)
        .volatility(0.2)
        .expiry(1.0)
        .build()
        .unwrap();
    let without_q = PricingContext::builder()
        .spot(100.0)
        .strike(100.0)
        .rate(0.05)
        .volatility(0.2)
        .expiry(1.0)
        .build()
        .unwrap();

    let engine = seeded(1_000_000, 1);
    let mc = engine.simulate(&with_q).unwrap();
    assert_eq!(mc, engine.simulate(&without_q).unwrap());

    // Shared draws: C − P tracks S − K·e^(−rτ), not S·e^(−qτ) − K·e^(−rτ)
    let forward = with_q.spot() - with_q.strike() * with_q.discount_factor();
    let diff = mc.call.price - mc.put.price;
    assert!((diff - forward).abs() < 0.15, "C - P = {diff}, expected {forward}");
    assert!(!ParityChecker::new(0.5).unwrap().check(&with_q, &mc.prices()).passed);

    let exact = AnalyticEuropeanEngine.price(&without_q).unwrap();
    assert!((mc.call.price - exact.call).abs() < 4.0 * mc.call.std_error);
    assert!((mc.put.price - exact.put).abs() < 4.0 * mc.put.std_error);
}

// ============================================================================
// Convergence rate
// ============================================================================

#[test]
fn test_std_error_shrinks_as_inverse_sqrt_n() {
    let ctx = scenario();
    let small = seeded(10_000, 5).simulate(&ctx).unwrap();
    let large = seeded(1_000_000, 5).simulate(&ctx).unwrap();

    // 100x trials → 10x smaller error
    let ratio = small.call.std_error / large.call.std_error;
    assert_relative_eq!(ratio, 10.0, max_relative = 0.1);
    let ratio = small.put.std_error / large.put.std_error;
    assert_relative_eq!(ratio, 10.0, max_relative = 0.1);
}

#[test]
fn test_estimates_converge_to_analytic() {
    let ctx = scenario();
    let exact = AnalyticEuropeanEngine.price(&ctx).unwrap();

    for n_trials in [1_000, 100_000, 1_000_000] {
        let mc = seeded(n_trials, 123).simulate(&ctx).unwrap();
        assert!(
            (mc.call.price - exact.call).abs() < 4.0 * mc.call.std_error,
            "N = {n_trials}: {} vs {} (se {})",
            mc.call.price,
            exact.call,
            mc.call.std_error
        );
    }
}

// ============================================================================
// Shared context
// ============================================================================

#[test]
fn test_both_engines_price_the_same_context() {
    let ctx = scenario();
    let engines: Vec<Box<dyn PricingEngine>> =
        vec![Box::new(AnalyticEuropeanEngine), Box::new(seeded(200_000, 3))];
    let checker = ParityChecker::new(0.5).unwrap();

    for engine in &engines {
        let prices = engine.price(&ctx).unwrap();
        assert!(prices.call > 0.0 && prices.put > 0.0, "{}", engine.name());
        assert!(checker.check(&ctx, &prices).passed, "{}", engine.name());
    }
}

#[test]
fn test_degenerate_context_rejected_by_both_engines() {
    let ctx = PricingContext::builder()
        .spot(100.0)
        .strike(100.0)
        .rate(0.05)
        .volatility(0.0)
        .expiry(1.0)
        .build()
        .unwrap();

    let analytic = PricingEngine::price(&AnalyticEuropeanEngine, &ctx).unwrap_err();
    let mc = seeded(1_000, 1).price(&ctx).unwrap_err();
    assert!(matches!(analytic, PricingError::DegenerateParameters { .. }));
    assert_eq!(analytic, mc);
}
