//! Price command implementation
//!
//! Estimates market parameters from a CSV history, prices the contract with
//! the selected engines and checks put-call parity for each.

use std::fmt;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use pricer_core::market_data::FixedRate;
use pricer_core::types::{Date, PricingError};
use pricer_models::analytical::AnalyticEuropeanEngine;
use pricer_models::engine::{OptionPrices, PricingEngine};
use pricer_models::instruments::OptionContract;
use pricer_models::market::{PricingContext, PricingSession};
use pricer_models::parity::{ParityChecker, ParityReport};
use pricer_pricing::mc::{LegEstimate, MonteCarloEngine};
use serde::Serialize;
use tracing::info;

use crate::config::CliConfig;
use crate::providers::CsvPriceHistory;
use crate::{CliError, Result};

/// Which engines to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EngineChoice {
    /// Closed-form Black-Scholes-Merton
    Analytic,
    /// Terminal-price simulation
    MonteCarlo,
    /// Both, analytic first
    Both,
}

impl EngineChoice {
    fn analytic(self) -> bool {
        matches!(self, EngineChoice::Analytic | EngineChoice::Both)
    }

    fn monte_carlo(self) -> bool {
        matches!(self, EngineChoice::MonteCarlo | EngineChoice::Both)
    }
}

/// Output rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Arguments of `option-pricer price`.
#[derive(Debug, Args)]
pub struct PriceArgs {
    /// Underlying ticker
    #[arg(short, long)]
    pub ticker: String,

    /// Strike price
    #[arg(short = 'k', long)]
    pub strike: f64,

    /// Expiry date (YYYY-MM-DD)
    #[arg(short, long)]
    pub expiry: Date,

    /// Continuous dividend yield (decimal)
    #[arg(short, long, default_value_t = 0.0)]
    pub dividend: f64,

    /// CSV file with `date,close` rows
    #[arg(long)]
    pub history: PathBuf,

    /// First history date to use (default: look-back window before valuation)
    #[arg(long)]
    pub history_start: Option<Date>,

    /// Risk-free rate in percent (overrides the configuration)
    #[arg(short, long, allow_negative_numbers = true)]
    pub rate: Option<f64>,

    /// Engines to run
    #[arg(long, value_enum, default_value_t = EngineChoice::Both)]
    pub engine: EngineChoice,

    /// Monte Carlo trials
    #[arg(short = 'n', long)]
    pub trials: Option<usize>,

    /// Monte Carlo seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Absolute parity tolerance in price units
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Valuation date (YYYY-MM-DD, default: today)
    #[arg(long)]
    pub valuation_date: Option<Date>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// One engine's output.
#[derive(Debug, Clone, Serialize)]
pub struct EngineReport {
    pub engine: &'static str,
    pub exercise: String,
    pub call: f64,
    pub put: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_estimate: Option<LegEstimate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put_estimate: Option<LegEstimate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub parity: ParityReport,
}

impl EngineReport {
    fn new<E: PricingEngine>(engine: &E, prices: OptionPrices, parity: ParityReport) -> Self {
        Self {
            engine: engine.name(),
            exercise: engine.exercise_style().to_string(),
            call: prices.call,
            put: prices.put,
            call_estimate: None,
            put_estimate: None,
            seed: None,
            parity,
        }
    }
}

/// Everything printed by one run.
#[derive(Debug, Clone, Serialize)]
pub struct PricingReport {
    pub ticker: String,
    pub valuation_date: Date,
    pub expiry: Date,
    pub context: PricingContext,
    pub results: Vec<EngineReport>,
}

/// Run the price command
pub fn run(args: &PriceArgs, config: &CliConfig) -> Result<()> {
    let report = build_report(args, config)?;
    let output = match args.format {
        OutputFormat::Table => report.to_string(),
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
    };
    println!("{output}");
    Ok(())
}

/// Estimates the context and prices it with every selected engine.
pub fn build_report(args: &PriceArgs, config: &CliConfig) -> Result<PricingReport> {
    let valuation_date = args.valuation_date.unwrap_or_else(Date::today);
    let contract = OptionContract::new(args.ticker.as_str(), args.strike, args.expiry)
        .and_then(|c| c.with_dividend_yield(args.dividend))
        .map_err(PricingError::from)?;

    let rate_percent = args.rate.or(config.rate_percent).ok_or_else(|| {
        CliError::InvalidArgument(
            "no risk-free rate: pass --rate or set rate_percent in the configuration".to_string(),
        )
    })?;
    let tolerance = args.tolerance.unwrap_or(config.parity_tolerance);
    let checker = ParityChecker::new(tolerance)?;

    let history = CsvPriceHistory::open(&args.history)?;
    let mut session = PricingSession::new(history, FixedRate::new(rate_percent), valuation_date)
        .with_estimator_config(config.estimator()?);
    if let Some(start) = args.history_start {
        session = session.with_history_start(start);
    }
    let ctx = session.build_context(&contract)?;

    let mut results = Vec::new();
    if args.engine.analytic() {
        let engine = AnalyticEuropeanEngine;
        let prices = PricingEngine::price(&engine, &ctx)?;
        results.push(EngineReport::new(&engine, prices, checker.check(&ctx, &prices)));
    }
    if args.engine.monte_carlo() {
        let engine = MonteCarloEngine::new(config.monte_carlo(args.trials, args.seed)?)
            .map_err(PricingError::from)?;
        let result = engine.simulate(&ctx)?;
        let prices = result.prices();
        results.push(EngineReport {
            call_estimate: Some(result.call),
            put_estimate: Some(result.put),
            seed: Some(result.seed),
            ..EngineReport::new(&engine, prices, checker.check(&ctx, &prices))
        });
    }

    for r in &results {
        info!(
            engine = r.engine,
            lhs = r.parity.lhs,
            rhs = r.parity.rhs,
            passed = r.parity.passed,
            "Put-call parity"
        );
    }

    Ok(PricingReport {
        ticker: contract.ticker().to_string(),
        valuation_date,
        expiry: contract.expiry(),
        context: ctx,
        results,
    })
}

/// Fixed-width table used by `--format table`.
impl fmt::Display for PricingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ctx = &self.context;
        writeln!(
            f,
            "{} K={:.2} expiry={} valuation={}",
            self.ticker,
            ctx.strike(),
            self.expiry,
            self.valuation_date
        )?;
        writeln!(
            f,
            "S={:.4} σ={:.4} r={:.4} q={:.4} τ={:.4}",
            ctx.spot(),
            ctx.volatility(),
            ctx.rate(),
            ctx.dividend_yield(),
            ctx.expiry()
        )?;
        writeln!(f, "┌──────────────────────┬──────────────┬──────────────┬──────────┐")?;
        writeln!(f, "│ Engine               │ Call         │ Put          │ Parity   │")?;
        writeln!(f, "├──────────────────────┼──────────────┼──────────────┼──────────┤")?;
        for r in &self.results {
            let verdict = if r.parity.passed { "ok" } else { "FAIL" };
            writeln!(
                f,
                "│ {:<20} │ {:>12.4} │ {:>12.4} │ {:<8} │",
                r.engine, r.call, r.put, verdict
            )?;
            if let (Some(call), Some(put)) = (r.call_estimate, r.put_estimate) {
                writeln!(
                    f,
                    "│ {:<20} │ {:>12.4} │ {:>12.4} │ {:<8} │",
                    "  ±95%",
                    call.confidence_95(),
                    put.confidence_95(),
                    ""
                )?;
            }
        }
        writeln!(f, "└──────────────────────┴──────────────┴──────────────┴──────────┘")?;
        for r in &self.results {
            writeln!(
                f,
                "{}: C − P = {:.6}, S·e^(−qτ) − K·e^(−rτ) = {:.6}, |diff| = {:.2e} (tol {})",
                r.engine,
                r.parity.lhs,
                r.parity.rhs,
                r.parity.difference.abs(),
                r.parity.tolerance
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn valuation() -> Date {
        Date::from_ymd(2024, 3, 1).unwrap()
    }

    /// Closes alternating 100 / 102 on the 40 business days before valuation.
    fn history_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "date,close").unwrap();
        for i in 0..40u32 {
            let date = valuation().sub_business_days(40 - i).unwrap();
            let close = if i % 2 == 0 { 100.0 } else { 102.0 };
            writeln!(file, "{date},{close}").unwrap();
        }
        file
    }

    fn args(history: PathBuf) -> PriceArgs {
        PriceArgs {
            ticker: "ACME".to_string(),
            strike: 100.0,
            expiry: Date::from_ymd(2024, 9, 1).unwrap(),
            dividend: 0.0,
            history,
            history_start: None,
            rate: Some(2.0),
            engine: EngineChoice::Both,
            trials: Some(100_000),
            seed: Some(42),
            tolerance: None,
            valuation_date: Some(valuation()),
            format: OutputFormat::Table,
        }
    }

    #[test]
    fn test_both_engines_reported() {
        let file = history_file();
        let report = build_report(&args(file.path().to_path_buf()), &CliConfig::default()).unwrap();

        assert_eq!(report.results.len(), 2);
        assert_eq!(report.results[0].engine, "black-scholes-merton");
        assert_eq!(report.results[1].engine, "monte-carlo");
        assert_eq!(report.results[1].seed, Some(42));
        assert!(report.results.iter().all(|r| r.parity.passed));
        assert_eq!(report.context.spot(), 102.0);
        assert!((report.context.rate() - 0.02).abs() < 1e-15);
    }

    #[test]
    fn test_analytic_only() {
        let file = history_file();
        let mut a = args(file.path().to_path_buf());
        a.engine = EngineChoice::Analytic;
        let report = build_report(&a, &CliConfig::default()).unwrap();
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].call_estimate, None);
    }

    #[test]
    fn test_rate_from_config_when_flag_absent() {
        let file = history_file();
        let mut a = args(file.path().to_path_buf());
        a.rate = None;
        let err = build_report(&a, &CliConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));

        let config = CliConfig {
            rate_percent: Some(3.0),
            ..Default::default()
        };
        let report = build_report(&a, &config).unwrap();
        assert!((report.context.rate() - 0.03).abs() < 1e-15);
    }

    #[test]
    fn test_expired_contract_is_invalid_expiry() {
        let file = history_file();
        let mut a = args(file.path().to_path_buf());
        a.expiry = valuation();
        let err = build_report(&a, &CliConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::Pricing(PricingError::InvalidExpiry(_))));
    }

    #[test]
    fn test_table_mentions_engines_and_verdict() {
        let file = history_file();
        let report = build_report(&args(file.path().to_path_buf()), &CliConfig::default()).unwrap();
        let table = report.to_string();
        assert!(table.contains("black-scholes-merton"));
        assert!(table.contains("monte-carlo"));
        assert!(table.contains(" ok "));

        let half_width = report.results[1].call_estimate.unwrap().confidence_95();
        let ci_row = table.lines().find(|l| l.contains("±95%")).unwrap();
        assert!(ci_row.contains(&format!("{:.4}", half_width)), "{ci_row}");
    }

    #[test]
    fn test_json_report_shape() {
        let file = history_file();
        let report = build_report(&args(file.path().to_path_buf()), &CliConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["ticker"], "ACME");
        assert_eq!(value["results"][0]["parity"]["passed"], true);
        assert!(value["results"][0].get("call_estimate").is_none());
        assert!(value["results"][1]["call_estimate"]["std_error"].is_f64());
        assert_eq!(value["results"][1]["call"], value["results"][1]["call_estimate"]["price"]);
    }
}
