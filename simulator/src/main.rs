//! QuoteDesk Simulator
//!
//! Runs reference quote scenarios and ad-hoc quotes against a configuration
//! snapshot.

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quotedesk_common::{ChannelSlug, ConfigSnapshot, Direction};
use quotedesk_engine::{EngineConfig, QuoteEngine, QuoteRequest};

mod controller;
mod demo;
mod metrics;
mod scenario;

use controller::ScenarioRunner;
use scenario::Scenario;

/// QuoteDesk Simulator CLI
#[derive(Parser, Debug)]
#[command(name = "quotedesk-sim")]
#[command(about = "QuoteDesk quote calculator and scenario runner")]
struct Args {
    /// Configuration snapshot (JSON). Uses the built-in demo when omitted
    #[arg(long)]
    snapshot: Option<std::path::PathBuf>,

    /// Scenario to run (scenario-a .. scenario-e, or all)
    #[arg(short, long)]
    scenario: Option<String>,

    /// Gross amount in the channel's balance currency
    #[arg(short, long, default_value = "100")]
    amount: f64,

    /// Payout currency code
    #[arg(short, long, default_value = "VES")]
    currency: String,

    /// Channel slug; the primary channel when omitted
    #[arg(long)]
    channel: Option<String>,

    /// SELL or BUY
    #[arg(short, long, default_value = "SELL")]
    direction: String,

    /// Coupon code
    #[arg(long)]
    coupon: Option<String>,

    /// Emit JSON logs and JSON output
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
    );
    if args.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    info!("Starting QuoteDesk Simulator");

    let config = EngineConfig::from_env();
    config.validate()?;
    let mut runner = ScenarioRunner::new(QuoteEngine::new(config));

    if let Some(name) = &args.scenario {
        return run_scenarios(&mut runner, name, args.json);
    }

    let snapshot = match &args.snapshot {
        Some(path) => {
            info!("Loading snapshot from {}", path.display());
            ConfigSnapshot::from_path(path)?
        }
        None => demo::demo_snapshot(),
    };

    let direction: Direction = args.direction.parse()?;
    let mut request = QuoteRequest::new(args.amount, args.currency.as_str()).direction(direction);
    if let Some(channel) = &args.channel {
        request = request.on_channel(ChannelSlug::new(channel.as_str()));
    }
    if let Some(coupon) = &args.coupon {
        request = request.with_coupon(coupon.as_str());
    }

    let quote = runner.quote(&snapshot, &request);
    let display = quote.result.rounded();

    if args.json {
        let output = serde_json::json!({
            "quote": display,
            "warnings": quote.warnings,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Gross:            {} ({})", display.amount_gross, quote.result.direction);
        println!("Channel fee:      {}", display.external_fee);
        println!("Ops deductions:   {}", display.ops_deductions);
        println!("Absorbed costs:   {}", display.admin_absorbed_costs);
        println!("Service fee:      {}", display.service_fee);
        println!("Net receipt:      {}", display.net_internal_receipt);
        println!("Exchange base:    {}", display.base_for_exchange);
        println!("Rate:             {}", display.rate);
        println!("Final amount:     {} {}", display.final_amount, quote.result.currency);
        if let Some(code) = &display.coupon {
            println!("Coupon:           {}", code);
        }
        println!("Equivalent value: {}", display.equivalent_value);
        println!("Net profit:       {}", display.net_profit);
        for warning in &quote.warnings {
            println!("warning [{}]: {}", warning.code(), warning);
        }
    }

    Ok(())
}

fn run_scenarios(runner: &mut ScenarioRunner, name: &str, json: bool) -> anyhow::Result<()> {
    let scenarios = Scenario::load_all(name)?;

    let mut outcomes = Vec::new();
    for scenario in &scenarios {
        outcomes.extend(runner.run_scenario(scenario));
    }

    let metrics = runner.metrics();
    if json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
    } else {
        for outcome in &outcomes {
            let status = if outcome.passed { "PASS" } else { "FAIL" };
            println!(
                "{} {} {}: expected {}, got {}",
                status, outcome.scenario, outcome.field, outcome.expected, outcome.actual
            );
        }
    }

    info!("Scenarios complete");
    info!("Quotes: {}", metrics.total_quotes);
    info!("Checks passed: {}", metrics.passed_checks);
    info!("Checks failed: {}", metrics.failed_checks);
    info!("Pass rate: {:.1}%", metrics.pass_rate() * 100.0);
    for (code, count) in metrics.warning_counts() {
        info!("Warning {}: {}", code, count);
    }

    if !metrics.all_passed() {
        warn!("{} check(s) failed", metrics.failed_checks);
        anyhow::bail!("{} scenario check(s) failed", metrics.failed_checks);
    }

    Ok(())
}
