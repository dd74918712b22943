//! Scenario runner.

use quotedesk_common::ConfigSnapshot;
use quotedesk_engine::{DisplayQuote, Quote, QuoteEngine, QuoteRequest};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use crate::metrics::RunMetrics;
use crate::scenario::{Expectation, Scenario, ScenarioStep};

/// Outcome of one checked figure.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckOutcome {
    pub scenario: String,
    pub field: &'static str,
    pub expected: Decimal,
    pub actual: Decimal,
    pub passed: bool,
}

/// Runs quotes and scenarios against the engine.
pub struct ScenarioRunner {
    engine: QuoteEngine,
    metrics: RunMetrics,
}

impl ScenarioRunner {
    /// Create a new runner.
    pub fn new(engine: QuoteEngine) -> Self {
        Self {
            engine,
            metrics: RunMetrics::new(),
        }
    }

    /// Compute a single quote.
    pub fn quote(&mut self, snapshot: &ConfigSnapshot, request: &QuoteRequest) -> Quote {
        let quote = self.engine.quote(snapshot, request);

        self.metrics.record_quote();
        for warning in &quote.warnings {
            self.metrics.record_warning(warning.code());
        }

        quote
    }

    /// Run a scenario. Returns the outcome of every checked figure.
    pub fn run_scenario(&mut self, scenario: &Scenario) -> Vec<CheckOutcome> {
        info!("Running scenario: {} - {}", scenario.name, scenario.description);

        let mut outcomes = Vec::new();
        for step in &scenario.steps {
            outcomes.extend(self.execute_step(scenario, step));
        }

        outcomes
    }

    fn execute_step(&mut self, scenario: &Scenario, step: &ScenarioStep) -> Vec<CheckOutcome> {
        let display = self.quote(&scenario.snapshot, &step.request).result.rounded();

        step.expectations
            .iter()
            .map(|expectation| {
                let actual = actual_value(&display, expectation);
                let passed = actual == expectation.expected();
                self.metrics.record_check(passed);

                if passed {
                    info!("{}: {} = {}", scenario.name, expectation.field(), actual);
                } else {
                    warn!(
                        "{}: {} expected {} but got {}",
                        scenario.name,
                        expectation.field(),
                        expectation.expected(),
                        actual
                    );
                }

                CheckOutcome {
                    scenario: scenario.name.clone(),
                    field: expectation.field(),
                    expected: expectation.expected(),
                    actual,
                    passed,
                }
            })
            .collect()
    }

    /// Collected metrics.
    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }
}

fn actual_value(display: &DisplayQuote, expectation: &Expectation) -> Decimal {
    match expectation {
        Expectation::FinalAmount(_) => display.final_amount,
        Expectation::BaseForExchange(_) => display.base_for_exchange,
        Expectation::OpsDeductions(_) => display.ops_deductions,
        Expectation::Rate(_) => display.rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_snapshot;
    use crate::scenario::SCENARIO_NAMES;

    #[test]
    fn test_every_scenario_passes() {
        let mut runner = ScenarioRunner::new(QuoteEngine::default());

        for name in SCENARIO_NAMES {
            let scenario = Scenario::load(name).unwrap();
            let outcomes = runner.run_scenario(&scenario);
            assert!(!outcomes.is_empty());
            assert!(outcomes.iter().all(|o| o.passed), "{} failed: {:?}", name, outcomes);
        }

        assert!(runner.metrics().all_passed());
        assert_eq!(runner.metrics().total_quotes, SCENARIO_NAMES.len() as u64);
    }

    #[test]
    fn test_failed_expectation_is_counted() {
        let mut runner = ScenarioRunner::new(QuoteEngine::default());
        let mut scenario = Scenario::load("scenario-a").unwrap();
        scenario.steps[0].expectations = vec![Expectation::FinalAmount(Decimal::ONE)];

        let outcomes = runner.run_scenario(&scenario);

        assert!(!outcomes[0].passed);
        assert_eq!(runner.metrics().failed_checks, 1);
    }

    #[test]
    fn test_quote_records_warnings() {
        let mut runner = ScenarioRunner::new(QuoteEngine::default());

        let quote = runner.quote(&demo_snapshot(), &QuoteRequest::new(100.0, "EUR"));

        assert!(quote.has_warning("UNKNOWN_CURRENCY"));
        assert_eq!(quote.result.final_amount, 0.0);
        assert!(runner
            .metrics()
            .warning_counts()
            .any(|(code, _)| code == "UNKNOWN_CURRENCY"));
    }
}
