//! Quote scenarios.

use quotedesk_common::{ConfigSnapshot, Direction, ProfitMode, ProfitRule, RateMode};
use quotedesk_engine::QuoteRequest;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::demo::demo_snapshot;

/// Names accepted by [`Scenario::load`].
pub const SCENARIO_NAMES: [&str; 5] = [
    "scenario-a",
    "scenario-b",
    "scenario-c",
    "scenario-d",
    "scenario-e",
];

/// A quote scenario: a snapshot and the quotes to run against it.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Scenario name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Configuration the steps are quoted against.
    pub snapshot: ConfigSnapshot,
    /// Steps in the scenario.
    pub steps: Vec<ScenarioStep>,
}

/// One quote and the figures it must produce once rounded.
#[derive(Debug, Clone)]
pub struct ScenarioStep {
    pub request: QuoteRequest,
    pub expectations: Vec<Expectation>,
}

/// Rounded figure a quote is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Expectation {
    FinalAmount(Decimal),
    BaseForExchange(Decimal),
    OpsDeductions(Decimal),
    Rate(Decimal),
}

impl Expectation {
    /// Field name used in reports.
    pub fn field(&self) -> &'static str {
        match self {
            Expectation::FinalAmount(_) => "finalAmount",
            Expectation::BaseForExchange(_) => "baseForExchange",
            Expectation::OpsDeductions(_) => "opsDeductions",
            Expectation::Rate(_) => "rate",
        }
    }

    /// Expected value.
    pub fn expected(&self) -> Decimal {
        match *self {
            Expectation::FinalAmount(v)
            | Expectation::BaseForExchange(v)
            | Expectation::OpsDeductions(v)
            | Expectation::Rate(v) => v,
        }
    }
}

impl Scenario {
    /// Load a scenario by name.
    pub fn load(name: &str) -> anyhow::Result<Self> {
        match name {
            "scenario-a" => Ok(Self::fixed_rate_without_costs()),
            "scenario-b" => Ok(Self::channel_fees()),
            "scenario-c" => Ok(Self::dynamic_rate()),
            "scenario-d" => Ok(Self::flat_coupon()),
            "scenario-e" => Ok(Self::buy_direction()),
            _ => Err(anyhow::anyhow!("Unknown scenario: {}", name)),
        }
    }

    /// Load every scenario, or the named one.
    pub fn load_all(name: &str) -> anyhow::Result<Vec<Self>> {
        if name == "all" {
            SCENARIO_NAMES.iter().map(|n| Self::load(n)).collect()
        } else {
            Ok(vec![Self::load(name)?])
        }
    }

    /// 100 at a fixed 45.5 with no costs.
    fn fixed_rate_without_costs() -> Self {
        Self {
            name: "scenario-a".to_string(),
            description: "Fixed rate, no costs".to_string(),
            snapshot: without_costs(demo_snapshot()),
            steps: vec![ScenarioStep {
                request: QuoteRequest::new(100.0, "VES"),
                expectations: vec![
                    Expectation::FinalAmount(Decimal::new(455000, 2)),
                    Expectation::BaseForExchange(Decimal::from(100)),
                ],
            }],
        }
    }

    /// 100 with the channel's 5.4% + 0.30 fee at 45.5.
    fn channel_fees() -> Self {
        Self {
            name: "scenario-b".to_string(),
            description: "Channel percentage and flat fee".to_string(),
            snapshot: demo_snapshot(),
            steps: vec![ScenarioStep {
                request: QuoteRequest::new(100.0, "VES"),
                expectations: vec![
                    Expectation::OpsDeductions(Decimal::new(570, 2)),
                    Expectation::BaseForExchange(Decimal::new(9430, 2)),
                    Expectation::FinalAmount(Decimal::new(429065, 2)),
                ],
            }],
        }
    }

    /// Reference 46.50 less a 12% margin.
    fn dynamic_rate() -> Self {
        let mut snapshot = without_costs(demo_snapshot());
        for currency in snapshot
            .channels
            .iter_mut()
            .flat_map(|c| c.sell_profiles.iter_mut())
            .flat_map(|p| p.currencies.iter_mut())
            .filter(|c| c.code == "VES")
        {
            currency.rate_mode = RateMode::Dynamic;
            currency.dynamic_setting.profit_rule = ProfitRule {
                mode: ProfitMode::PctOnly,
                pct: 12.0,
                fixed: 0.0,
            };
        }

        Self {
            name: "scenario-c".to_string(),
            description: "Dynamic rate from selected reference".to_string(),
            snapshot,
            steps: vec![ScenarioStep {
                request: QuoteRequest::new(100.0, "VES"),
                expectations: vec![Expectation::Rate(Decimal::new(4092, 2))],
            }],
        }
    }

    /// Scenario A plus the flat +2 welcome coupon.
    fn flat_coupon() -> Self {
        Self {
            name: "scenario-d".to_string(),
            description: "Flat coupon on a fixed-rate quote".to_string(),
            snapshot: without_costs(demo_snapshot()),
            steps: vec![ScenarioStep {
                request: QuoteRequest::new(100.0, "VES").with_coupon("BIENVENIDA"),
                expectations: vec![Expectation::FinalAmount(Decimal::new(455200, 2))],
            }],
        }
    }

    /// 50 bought at 45.5.
    fn buy_direction() -> Self {
        Self {
            name: "scenario-e".to_string(),
            description: "Buy direction divides by the rate".to_string(),
            snapshot: without_costs(demo_snapshot()),
            steps: vec![ScenarioStep {
                request: QuoteRequest::new(50.0, "VES").direction(Direction::Buy),
                expectations: vec![Expectation::FinalAmount(Decimal::new(10989, 4))],
            }],
        }
    }
}

fn without_costs(mut snapshot: ConfigSnapshot) -> ConfigSnapshot {
    for channel in &mut snapshot.channels {
        for profile in channel
            .sell_profiles
            .iter_mut()
            .chain(channel.buy_profiles.iter_mut())
        {
            profile.costs.clear();
        }
    }
    snapshot
}
