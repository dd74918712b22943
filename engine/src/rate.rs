//! Client-facing rate resolution.
//!
//! Manual currencies quote their configured rate. Dynamic currencies start
//! from the selected reference and subtract a margin built from the profit
//! rule:
//!
//! ```text
//! margin = reference * pct / 100   (percentage component)
//!        + fixed                   (fixed component)
//! rate   = max(0, reference - margin)
//! ```
//!
//! Under a percentage-only rule, an enabled amount band covering the gross
//! amount lowers `pct` by its adjustment, floored at zero. All arithmetic is
//! `f64`; nothing is rounded here.

use quotedesk_common::{CurrencyConfig, OperationProfile, RateMode};
use serde::Serialize;

/// How a rate was obtained.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateBreakdown {
    /// Rate mode of the currency.
    pub mode: RateMode,
    /// Selected reference value (dynamic mode), or the manual rate.
    pub reference: f64,
    /// Whether dynamic mode found a selected reference.
    pub has_reference: bool,
    /// Percentage actually applied after any band adjustment.
    pub effective_pct: f64,
    /// Adjustment of the band that matched, if any.
    pub band_adjustment: Option<f64>,
    /// Total margin subtracted from the reference.
    pub margin: f64,
    /// Final client rate, never negative.
    pub rate: f64,
}

impl RateBreakdown {
    fn manual(rate: f64) -> Self {
        Self {
            mode: RateMode::Manual,
            reference: rate,
            has_reference: true,
            effective_pct: 0.0,
            band_adjustment: None,
            margin: 0.0,
            rate: rate.max(0.0),
        }
    }
}

/// Resolve the client rate of a currency for a gross amount.
pub fn resolve_rate(currency: &CurrencyConfig, amount_gross: f64) -> RateBreakdown {
    if currency.rate_mode == RateMode::Manual {
        return RateBreakdown::manual(currency.manual_rate);
    }

    let settings = &currency.dynamic_setting;
    let selected = settings.selected_reference();
    let reference = selected.map(|r| r.value).unwrap_or(0.0);
    let rule = &settings.profit_rule;

    let mut effective_pct = 0.0;
    let mut band_adjustment = None;
    let mut margin = 0.0;

    if rule.uses_pct() {
        effective_pct = rule.pct;
        if !rule.uses_fixed() {
            if let Some(band) = settings.band_for(amount_gross) {
                band_adjustment = Some(band.adjustment_pct);
                effective_pct = (rule.pct - band.adjustment_pct).max(0.0);
            }
        }
        margin += reference * (effective_pct / 100.0);
    }

    if rule.uses_fixed() {
        margin += rule.fixed;
    }

    RateBreakdown {
        mode: RateMode::Dynamic,
        reference,
        has_reference: selected.is_some(),
        effective_pct,
        band_adjustment,
        margin,
        rate: (reference - margin).max(0.0),
    }
}

/// Resolve the rate of `code` under a profile. `None` if the currency is not
/// configured.
pub fn rate_for(profile: &OperationProfile, code: &str, amount_gross: f64) -> Option<RateBreakdown> {
    profile.currency(code).map(|c| resolve_rate(c, amount_gross))
}
