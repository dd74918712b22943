//! Quote assembly: from gross amount, rate and costs to the payout.

use quotedesk_common::{CurrencyConfig, Direction};

use crate::cost::CostBreakdown;

/// Which costs shrink the amount that gets converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BasePolicy {
    /// Subtract additive (service fee) costs from the base as well.
    pub additive_costs_reduce_base: bool,
}

/// Figures derived from the gross amount before any coupon.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AssembledQuote {
    /// Gross minus the channel's own fee (informational).
    pub net_channel_amount: f64,
    /// What the business nets after every deductive cost.
    pub net_internal_receipt: f64,
    /// Principal converted for the client.
    pub base_for_exchange: f64,
    /// Payout before coupons.
    pub final_amount: f64,
    /// Payout expressed at the secondary reference rate, when applicable.
    pub equivalent_value: f64,
    /// Set when a zero buy-direction rate had to be replaced by one.
    pub division_guarded: bool,
}

/// Combine gross amount, rate and costs into the payout figures.
///
/// `equivalent_value` is only computed when `arbitrage_sensitive` is set and
/// the currency has a positive secondary rate.
pub fn assemble(
    amount_gross: f64,
    direction: Direction,
    rate: f64,
    costs: &CostBreakdown,
    currency: Option<&CurrencyConfig>,
    arbitrage_sensitive: bool,
    policy: BasePolicy,
) -> AssembledQuote {
    let net_channel_amount = amount_gross - costs.external_fee;
    let net_internal_receipt = amount_gross - costs.ops_deductions - costs.admin_absorbed_costs;

    let mut reducible = costs.ops_deductions;
    if policy.additive_costs_reduce_base {
        reducible += costs.service_fee;
    }
    let base_for_exchange = (amount_gross - reducible).max(0.0);

    let (final_amount, division_guarded) = match direction {
        Direction::Sell => (base_for_exchange * rate, false),
        Direction::Buy if rate == 0.0 => (base_for_exchange, true),
        Direction::Buy => (base_for_exchange / rate, false),
    };

    let equivalent_value = match currency.and_then(|c| c.secondary_rate) {
        Some(secondary) if arbitrage_sensitive && secondary > 0.0 => final_amount / secondary,
        _ => 0.0,
    };

    AssembledQuote {
        net_channel_amount,
        net_internal_receipt,
        base_for_exchange,
        final_amount,
        equivalent_value,
        division_guarded,
    }
}
