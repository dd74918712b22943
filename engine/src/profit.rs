//! Internal profit estimation.
//!
//! Sell direction compares what the business nets (in channel currency) with
//! what it costs to cover the payout. For arbitrage-sensitive currencies the
//! payout is valued at the undiscounted market reference rate; otherwise at
//! the client rate. Buy direction uses a flat spread over the gross amount
//! plus the service fee, pending a real buy-side cost model.

use quotedesk_common::{CurrencyConfig, Direction};

use crate::config::EngineConfig;

/// Market reference rate used to value an arbitrage-sensitive payout.
///
/// The selected reference when there is one, else the manual rate marked up
/// by `market_rate_fallback_markup`. Zero for other currencies.
pub fn market_reference_rate(currency: Option<&CurrencyConfig>, config: &EngineConfig) -> f64 {
    match currency {
        Some(c) if config.is_arbitrage_sensitive(&c.code) => c
            .dynamic_setting
            .selected_reference()
            .map(|r| r.value)
            .unwrap_or(c.manual_rate * config.market_rate_fallback_markup),
        _ => 0.0,
    }
}

/// Inputs of the profit estimate for one quote.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfitInputs {
    pub direction: Direction,
    pub arbitrage_sensitive: bool,
    pub amount_gross: f64,
    pub net_internal_receipt: f64,
    pub service_fee: f64,
    /// Payout after coupons.
    pub final_amount: f64,
    pub rate: f64,
    pub market_reference_rate: f64,
}

/// Estimated net profit in channel currency.
pub fn estimate_profit(inputs: &ProfitInputs, buy_spread_ratio: f64) -> f64 {
    match inputs.direction {
        Direction::Sell if inputs.arbitrage_sensitive && inputs.market_reference_rate > 0.0 => {
            let cost_to_reacquire = inputs.final_amount / inputs.market_reference_rate;
            inputs.net_internal_receipt - cost_to_reacquire
        }
        Direction::Sell => {
            let rate = if inputs.rate == 0.0 { 1.0 } else { inputs.rate };
            inputs.net_internal_receipt - inputs.final_amount / rate
        }
        Direction::Buy => inputs.service_fee + inputs.amount_gross * buy_spread_ratio,
    }
}
