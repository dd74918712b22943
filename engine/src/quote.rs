//! Quote request and result types.

use chrono::NaiveDate;
use quotedesk_common::{is_displayable, round_display, ChannelSlug, Coupon, CouponCode, Currency, Direction, ProfileId};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::diagnostics::QuoteWarning;

/// Decimal places used to display the resolved rate.
const RATE_DISPLAY_PLACES: u32 = 4;
/// Decimal places used to display channel-currency figures.
const CHANNEL_DISPLAY_PLACES: u32 = 2;
/// Decimal places of a buy-direction payout (channel balance received).
const BUY_PAYOUT_DISPLAY_PLACES: u32 = 4;

/// Request for a quote.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRequest {
    /// Gross amount in the channel's balance currency.
    pub amount_gross: f64,
    /// Target payout currency code.
    pub currency: String,
    /// Channel; the engine's primary channel when `None`.
    pub channel: Option<ChannelSlug>,
    pub direction: Direction,
    /// Coupon code, matched exactly.
    pub coupon: Option<CouponCode>,
    /// Historical override parameter; never consulted by resolution.
    pub profile_override: Option<ProfileId>,
    /// Date used to flag expired coupons in diagnostics.
    pub as_of: Option<NaiveDate>,
}

impl QuoteRequest {
    /// Create a sell-direction request on the primary channel.
    pub fn new(amount_gross: f64, currency: impl Into<String>) -> Self {
        Self {
            amount_gross,
            currency: currency.into(),
            channel: None,
            direction: Direction::Sell,
            coupon: None,
            profile_override: None,
            as_of: None,
        }
    }

    /// Quote on a specific channel.
    pub fn on_channel(mut self, channel: impl Into<ChannelSlug>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    /// Set the direction.
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Client buys channel balance.
    pub fn buy(self) -> Self {
        self.direction(Direction::Buy)
    }

    /// Apply a coupon code.
    pub fn with_coupon(mut self, code: impl Into<CouponCode>) -> Self {
        self.coupon = Some(code.into());
        self
    }

    /// Record a profile override. Resolution ignores it.
    pub fn with_profile_override(mut self, profile: impl Into<ProfileId>) -> Self {
        self.profile_override = Some(profile.into());
        self
    }

    /// Date against which coupon expiry is reported.
    pub fn as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }
}

/// Computed quote. Transient; never persisted by the engine.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResult {
    pub direction: Direction,
    pub currency: String,
    pub amount_gross: f64,
    /// Channel's own fee (display only, also inside the deduction buckets).
    pub external_fee: f64,
    pub net_channel_amount: f64,
    pub ops_deductions: f64,
    pub admin_absorbed_costs: f64,
    pub net_internal_receipt: f64,
    pub service_fee: f64,
    pub base_for_exchange: f64,
    pub rate: f64,
    /// Payout after coupons.
    pub final_amount: f64,
    /// Payout valued at the secondary reference rate (informational).
    pub equivalent_value: f64,
    pub applied_coupon: Option<Coupon>,
    pub market_reference_rate: f64,
    pub net_profit: f64,
}

impl QuoteResult {
    /// Zero-valued quote that keeps the requested gross amount.
    pub fn zero(amount_gross: f64, currency: impl Into<String>, direction: Direction) -> Self {
        Self {
            direction,
            currency: currency.into(),
            amount_gross,
            ..Default::default()
        }
    }

    /// Figures too large to render as display decimals, by field name.
    pub fn unrepresentable(&self) -> Vec<(&'static str, f64)> {
        [
            ("amountGross", self.amount_gross),
            ("externalFee", self.external_fee),
            ("netChannelAmount", self.net_channel_amount),
            ("opsDeductions", self.ops_deductions),
            ("adminAbsorbedCosts", self.admin_absorbed_costs),
            ("netInternalReceipt", self.net_internal_receipt),
            ("serviceFee", self.service_fee),
            ("baseForExchange", self.base_for_exchange),
            ("rate", self.rate),
            ("finalAmount", self.final_amount),
            ("equivalentValue", self.equivalent_value),
            ("marketReferenceRate", self.market_reference_rate),
            ("netProfit", self.net_profit),
        ]
        .into_iter()
        .filter(|(_, value)| !is_displayable(*value))
        .collect()
    }

    /// Figures rounded for display.
    ///
    /// Sell payouts use the payout currency's decimal places, buy payouts the
    /// channel's. The rate keeps four places.
    pub fn rounded(&self) -> DisplayQuote {
        let payout_places = match self.direction {
            Direction::Sell => Currency::new(self.currency.as_str()).decimal_places(),
            Direction::Buy => BUY_PAYOUT_DISPLAY_PLACES,
        };
        let channel = |v: f64| round_display(v, CHANNEL_DISPLAY_PLACES);

        DisplayQuote {
            amount_gross: channel(self.amount_gross),
            external_fee: channel(self.external_fee),
            net_channel_amount: channel(self.net_channel_amount),
            ops_deductions: channel(self.ops_deductions),
            admin_absorbed_costs: channel(self.admin_absorbed_costs),
            net_internal_receipt: channel(self.net_internal_receipt),
            service_fee: channel(self.service_fee),
            base_for_exchange: channel(self.base_for_exchange),
            rate: round_display(self.rate, RATE_DISPLAY_PLACES),
            final_amount: round_display(self.final_amount, payout_places),
            equivalent_value: channel(self.equivalent_value),
            market_reference_rate: round_display(self.market_reference_rate, RATE_DISPLAY_PLACES),
            net_profit: channel(self.net_profit),
            coupon: self.applied_coupon.as_ref().map(|c| c.code.clone()),
        }
    }
}

/// Display form of a [`QuoteResult`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayQuote {
    pub amount_gross: Decimal,
    pub external_fee: Decimal,
    pub net_channel_amount: Decimal,
    pub ops_deductions: Decimal,
    pub admin_absorbed_costs: Decimal,
    pub net_internal_receipt: Decimal,
    pub service_fee: Decimal,
    pub base_for_exchange: Decimal,
    pub rate: Decimal,
    pub final_amount: Decimal,
    pub equivalent_value: Decimal,
    pub market_reference_rate: Decimal,
    pub net_profit: Decimal,
    pub coupon: Option<String>,
}

/// A quote together with the diagnostics gathered while computing it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub result: QuoteResult,
    pub warnings: Vec<QuoteWarning>,
}

impl Quote {
    /// Whether any warning points at missing or broken configuration.
    pub fn is_misconfigured(&self) -> bool {
        self.warnings.iter().any(QuoteWarning::is_misconfiguration)
    }

    /// Whether a warning with `code` was reported.
    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|w| w.code() == code)
    }
}

/// Client rate and its admin preview against the secondary reference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatePreview {
    pub rate: f64,
    /// What 100 units of channel balance are worth at the secondary rate
    /// after conversion at `rate`. Zero without a secondary rate.
    pub equivalent_per_hundred: f64,
}
