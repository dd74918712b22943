//! Pricing configuration model.
//!
//! The hierarchy is channel → direction → operation profile → currencies,
//! cost groups and coupons. Field names follow the configuration store's
//! camelCase JSON so snapshots deserialize without translation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::identifiers::{ChannelSlug, Direction, ProfileId};

fn default_true() -> bool {
    true
}

/// A settlement channel and its per-direction operation profiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelProfile {
    /// Channel slug (e.g. `PAYPAL`, `USDT`).
    pub slug: ChannelSlug,
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// Whether the channel is offered to clients.
    pub enabled: bool,
    /// Profiles used when the client sells channel balance.
    #[serde(default)]
    pub sell_profiles: Vec<OperationProfile>,
    /// Profiles used when the client buys channel balance.
    #[serde(default)]
    pub buy_profiles: Vec<OperationProfile>,
}

impl ChannelProfile {
    /// Profiles configured for a direction, in priority order.
    pub fn profiles(&self, direction: Direction) -> &[OperationProfile] {
        match direction {
            Direction::Sell => &self.sell_profiles,
            Direction::Buy => &self.buy_profiles,
        }
    }
}

/// A named configuration bundle for one channel and direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationProfile {
    pub id: ProfileId,
    pub name: String,
    /// The first active profile of a list is the one used for pricing.
    pub active: bool,
    #[serde(default)]
    pub currencies: Vec<CurrencyConfig>,
    #[serde(default)]
    pub costs: Vec<CostGroup>,
    #[serde(default)]
    pub coupons: Vec<Coupon>,
}

impl OperationProfile {
    /// Look up a currency by exact code.
    pub fn currency(&self, code: &str) -> Option<&CurrencyConfig> {
        self.currencies.iter().find(|c| c.code == code)
    }

    /// Currencies that are offered to clients.
    pub fn enabled_currencies(&self) -> impl Iterator<Item = &CurrencyConfig> {
        self.currencies.iter().filter(|c| c.enabled)
    }
}

/// How the client-facing rate of a currency is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RateMode {
    /// Use the manual rate as-is.
    Manual,
    /// Derive the rate from the selected reference minus a margin.
    Dynamic,
}

/// One payout currency under a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyConfig {
    pub code: String,
    #[serde(default)]
    pub name: String,
    pub enabled: bool,
    pub rate_mode: RateMode,
    pub manual_rate: f64,
    /// Secondary reference rate for the informational equivalent value.
    #[serde(default)]
    pub secondary_rate: Option<f64>,
    #[serde(default)]
    pub dynamic_setting: DynamicRateSettings,
}

/// Inputs of the dynamic rate mode.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicRateSettings {
    #[serde(default)]
    pub references: Vec<ReferenceItem>,
    #[serde(default)]
    pub profit_rule: ProfitRule,
    #[serde(default)]
    pub amount_ranges: Vec<AmountRangeRule>,
}

impl DynamicRateSettings {
    /// The selected reference. Exclusivity is not enforced: the first wins.
    pub fn selected_reference(&self) -> Option<&ReferenceItem> {
        self.references.iter().find(|r| r.is_active)
    }

    /// The first enabled band covering `amount`.
    pub fn band_for(&self, amount: f64) -> Option<&AmountRangeRule> {
        self.amount_ranges
            .iter()
            .find(|band| band.enabled && band.covers(amount))
    }
}

/// A named external market quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceItem {
    #[serde(default)]
    pub id: String,
    pub label: String,
    pub value: f64,
    /// Selected as the base of the dynamic rate.
    pub is_active: bool,
    /// Informational only (e.g. an official rate shown next to the market one).
    #[serde(default)]
    pub is_referential: bool,
}

/// Which margin components a profit rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProfitMode {
    #[default]
    PctOnly,
    FixedOnly,
    Mixed,
}

/// Margin subtracted from the reference in dynamic mode.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitRule {
    pub mode: ProfitMode,
    #[serde(default)]
    pub pct: f64,
    #[serde(default)]
    pub fixed: f64,
}

impl ProfitRule {
    pub fn uses_pct(&self) -> bool {
        matches!(self.mode, ProfitMode::PctOnly | ProfitMode::Mixed)
    }

    pub fn uses_fixed(&self) -> bool {
        matches!(self.mode, ProfitMode::FixedOnly | ProfitMode::Mixed)
    }
}

/// Threshold band discounting the percentage margin for larger amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmountRangeRule {
    #[serde(default)]
    pub id: String,
    pub min_amount: f64,
    /// Exclusive upper bound; zero means unbounded.
    pub max_amount: f64,
    /// Percentage points removed from the profit percentage.
    pub adjustment_pct: f64,
    pub enabled: bool,
}

impl AmountRangeRule {
    /// Whether `amount` falls in `[min, max)`.
    pub fn covers(&self, amount: f64) -> bool {
        amount >= self.min_amount && (self.max_amount == 0.0 || amount < self.max_amount)
    }
}

/// Percentage of the gross amount, or a flat amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CostKind {
    Pct,
    Fixed,
}

/// Accounting treatment of a cost item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CostCategory {
    /// Reduces the amount available for conversion.
    Deductive,
    /// Pure margin on top.
    Additive,
}

/// A named bucket of cost items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostGroup {
    #[serde(default)]
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub items: Vec<CostItem>,
}

/// A single fee or cost definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostItem {
    #[serde(default)]
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: CostKind,
    pub category: CostCategory,
    pub value: f64,
    pub enabled: bool,
    /// Borne by the client (true) or absorbed by the business (false).
    #[serde(default = "default_true")]
    pub is_client_chargeable: bool,
}

impl CostItem {
    /// Amount this item represents for a gross amount.
    pub fn raw_value(&self, amount_gross: f64) -> f64 {
        match self.kind {
            CostKind::Pct => amount_gross * (self.value / 100.0),
            CostKind::Fixed => self.value,
        }
    }
}

/// Who a coupon is issued to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CouponCategory {
    Admin,
    #[default]
    Client,
}

/// Campaign kind of a coupon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CouponKind {
    Referral,
    Gift,
    #[default]
    GlobalPromo,
    TargetPromo,
}

/// Percentage or flat adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    #[serde(rename = "type")]
    pub kind: CostKind,
    pub value: f64,
}

/// Promotional code scoped to one operation profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    #[serde(default)]
    pub id: String,
    pub code: String,
    #[serde(default)]
    pub category: CouponCategory,
    #[serde(default, rename = "type")]
    pub kind: CouponKind,
    pub active: bool,
    #[serde(default)]
    pub expiration_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: Option<String>,
    /// Reward credited to the referring admin, if any.
    #[serde(default)]
    pub admin_reward: Option<Discount>,
    /// Adjustment applied to the client's payout.
    pub client_discount: Discount,
}

impl Coupon {
    /// Whether the coupon expired before `date`.
    ///
    /// Coupons without an expiration date never expire.
    pub fn is_expired_on(&self, date: NaiveDate) -> bool {
        self.expiration_date.is_some_and(|exp| date > exp)
    }
}
