//! Diagnostics reported next to a quote.
//!
//! Pricing never fails: missing configuration degrades to zero-valued
//! figures. These warnings let operators tell a misconfiguration apart from a
//! genuinely zero rate.

use quotedesk_common::{ChannelSlug, Direction};
use serde::Serialize;
use thiserror::Error;

/// A condition detected while computing a quote.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "warning", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteWarning {
    /// The gross amount was negative or not a number; zero was used.
    #[error("Gross amount {amount} is invalid, quoting zero")]
    InvalidAmount { amount: f64 },

    /// No channel with this slug is configured.
    #[error("Unknown channel {slug}")]
    UnknownChannel { slug: ChannelSlug },

    /// The channel exists but is disabled. Pricing still proceeds.
    #[error("Channel {slug} is disabled")]
    ChannelDisabled { slug: ChannelSlug },

    /// The channel has no profiles for the direction.
    #[error("No {direction} profile configured for channel {slug}")]
    NoProfile { slug: ChannelSlug, direction: Direction },

    /// The profile has no such currency.
    #[error("Currency {code} is not configured in profile {profile}")]
    UnknownCurrency { code: String, profile: String },

    /// The currency exists but is disabled. Pricing still proceeds.
    #[error("Currency {code} is disabled")]
    CurrencyDisabled { code: String },

    /// Dynamic mode without a selected reference prices from zero.
    #[error("No reference selected for dynamic currency {code}")]
    NoSelectedReference { code: String },

    /// The resolved rate is zero.
    #[error("Resolved rate for {code} is zero")]
    ZeroRate { code: String },

    /// A zero rate was replaced by one to avoid dividing by zero.
    #[error("Zero rate replaced by 1 in {context}")]
    DivisionGuard { context: String },

    /// The coupon code matched no active coupon of the profile.
    #[error("Coupon {code} not found or inactive")]
    UnknownCoupon { code: String },

    /// The coupon is past its expiration date; it was still applied.
    #[error("Coupon {code} expired on {expired_on}")]
    CouponExpired { code: String, expired_on: chrono::NaiveDate },

    /// A profile override was passed; resolution ignores it.
    #[error("Profile override {profile} ignored")]
    ProfileOverrideIgnored { profile: String },

    /// Buy-direction profit is a flat spread estimate.
    #[error("Buy-direction profit is a flat spread estimate")]
    ApproximateBuyProfit,

    /// A figure is too large for a display decimal and renders as zero.
    #[error("{field} = {value} exceeds the displayable range")]
    Unrepresentable { field: String, value: f64 },
}

impl QuoteWarning {
    /// Get a stable warning code.
    pub fn code(&self) -> &'static str {
        match self {
            QuoteWarning::InvalidAmount { .. } => "INVALID_AMOUNT",
            QuoteWarning::UnknownChannel { .. } => "UNKNOWN_CHANNEL",
            QuoteWarning::ChannelDisabled { .. } => "CHANNEL_DISABLED",
            QuoteWarning::NoProfile { .. } => "NO_PROFILE",
            QuoteWarning::UnknownCurrency { .. } => "UNKNOWN_CURRENCY",
            QuoteWarning::CurrencyDisabled { .. } => "CURRENCY_DISABLED",
            QuoteWarning::NoSelectedReference { .. } => "NO_SELECTED_REFERENCE",
            QuoteWarning::ZeroRate { .. } => "ZERO_RATE",
            QuoteWarning::DivisionGuard { .. } => "DIVISION_GUARD",
            QuoteWarning::UnknownCoupon { .. } => "UNKNOWN_COUPON",
            QuoteWarning::CouponExpired { .. } => "COUPON_EXPIRED",
            QuoteWarning::ProfileOverrideIgnored { .. } => "PROFILE_OVERRIDE_IGNORED",
            QuoteWarning::ApproximateBuyProfit => "APPROXIMATE_BUY_PROFIT",
            QuoteWarning::Unrepresentable { .. } => "UNREPRESENTABLE",
        }
    }

    /// Whether the warning points at missing or broken configuration, as
    /// opposed to an informational note about the calculation.
    pub fn is_misconfiguration(&self) -> bool {
        matches!(
            self,
            QuoteWarning::UnknownChannel { .. }
                | QuoteWarning::NoProfile { .. }
                | QuoteWarning::UnknownCurrency { .. }
                | QuoteWarning::NoSelectedReference { .. }
                | QuoteWarning::ZeroRate { .. }
        )
    }
}
