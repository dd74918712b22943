//! Quote engine configuration.

use quotedesk_common::{ChannelSlug, Currency, QuoteDeskError};

/// Configuration for the quote engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Channel used when a request names none.
    pub primary_channel: ChannelSlug,
    /// Label fragments identifying a channel's own fee, matched
    /// case-insensitively in addition to the channel slug.
    pub gateway_fee_markers: Vec<String>,
    /// Currencies whose profit is measured against the market reference rate.
    pub arbitrage_currencies: Vec<Currency>,
    /// Multiplier on the manual rate used as market reference when an
    /// arbitrage-sensitive currency has no selected reference.
    pub market_rate_fallback_markup: f64,
    /// Spread ratio of the flat buy-direction profit estimate.
    pub buy_spread_ratio: f64,
    /// Whether additive (service fee) costs shrink the exchangeable base.
    pub additive_costs_reduce_base: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            primary_channel: ChannelSlug::primary(),
            gateway_fee_markers: vec![
                "fee".to_string(),
                "gateway".to_string(),
                "pasarela".to_string(),
                "paypal".to_string(),
            ],
            arbitrage_currencies: vec![Currency::ves()],
            market_rate_fallback_markup: 1.05,
            buy_spread_ratio: 0.02,
            additive_costs_reduce_base: false,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(slug) = std::env::var("QUOTEDESK_PRIMARY_CHANNEL") {
            config.primary_channel = ChannelSlug::new(slug);
        }

        if let Ok(markers) = std::env::var("QUOTEDESK_FEE_MARKERS") {
            config.gateway_fee_markers = split_list(&markers)
                .map(|m| m.to_lowercase())
                .collect();
        }

        if let Ok(codes) = std::env::var("QUOTEDESK_ARBITRAGE_CURRENCIES") {
            config.arbitrage_currencies = split_list(&codes).map(Currency::new).collect();
        }

        if let Ok(ratio) = std::env::var("QUOTEDESK_BUY_SPREAD_RATIO") {
            if let Ok(ratio) = ratio.parse() {
                config.buy_spread_ratio = ratio;
            }
        }

        if let Ok(flag) = std::env::var("QUOTEDESK_ADDITIVE_REDUCES_BASE") {
            if let Ok(flag) = flag.parse() {
                config.additive_costs_reduce_base = flag;
            }
        }

        config
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), QuoteDeskError> {
        if self.primary_channel.as_str().is_empty() {
            return Err(QuoteDeskError::Configuration(
                "Primary channel cannot be empty".to_string(),
            ));
        }

        if !self.buy_spread_ratio.is_finite() || self.buy_spread_ratio < 0.0 {
            return Err(QuoteDeskError::Configuration(format!(
                "Buy spread ratio must be a non-negative number, got {}",
                self.buy_spread_ratio
            )));
        }

        if !self.market_rate_fallback_markup.is_finite() || self.market_rate_fallback_markup <= 0.0
        {
            return Err(QuoteDeskError::Configuration(format!(
                "Market rate fallback markup must be positive, got {}",
                self.market_rate_fallback_markup
            )));
        }

        Ok(())
    }

    /// Whether profit for `code` is measured against the market reference.
    pub fn is_arbitrage_sensitive(&self, code: &str) -> bool {
        self.arbitrage_currencies.iter().any(|c| c.code() == code)
    }
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}
