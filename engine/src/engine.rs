//! Main quote engine implementation.

use quotedesk_common::{ChannelSlug, ConfigSnapshot, CurrencyConfig, Direction, RateMode};
use tracing::{debug, info, instrument, warn};

use crate::assemble::{assemble, BasePolicy};
use crate::config::EngineConfig;
use crate::coupon::apply_coupon;
use crate::cost::aggregate;
use crate::diagnostics::QuoteWarning;
use crate::profile::resolve_profile;
use crate::profit::{estimate_profit, market_reference_rate, ProfitInputs};
use crate::quote::{Quote, QuoteRequest, QuoteResult, RatePreview};
use crate::rate::{rate_for, resolve_rate};

/// The quote engine.
///
/// Holds only its configuration; every call reads an immutable snapshot and
/// returns a fresh result, so one engine can serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct QuoteEngine {
    config: EngineConfig,
}

impl QuoteEngine {
    /// Create a new quote engine.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Compute a quote. Never fails: missing configuration yields a
    /// zero-valued result plus warnings.
    #[instrument(skip(self, snapshot), fields(
        amount = request.amount_gross,
        currency = %request.currency,
        direction = %request.direction
    ))]
    pub fn quote(&self, snapshot: &ConfigSnapshot, request: &QuoteRequest) -> Quote {
        let mut warnings = Vec::new();
        let slug = request
            .channel
            .clone()
            .unwrap_or_else(|| self.config.primary_channel.clone());

        let amount_gross = if request.amount_gross.is_finite() && request.amount_gross >= 0.0 {
            request.amount_gross
        } else {
            warnings.push(QuoteWarning::InvalidAmount {
                amount: request.amount_gross,
            });
            0.0
        };

        if let Some(profile) = &request.profile_override {
            warnings.push(QuoteWarning::ProfileOverrideIgnored {
                profile: profile.to_string(),
            });
        }

        match snapshot.channel(&slug) {
            None => warnings.push(QuoteWarning::UnknownChannel { slug: slug.clone() }),
            Some(channel) => {
                if !channel.enabled {
                    warnings.push(QuoteWarning::ChannelDisabled { slug: slug.clone() });
                }
                if channel.profiles(request.direction).is_empty() {
                    warnings.push(QuoteWarning::NoProfile {
                        slug: slug.clone(),
                        direction: request.direction,
                    });
                }
            }
        }

        let Some(profile) = resolve_profile(&snapshot.channels, &slug, request.direction) else {
            let result = QuoteResult::zero(amount_gross, request.currency.as_str(), request.direction);
            return self.finish(result, warnings);
        };
        debug!(profile = %profile.id, channel = %slug, "Resolved operation profile");

        let currency = profile.currency(&request.currency);
        let rate = match rate_for(profile, &request.currency, amount_gross) {
            Some(breakdown) => {
                debug!(
                    mode = ?breakdown.mode,
                    reference = breakdown.reference,
                    margin = breakdown.margin,
                    rate = breakdown.rate,
                    "Resolved rate"
                );
                if breakdown.mode == RateMode::Dynamic && !breakdown.has_reference {
                    warnings.push(QuoteWarning::NoSelectedReference {
                        code: request.currency.clone(),
                    });
                }
                breakdown.rate
            }
            None => {
                warnings.push(QuoteWarning::UnknownCurrency {
                    code: request.currency.clone(),
                    profile: profile.id.to_string(),
                });
                0.0
            }
        };

        if currency.is_some_and(|c| !c.enabled) {
            warnings.push(QuoteWarning::CurrencyDisabled {
                code: request.currency.clone(),
            });
        }
        if currency.is_some() && rate == 0.0 {
            warnings.push(QuoteWarning::ZeroRate {
                code: request.currency.clone(),
            });
        }

        let costs = aggregate(
            &profile.costs,
            amount_gross,
            &slug,
            &self.config.gateway_fee_markers,
        );
        debug!(
            ops_deductions = costs.ops_deductions,
            admin_absorbed = costs.admin_absorbed_costs,
            service_fee = costs.service_fee,
            external_fee = costs.external_fee,
            "Aggregated costs"
        );

        let arbitrage_sensitive = self.config.is_arbitrage_sensitive(&request.currency);
        let policy = BasePolicy {
            additive_costs_reduce_base: self.config.additive_costs_reduce_base,
        };
        let assembled = assemble(
            amount_gross,
            request.direction,
            rate,
            &costs,
            currency,
            arbitrage_sensitive,
            policy,
        );
        if assembled.division_guarded {
            warnings.push(QuoteWarning::DivisionGuard {
                context: "buy-direction payout".to_string(),
            });
        }

        let code = request.coupon.as_ref().map(|c| c.as_str());
        let (final_amount, applied) = apply_coupon(assembled.final_amount, &profile.coupons, code);
        if let Some(code) = code {
            match applied {
                None => warnings.push(QuoteWarning::UnknownCoupon {
                    code: code.to_string(),
                }),
                Some(coupon) => {
                    if let (Some(as_of), Some(expired_on)) = (request.as_of, coupon.expiration_date) {
                        if coupon.is_expired_on(as_of) {
                            warnings.push(QuoteWarning::CouponExpired {
                                code: coupon.code.clone(),
                                expired_on,
                            });
                        }
                    }
                }
            }
        }

        let market_rate = market_reference_rate(currency, &self.config);
        let profit_inputs = ProfitInputs {
            direction: request.direction,
            arbitrage_sensitive,
            amount_gross,
            net_internal_receipt: assembled.net_internal_receipt,
            service_fee: costs.service_fee,
            final_amount,
            rate,
            market_reference_rate: market_rate,
        };
        if request.direction == Direction::Buy {
            warnings.push(QuoteWarning::ApproximateBuyProfit);
        }
        let net_profit = estimate_profit(&profit_inputs, self.config.buy_spread_ratio);

        let result = QuoteResult {
            direction: request.direction,
            currency: request.currency.clone(),
            amount_gross,
            external_fee: costs.external_fee,
            net_channel_amount: assembled.net_channel_amount,
            ops_deductions: costs.ops_deductions,
            admin_absorbed_costs: costs.admin_absorbed_costs,
            net_internal_receipt: assembled.net_internal_receipt,
            service_fee: costs.service_fee,
            base_for_exchange: assembled.base_for_exchange,
            rate,
            final_amount,
            equivalent_value: assembled.equivalent_value,
            applied_coupon: applied.cloned(),
            market_reference_rate: market_rate,
            net_profit,
        };

        self.finish(result, warnings)
    }

    /// Client rate of a currency, independent of any amount.
    ///
    /// Returns zero when the channel, profile or currency is missing.
    pub fn client_rate(
        &self,
        snapshot: &ConfigSnapshot,
        currency: &str,
        channel: &ChannelSlug,
        direction: Direction,
    ) -> f64 {
        resolve_profile(&snapshot.channels, channel, direction)
            .and_then(|profile| rate_for(profile, currency, 0.0))
            .map(|breakdown| breakdown.rate)
            .unwrap_or(0.0)
    }

    /// Rate preview shown next to a currency's settings.
    pub fn rate_preview(currency: &CurrencyConfig) -> RatePreview {
        let rate = resolve_rate(currency, 0.0).rate;
        let equivalent_per_hundred = match currency.secondary_rate {
            Some(secondary) if secondary > 0.0 => 100.0 * rate / secondary,
            _ => 0.0,
        };
        RatePreview {
            rate,
            equivalent_per_hundred,
        }
    }

    fn finish(&self, result: QuoteResult, mut warnings: Vec<QuoteWarning>) -> Quote {
        warnings.extend(result.unrepresentable().into_iter().map(|(field, value)| {
            QuoteWarning::Unrepresentable {
                field: field.to_string(),
                value,
            }
        }));

        for warning in &warnings {
            if warning.is_misconfiguration() {
                warn!(code = warning.code(), "{}", warning);
            } else {
                debug!(code = warning.code(), "{}", warning);
            }
        }

        info!(
            currency = %result.currency,
            rate = result.rate,
            final_amount = result.final_amount,
            net_profit = result.net_profit,
            coupon = result.applied_coupon.as_ref().map(|c| c.code.as_str()),
            warnings = warnings.len(),
            "Quote computed"
        );

        Quote { result, warnings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quotedesk_common::{
        ChannelProfile, CostCategory, CostGroup, CostItem, CostKind, Coupon, CouponCategory,
        CouponKind, Discount, DynamicRateSettings, OperationProfile, ProfitMode, ProfitRule,
        ReferenceItem,
    };

    fn ves(mode: RateMode) -> CurrencyConfig {
        CurrencyConfig {
            code: "VES".into(),
            name: "Bolívares".into(),
            enabled: true,
            rate_mode: mode,
            manual_rate: 45.5,
            secondary_rate: Some(46.0),
            dynamic_setting: DynamicRateSettings {
                references: vec![ReferenceItem {
                    id: "r1".into(),
                    label: "Promedio P2P".into(),
                    value: 46.5,
                    is_active: true,
                    is_referential: false,
                }],
                profit_rule: ProfitRule { mode: ProfitMode::PctOnly, pct: 12.0, fixed: 0.0 },
                amount_ranges: Vec::new(),
            },
        }
    }

    fn fee(label: &str, kind: CostKind, value: f64) -> CostItem {
        CostItem {
            id: String::new(),
            label: label.into(),
            kind,
            category: CostCategory::Deductive,
            value,
            enabled: true,
            is_client_chargeable: true,
        }
    }

    fn snapshot(currencies: Vec<CurrencyConfig>, costs: Vec<CostItem>) -> ConfigSnapshot {
        let profile = OperationProfile {
            id: "prof-sell-std".into(),
            name: "Venta Estándar".into(),
            active: true,
            currencies,
            costs: vec![CostGroup { id: "g".into(), label: "Deducciones".into(), items: costs }],
            coupons: vec![Coupon {
                id: "cp-1".into(),
                code: "BIENVENIDA".into(),
                category: CouponCategory::Client,
                kind: CouponKind::GlobalPromo,
                active: true,
                expiration_date: chrono::NaiveDate::from_ymd_opt(2025, 12, 31),
                description: None,
                admin_reward: None,
                client_discount: Discount { kind: CostKind::Fixed, value: 2.0 },
            }],
        };
        ConfigSnapshot::new(vec![ChannelProfile {
            slug: ChannelSlug::primary(),
            label: "Saldo PayPal".into(),
            enabled: true,
            sell_profiles: vec![profile.clone()],
            buy_profiles: vec![profile],
        }])
    }

    #[test]
    fn test_manual_quote() {
        let engine = QuoteEngine::default();
        let snapshot = snapshot(vec![ves(RateMode::Manual)], Vec::new());

        let quote = engine.quote(&snapshot, &QuoteRequest::new(100.0, "VES"));

        assert!((quote.result.final_amount - 4550.0).abs() < 1e-9);
        assert_eq!(quote.result.base_for_exchange, 100.0);
        assert!(quote.warnings.is_empty());
    }

    #[test]
    fn test_unknown_channel_is_zero_quote() {
        let engine = QuoteEngine::default();
        let snapshot = snapshot(vec![ves(RateMode::Manual)], Vec::new());

        let quote = engine.quote(&snapshot, &QuoteRequest::new(100.0, "VES").on_channel("ZINLI"));

        assert_eq!(quote.result, QuoteResult::zero(100.0, "VES", Direction::Sell));
        assert!(quote.has_warning("UNKNOWN_CHANNEL"));
        assert!(quote.is_misconfigured());
    }

    #[test]
    fn test_unknown_currency_reports_zero_rate() {
        let engine = QuoteEngine::default();
        let snapshot = snapshot(vec![ves(RateMode::Manual)], Vec::new());

        let quote = engine.quote(&snapshot, &QuoteRequest::new(100.0, "COP"));

        assert_eq!(quote.result.rate, 0.0);
        assert_eq!(quote.result.final_amount, 0.0);
        assert!(quote.has_warning("UNKNOWN_CURRENCY"));
    }

    #[test]
    fn test_negative_amount_is_clamped() {
        let engine = QuoteEngine::default();
        let snapshot = snapshot(vec![ves(RateMode::Manual)], Vec::new());

        let quote = engine.quote(&snapshot, &QuoteRequest::new(-5.0, "VES"));

        assert_eq!(quote.result.amount_gross, 0.0);
        assert_eq!(quote.result.final_amount, 0.0);
        assert!(quote.has_warning("INVALID_AMOUNT"));
    }

    #[test]
    fn test_profile_override_is_ignored() {
        let engine = QuoteEngine::default();
        let snapshot = snapshot(vec![ves(RateMode::Manual)], Vec::new());

        let plain = engine.quote(&snapshot, &QuoteRequest::new(100.0, "VES"));
        let overridden = engine.quote(
            &snapshot,
            &QuoteRequest::new(100.0, "VES").with_profile_override("prof-other"),
        );

        assert_eq!(plain.result, overridden.result);
        assert!(overridden.has_warning("PROFILE_OVERRIDE_IGNORED"));
    }

    #[test]
    fn test_coupon_expiry_is_reported_not_enforced() {
        let engine = QuoteEngine::default();
        let snapshot = snapshot(vec![ves(RateMode::Manual)], Vec::new());
        let request = QuoteRequest::new(100.0, "VES")
            .with_coupon("BIENVENIDA")
            .as_of(chrono::NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());

        let quote = engine.quote(&snapshot, &request);

        assert!((quote.result.final_amount - 4552.0).abs() < 1e-9);
        assert!(quote.has_warning("COUPON_EXPIRED"));
    }

    #[test]
    fn test_unknown_coupon_warns() {
        let engine = QuoteEngine::default();
        let snapshot = snapshot(vec![ves(RateMode::Manual)], Vec::new());

        let quote = engine.quote(&snapshot, &QuoteRequest::new(100.0, "VES").with_coupon("NOPE"));

        assert!((quote.result.final_amount - 4550.0).abs() < 1e-9);
        assert!(quote.result.applied_coupon.is_none());
        assert!(quote.has_warning("UNKNOWN_COUPON"));
        assert!(!quote.is_misconfigured());
    }

    #[test]
    fn test_sell_profit_against_market_reference() {
        let engine = QuoteEngine::default();
        let snapshot = snapshot(
            vec![ves(RateMode::Manual)],
            vec![fee("Comisión PayPal", CostKind::Pct, 5.4), fee("Fijo PayPal", CostKind::Fixed, 0.3)],
        );

        let result = engine.quote(&snapshot, &QuoteRequest::new(100.0, "VES")).result;

        assert_eq!(result.market_reference_rate, 46.5);
        let expected = result.net_internal_receipt - result.final_amount / 46.5;
        assert!((result.net_profit - expected).abs() < 1e-9);
        assert!((result.equivalent_value - result.final_amount / 46.0).abs() < 1e-9);
    }

    #[test]
    fn test_buy_direction_flags_approximate_profit() {
        let engine = QuoteEngine::default();
        let snapshot = snapshot(vec![ves(RateMode::Manual)], Vec::new());

        let quote = engine.quote(&snapshot, &QuoteRequest::new(50.0, "VES").buy());

        assert!((quote.result.final_amount - 50.0 / 45.5).abs() < 1e-12);
        assert!((quote.result.net_profit - 1.0).abs() < 1e-12);
        assert!(quote.has_warning("APPROXIMATE_BUY_PROFIT"));
    }

    #[test]
    fn test_client_rate_and_preview() {
        let engine = QuoteEngine::default();
        let snapshot = snapshot(vec![ves(RateMode::Dynamic)], Vec::new());

        let rate = engine.client_rate(&snapshot, "VES", &ChannelSlug::primary(), Direction::Sell);
        assert!((rate - 40.92).abs() < 1e-9);
        assert_eq!(engine.client_rate(&snapshot, "VES", &ChannelSlug::from("USDT"), Direction::Sell), 0.0);

        let preview = QuoteEngine::rate_preview(&ves(RateMode::Manual));
        assert!((preview.equivalent_per_hundred - 100.0 * 45.5 / 46.0).abs() < 1e-9);
    }
}
