//! Built-in demo configuration.

use chrono::NaiveDate;
use quotedesk_common::{
    ChannelProfile, ChannelSlug, ConfigSnapshot, CostCategory, CostGroup, CostItem, CostKind,
    Coupon, CouponCategory, CouponKind, CurrencyConfig, Discount, DynamicRateSettings,
    OperationProfile, ProfileId, ProfitMode, ProfitRule, RateMode, ReferenceItem,
};

fn reference(id: &str, label: &str, value: f64, active: bool, referential: bool) -> ReferenceItem {
    ReferenceItem {
        id: id.to_string(),
        label: label.to_string(),
        value,
        is_active: active,
        is_referential: referential,
    }
}

fn pct_rule(pct: f64) -> ProfitRule {
    ProfitRule { mode: ProfitMode::PctOnly, pct, fixed: 0.0 }
}

fn default_currencies() -> Vec<CurrencyConfig> {
    vec![
        CurrencyConfig {
            code: "VES".to_string(),
            name: "Bolívares".to_string(),
            enabled: true,
            rate_mode: RateMode::Manual,
            manual_rate: 45.50,
            secondary_rate: Some(46.00),
            dynamic_setting: DynamicRateSettings {
                references: vec![
                    reference("r1", "Promedio P2P", 46.50, true, false),
                    reference("r2", "BCV Oficial", 46.00, false, true),
                ],
                profit_rule: pct_rule(12.0),
                amount_ranges: Vec::new(),
            },
        },
        CurrencyConfig {
            code: "USDT".to_string(),
            name: "Tether (Cripto)".to_string(),
            enabled: true,
            rate_mode: RateMode::Manual,
            manual_rate: 0.95,
            secondary_rate: None,
            dynamic_setting: DynamicRateSettings {
                references: Vec::new(),
                profit_rule: pct_rule(5.0),
                amount_ranges: Vec::new(),
            },
        },
    ]
}

fn cost_item(id: &str, label: &str, kind: CostKind, value: f64) -> CostItem {
    CostItem {
        id: id.to_string(),
        label: label.to_string(),
        kind,
        category: CostCategory::Deductive,
        value,
        enabled: true,
        is_client_chargeable: true,
    }
}

fn default_costs() -> Vec<CostGroup> {
    vec![CostGroup {
        id: "group_bank".to_string(),
        label: "Deducciones".to_string(),
        items: vec![
            cost_item("c1", "Comisión Pasarela", CostKind::Pct, 5.4),
            cost_item("c1b", "Fijo Pasarela", CostKind::Fixed, 0.30),
        ],
    }]
}

fn welcome_coupon() -> Coupon {
    Coupon {
        id: "cp-1".to_string(),
        code: "BIENVENIDA".to_string(),
        category: CouponCategory::Client,
        kind: CouponKind::GlobalPromo,
        active: true,
        expiration_date: NaiveDate::from_ymd_opt(2025, 12, 31),
        description: Some("Bono de bienvenida".to_string()),
        admin_reward: None,
        client_discount: Discount { kind: CostKind::Fixed, value: 2.0 },
    }
}

fn profile(id: &str, name: &str, currencies: Vec<CurrencyConfig>, costs: Vec<CostGroup>, coupons: Vec<Coupon>) -> OperationProfile {
    OperationProfile {
        id: ProfileId::new(id),
        name: name.to_string(),
        active: true,
        currencies,
        costs,
        coupons,
    }
}

/// Demo snapshot with a PayPal balance channel and a USDT channel.
pub fn demo_snapshot() -> ConfigSnapshot {
    let ves = default_currencies().remove(0);

    let paypal = ChannelProfile {
        slug: ChannelSlug::new("PAYPAL"),
        label: "Saldo PayPal".to_string(),
        enabled: true,
        sell_profiles: vec![profile(
            "prof-sell-std",
            "Venta Estándar",
            default_currencies(),
            default_costs(),
            vec![welcome_coupon()],
        )],
        buy_profiles: vec![profile(
            "prof-buy-std",
            "Recarga Estándar",
            default_currencies(),
            default_costs(),
            Vec::new(),
        )],
    };

    let usdt = ChannelProfile {
        slug: ChannelSlug::new("USDT"),
        label: "Criptomonedas".to_string(),
        enabled: true,
        sell_profiles: vec![profile(
            "prof-sell-crypto",
            "Venta Crypto",
            vec![CurrencyConfig { manual_rate: 46.00, ..ves.clone() }],
            vec![CostGroup {
                id: "g1".to_string(),
                label: "Network Fee".to_string(),
                items: vec![cost_item("c1", "Gas", CostKind::Fixed, 1.0)],
            }],
            Vec::new(),
        )],
        buy_profiles: vec![profile(
            "prof-buy-crypto",
            "Compra Crypto",
            vec![CurrencyConfig { manual_rate: 48.00, ..ves }],
            Vec::new(),
            Vec::new(),
        )],
    };

    ConfigSnapshot::new(vec![paypal, usdt])
}
