//! End-to-end quote scenarios through the public engine API.

use proptest::prelude::*;
use quotedesk_common::{
    ChannelProfile, ChannelSlug, ConfigSnapshot, CostCategory, CostGroup, CostItem, CostKind,
    Coupon, CouponCategory, CouponKind, CurrencyConfig, Direction, Discount, DynamicRateSettings,
    OperationProfile, ProfitMode, ProfitRule, RateMode, ReferenceItem,
};
use quotedesk_engine::{EngineConfig, QuoteEngine, QuoteRequest, QuoteWarning};
use rust_decimal_macros::dec;

fn manual_currency(code: &str, rate: f64) -> CurrencyConfig {
    CurrencyConfig {
        code: code.to_string(),
        name: code.to_string(),
        enabled: true,
        rate_mode: RateMode::Manual,
        manual_rate: rate,
        secondary_rate: None,
        dynamic_setting: DynamicRateSettings::default(),
    }
}

fn dynamic_currency(code: &str, reference: f64, pct: f64) -> CurrencyConfig {
    CurrencyConfig {
        rate_mode: RateMode::Dynamic,
        dynamic_setting: DynamicRateSettings {
            references: vec![ReferenceItem {
                id: "r1".into(),
                label: "Promedio P2P".into(),
                value: reference,
                is_active: true,
                is_referential: false,
            }],
            profit_rule: ProfitRule { mode: ProfitMode::PctOnly, pct, fixed: 0.0 },
            amount_ranges: Vec::new(),
        },
        ..manual_currency(code, 0.0)
    }
}

fn cost(label: &str, kind: CostKind, category: CostCategory, value: f64) -> CostItem {
    CostItem {
        id: String::new(),
        label: label.to_string(),
        kind,
        category,
        value,
        enabled: true,
        is_client_chargeable: true,
    }
}

fn flat_coupon(code: &str, value: f64) -> Coupon {
    Coupon {
        id: format!("cp-{}", code),
        code: code.to_string(),
        category: CouponCategory::Client,
        kind: CouponKind::GlobalPromo,
        active: true,
        expiration_date: None,
        description: None,
        admin_reward: None,
        client_discount: Discount { kind: CostKind::Fixed, value },
    }
}

fn snapshot(currency: CurrencyConfig, costs: Vec<CostItem>, coupons: Vec<Coupon>) -> ConfigSnapshot {
    let profile = OperationProfile {
        id: "prof-std".into(),
        name: "Estándar".into(),
        active: true,
        currencies: vec![currency],
        costs: vec![CostGroup { id: "g1".into(), label: "Costos".into(), items: costs }],
        coupons,
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
fn scenario_a_fixed_rate_without_costs() {
    let engine = QuoteEngine::default();
    let snapshot = snapshot(manual_currency("C", 45.5), Vec::new(), Vec::new());

    let quote = engine.quote(&snapshot, &QuoteRequest::new(100.0, "C"));
    let display = quote.result.rounded();

    assert_eq!(display.final_amount, dec!(4550.00));
    assert_eq!(display.base_for_exchange, dec!(100));
    assert!(quote.warnings.is_empty());
}

#[test]
fn scenario_b_channel_fees_shrink_the_base() {
    let engine = QuoteEngine::default();
    let costs = vec![
        cost("Comisión PayPal", CostKind::Pct, CostCategory::Deductive, 5.4),
        cost("Fijo PayPal", CostKind::Fixed, CostCategory::Deductive, 0.30),
    ];
    let snapshot = snapshot(manual_currency("C", 45.5), costs, Vec::new());

    let result = engine.quote(&snapshot, &QuoteRequest::new(100.0, "C")).result;
    let display = result.rounded();

    assert_eq!(display.ops_deductions, dec!(5.70));
    assert_eq!(display.external_fee, dec!(5.70));
    assert_eq!(display.base_for_exchange, dec!(94.30));
    assert_eq!(display.final_amount, dec!(4290.65));
    assert_eq!(display.net_channel_amount, dec!(94.30));
}

#[test]
fn scenario_c_dynamic_rate() {
    let engine = QuoteEngine::default();
    let snapshot = snapshot(dynamic_currency("C", 46.50, 12.0), Vec::new(), Vec::new());

    let result = engine.quote(&snapshot, &QuoteRequest::new(100.0, "C")).result;

    assert_eq!(result.rounded().rate, dec!(40.92));
    assert!((result.rate - 40.92).abs() < 1e-9);
}

#[test]
fn scenario_d_flat_coupon() {
    let engine = QuoteEngine::default();
    let snapshot = snapshot(manual_currency("C", 45.5), Vec::new(), vec![flat_coupon("BIENVENIDA", 2.0)]);

    let result = engine
        .quote(&snapshot, &QuoteRequest::new(100.0, "C").with_coupon("BIENVENIDA"))
        .result;

    assert_eq!(result.rounded().final_amount, dec!(4552.00));
    assert_eq!(result.applied_coupon.map(|c| c.code), Some("BIENVENIDA".to_string()));
}

#[test]
fn scenario_e_buy_direction() {
    let engine = QuoteEngine::default();
    let snapshot = snapshot(manual_currency("C", 45.5), Vec::new(), Vec::new());

    let result = engine.quote(&snapshot, &QuoteRequest::new(50.0, "C").buy()).result;

    assert_eq!(result.direction, Direction::Buy);
    assert!((result.final_amount - 50.0 / 45.5).abs() < 1e-12);
    assert_eq!(result.rounded().final_amount, dec!(1.0989));
}

#[test]
fn buy_direction_with_zero_rate_does_not_divide_by_zero() {
    let engine = QuoteEngine::default();
    let snapshot = snapshot(manual_currency("C", 0.0), Vec::new(), Vec::new());

    let quote = engine.quote(&snapshot, &QuoteRequest::new(50.0, "C").buy());

    assert!(quote.result.final_amount.is_finite());
    assert_eq!(quote.result.final_amount, 50.0);
    assert!(quote.has_warning("DIVISION_GUARD"));
    assert!(quote.has_warning("ZERO_RATE"));
}

#[test]
fn zero_gross_propagates_zero() {
    let engine = QuoteEngine::default();
    let costs = vec![cost("Comisión PayPal", CostKind::Pct, CostCategory::Deductive, 5.4)];
    let snapshot = snapshot(manual_currency("C", 45.5), costs, Vec::new());

    let result = engine.quote(&snapshot, &QuoteRequest::new(0.0, "C")).result;

    assert_eq!(result.ops_deductions, 0.0);
    assert_eq!(result.base_for_exchange, 0.0);
    assert_eq!(result.final_amount, 0.0);
    assert_eq!(result.net_profit, 0.0);
}

/// Additive costs are margin on top and leave the exchangeable base alone,
/// unless the engine is explicitly configured to subtract them.
#[test]
fn additive_costs_and_the_exchange_base() {
    let costs = vec![cost("Servicio", CostKind::Fixed, CostCategory::Additive, 3.0)];
    let snapshot = snapshot(manual_currency("C", 10.0), costs, Vec::new());
    let request = QuoteRequest::new(100.0, "C");

    let default_engine = QuoteEngine::default();
    let kept = default_engine.quote(&snapshot, &request).result;
    assert_eq!(kept.service_fee, 3.0);
    assert_eq!(kept.base_for_exchange, 100.0);
    assert_eq!(kept.final_amount, 1000.0);

    let subtracting = QuoteEngine::new(EngineConfig {
        additive_costs_reduce_base: true,
        ..EngineConfig::default()
    });
    let reduced = subtracting.quote(&snapshot, &request).result;
    assert_eq!(reduced.base_for_exchange, 97.0);
    assert_eq!(reduced.final_amount, 970.0);
    assert_eq!(reduced.net_internal_receipt, kept.net_internal_receipt);
}

#[test]
fn absorbed_costs_reduce_receipt_not_payout() {
    let mut absorbed = cost("Banco", CostKind::Fixed, CostCategory::Deductive, 4.0);
    absorbed.is_client_chargeable = false;
    let snapshot = snapshot(manual_currency("C", 10.0), vec![absorbed], Vec::new());

    let result = QuoteEngine::default()
        .quote(&snapshot, &QuoteRequest::new(100.0, "C"))
        .result;

    assert_eq!(result.admin_absorbed_costs, 4.0);
    assert_eq!(result.net_internal_receipt, 96.0);
    assert_eq!(result.base_for_exchange, 100.0);
    assert_eq!(result.final_amount, 1000.0);
}

#[test]
fn payout_beyond_display_range_is_reported() {
    let snapshot = snapshot(manual_currency("C", 45.5), Vec::new(), Vec::new());

    let quote = QuoteEngine::default().quote(&snapshot, &QuoteRequest::new(1e28, "C"));

    assert_eq!(quote.result.final_amount, 1e28 * 45.5);
    assert_eq!(quote.result.rounded().final_amount, dec!(0));
    assert!(quote.has_warning("UNREPRESENTABLE"));
    assert!(quote.warnings.iter().any(|w| matches!(
        w,
        QuoteWarning::Unrepresentable { field, .. } if field == "finalAmount"
    )));
    assert!(!quote.is_misconfigured());
}

proptest! {
    #[test]
    fn receipt_identity_holds_end_to_end(
        gross in 0.0f64..100_000.0,
        pct_fee in 0.0f64..20.0,
        flat_fee in 0.0f64..50.0,
        absorbed_fee in 0.0f64..50.0,
        rate in 0.0f64..100.0,
        buy in any::<bool>(),
    ) {
        let mut absorbed = cost("Banco", CostKind::Fixed, CostCategory::Deductive, absorbed_fee);
        absorbed.is_client_chargeable = false;
        let costs = vec![
            cost("Comisión PayPal", CostKind::Pct, CostCategory::Deductive, pct_fee),
            cost("Fijo", CostKind::Fixed, CostCategory::Deductive, flat_fee),
            absorbed,
        ];
        let snapshot = snapshot(manual_currency("C", rate), costs, Vec::new());
        let direction = if buy { Direction::Buy } else { Direction::Sell };

        let result = QuoteEngine::default()
            .quote(&snapshot, &QuoteRequest::new(gross, "C").direction(direction))
            .result;

        let recombined = result.net_internal_receipt + result.ops_deductions + result.admin_absorbed_costs;
        prop_assert!((recombined - gross).abs() <= 1e-9 * (1.0 + gross));
        prop_assert!(result.base_for_exchange <= gross);
        prop_assert_eq!(result.base_for_exchange, (gross - result.ops_deductions).max(0.0));
        prop_assert!(result.rate >= 0.0);
        prop_assert!(result.final_amount.is_finite());
    }
}
