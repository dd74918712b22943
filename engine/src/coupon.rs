//! Coupon overlay.

use quotedesk_common::{CostKind, Coupon, Discount};

/// Find an active coupon by exact, case-sensitive code.
pub fn find_coupon<'a>(coupons: &'a [Coupon], code: &str) -> Option<&'a Coupon> {
    coupons.iter().find(|c| c.active && c.code == code)
}

/// Apply a discount to a payout. Percentages raise the payout as a bonus.
pub fn apply_discount(amount: f64, discount: &Discount) -> f64 {
    match discount.kind {
        CostKind::Pct => amount * (1.0 + discount.value / 100.0),
        CostKind::Fixed => amount + discount.value,
    }
}

/// Overlay the coupon named by `code` onto the payout.
///
/// Unknown or inactive codes leave the amount unchanged. Expiration is not
/// checked.
pub fn apply_coupon<'a>(
    amount: f64,
    coupons: &'a [Coupon],
    code: Option<&str>,
) -> (f64, Option<&'a Coupon>) {
    match code.and_then(|code| find_coupon(coupons, code)) {
        Some(coupon) => (apply_discount(amount, &coupon.client_discount), Some(coupon)),
        None => (amount, None),
    }
}
