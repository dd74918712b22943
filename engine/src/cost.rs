//! Cost aggregation.

use quotedesk_common::{ChannelSlug, CostCategory, CostGroup, CostItem};
use serde::Serialize;

/// Totals of the enabled cost items of a profile for one gross amount.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    /// Deductive items recognised as the channel's own fee. Display only:
    /// these amounts are also part of `ops_deductions` or
    /// `admin_absorbed_costs`.
    pub external_fee: f64,
    /// Deductive costs charged to the client.
    pub ops_deductions: f64,
    /// Deductive costs absorbed by the business.
    pub admin_absorbed_costs: f64,
    /// Additive costs (margin on top).
    pub service_fee: f64,
}

impl CostBreakdown {
    /// All deductive costs, whoever bears them.
    pub fn total_deductive(&self) -> f64 {
        self.ops_deductions + self.admin_absorbed_costs
    }
}

/// Whether a cost label looks like the channel's own fee.
pub fn is_channel_fee(label: &str, slug: &ChannelSlug, markers: &[String]) -> bool {
    let label = label.to_lowercase();
    let slug = slug.as_str().to_lowercase();
    (!slug.is_empty() && label.contains(&slug))
        || markers
            .iter()
            .any(|m| !m.is_empty() && label.contains(&m.to_lowercase()))
}

/// Sum the enabled items of every group into deduction and margin buckets.
pub fn aggregate(
    groups: &[CostGroup],
    amount_gross: f64,
    slug: &ChannelSlug,
    markers: &[String],
) -> CostBreakdown {
    let mut totals = CostBreakdown::default();

    for item in groups.iter().flat_map(|g| g.items.iter()).filter(|i| i.enabled) {
        accumulate(&mut totals, item, amount_gross, slug, markers);
    }

    totals
}

fn accumulate(
    totals: &mut CostBreakdown,
    item: &CostItem,
    amount_gross: f64,
    slug: &ChannelSlug,
    markers: &[String],
) {
    let value = item.raw_value(amount_gross);

    match item.category {
        CostCategory::Additive => totals.service_fee += value,
        CostCategory::Deductive => {
            if is_channel_fee(&item.label, slug, markers) {
                totals.external_fee += value;
            }
            if item.is_client_chargeable {
                totals.ops_deductions += value;
            } else {
                totals.admin_absorbed_costs += value;
            }
        }
    }
}
