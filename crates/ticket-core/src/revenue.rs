//! Revenue Calculator
//!
//! Fixed cascade from ticket sales to the organiser's final share:
//!
//! ```text
//! gross ─┬─ IVA ─┬─ SIAE ─┬─ fees ──► net ─┬─ municipal share ──► final
//! ```
//!
//! Nothing is rounded and nothing is clamped; a negative final figure is a
//! legitimate answer to unrealistic inputs.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{RESIDENT_OPEN_SHARE, RESIDENT_SINGLE_SHARE, SIAE_RATE, VAT_RATE};
use crate::data_model::{PriceCategory, RevenueBreakdown, SimulationParams};

/// Rates applied by the calculator. `Default` uses the constants in
/// [`crate::constants`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxModel {
    pub vat_rate: f64,
    pub siae_rate: f64,
    pub resident_single_share: f64,
    pub resident_open_share: f64,
}

impl Default for TaxModel {
    fn default() -> Self {
        Self {
            vat_rate: VAT_RATE,
            siae_rate: SIAE_RATE,
            resident_single_share: RESIDENT_SINGLE_SHARE,
            resident_open_share: RESIDENT_OPEN_SHARE,
        }
    }
}

/// Compute the revenue breakdown with the standard tax model
pub fn compute_revenue(params: &SimulationParams) -> RevenueBreakdown {
    compute_revenue_with(params, &TaxModel::default())
}

/// Compute the revenue breakdown with an explicit tax model
pub fn compute_revenue_with(params: &SimulationParams, tax: &TaxModel) -> RevenueBreakdown {
    let mut gross_revenue = 0.0;
    let mut total_fees = 0.0;

    for (category, attendees) in category_attendees_with(params, tax) {
        let price = params.prices.get(category);
        gross_revenue += attendees * price.base;
        // residents buying single tickets pay no booking fee
        if category != PriceCategory::ResidentSingle {
            total_fees += attendees * price.fee;
        }
    }

    let iva = gross_revenue * tax.vat_rate;
    let siae = gross_revenue * tax.siae_rate;
    let net_revenue = gross_revenue - iva - siae - total_fees;
    let commune_share = net_revenue * (params.municipal_pct / 100.0);
    let final_net_revenue = net_revenue - commune_share;

    debug!(
        gross_revenue,
        total_fees,
        net_revenue,
        final_net_revenue,
        "revenue recomputed"
    );

    RevenueBreakdown {
        gross_revenue,
        total_fees,
        iva,
        siae,
        net_revenue,
        commune_share,
        final_net_revenue,
    }
}

/// Attendees per price category, in [`PriceCategory::ALL`] order
pub fn category_attendees(params: &SimulationParams) -> Vec<(PriceCategory, f64)> {
    category_attendees_with(params, &TaxModel::default())
}

fn category_attendees_with(params: &SimulationParams, tax: &TaxModel) -> Vec<(PriceCategory, f64)> {
    let total = params.total_attendees as f64;
    let non_resident_count = total * (1.0 - params.resident_pct / 100.0);
    let resident_count = total * (params.resident_pct / 100.0);

    let mut counts: Vec<(PriceCategory, f64)> = params
        .distribution
        .iter()
        .map(|(category, pct)| (PriceCategory::from(category), non_resident_count * pct / 100.0))
        .collect();

    counts.push((
        PriceCategory::ResidentSingle,
        resident_count * tax.resident_single_share,
    ));
    counts.push((
        PriceCategory::ResidentOpen,
        resident_count * tax.resident_open_share,
    ));

    counts
}
