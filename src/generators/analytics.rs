//! Phase 4: per-vendor supplier performance aggregates.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::Decimal;
use tracing::debug;

use super::GenContext;
use crate::models::{Invoice, Recommendation, RiskBand, RiskTrend, SupplierHistory, Vendor};

/// Sample a KPI in `[lo, hi]` at two decimal places.
fn sample_kpi(rng: &mut StdRng, lo: f64, hi: f64) -> f64 {
    (rng.gen_range(lo..=hi) * 100.0).round() / 100.0
}

/// Decision table for the renewal recommendation, evaluated in priority
/// order: the RENEW predicate is checked before RETENDER, first match wins.
fn recommend(
    rng: &mut StdRng,
    on_time_rate: f64,
    dispute_rate: f64,
    risk_band: RiskBand,
) -> (Recommendation, RiskTrend) {
    if on_time_rate > 95.0 && dispute_rate < 2.0 && risk_band == RiskBand::Low {
        (Recommendation::Renew, RiskTrend::Stable)
    } else if on_time_rate < 88.0 || dispute_rate > 4.0 || risk_band == RiskBand::High {
        (Recommendation::Retender, RiskTrend::Declining)
    } else {
        let trend = *[RiskTrend::Stable, RiskTrend::Improving]
            .choose(rng)
            .unwrap_or(&RiskTrend::Stable);
        (Recommendation::Monitor, trend)
    }
}

/// Derive one SupplierHistory row per vendor with at least one invoice, in
/// vendor order. Invoice count and total amount are aggregated from the
/// invoice set; the KPI fields are independently sampled within fixed ranges.
pub fn generate_supplier_history(
    ctx: &mut GenContext,
    vendors: &[Vendor],
    invoices: &[Invoice],
) -> Vec<SupplierHistory> {
    let mut history = Vec::new();

    for vendor in vendors {
        let vendor_invoices: Vec<&Invoice> = invoices
            .iter()
            .filter(|v| v.vendor_id == vendor.vendor_id)
            .collect();
        if vendor_invoices.is_empty() {
            continue;
        }

        let total_amount: Decimal = vendor_invoices.iter().map(|v| v.total_amount).sum();
        let last_invoice_date = vendor_invoices
            .iter()
            .map(|v| v.invoice_date)
            .max()
            .unwrap_or(ctx.anchor.date());

        let rng = &mut ctx.rng;
        let on_time_payment_rate = sample_kpi(rng, 85.0, 98.0);
        let dispute_rate = sample_kpi(rng, 0.0, 5.0);
        let (recommendation, risk_trend) =
            recommend(rng, on_time_payment_rate, dispute_rate, vendor.risk_band);

        let row = SupplierHistory {
            vendor_id: vendor.vendor_id.clone(),
            vendor_name: vendor.vendor_name.clone(),
            total_invoices_processed: vendor_invoices.len(),
            total_amount_paid: total_amount.round_dp(2),
            on_time_payment_rate,
            dispute_rate,
            average_cycle_time_days: rng.gen_range(15..=45),
            last_invoice_date,
            risk_band: vendor.risk_band,
            risk_trend,
            recommendation,
            quality_score: sample_kpi(rng, 75.0, 98.0),
            delivery_score: sample_kpi(rng, 80.0, 99.0),
            compliance_score: sample_kpi(rng, 85.0, 100.0),
        };
        debug!(vendor_id = %row.vendor_id, recommendation = %row.recommendation, "scored supplier");
        history.push(row);
    }

    history
}
