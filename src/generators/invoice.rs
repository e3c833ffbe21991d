//! Phase 3: supplier invoices with controlled anomaly injection.

use chrono::Duration;
use fake::faker::company::en::Bs;
use fake::Fake;
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use super::{fixed_ratio_pool, sample_amount, sample_factor, GenContext};
use crate::errors::{DatasetError, DatasetResult, Precondition};
use crate::models::{GoodsReceipt, Invoice, InvoiceStatus, PurchaseOrder, Vendor};

const INVOICE_WINDOW_DAYS: i64 = 90;
const AMOUNT_MIN: f64 = 10_000.0;
const AMOUNT_MAX: f64 = 1_000_000.0;

/// The first 10 invoices never copy an earlier one, and the look-back window
/// for DUPLICATE copies is bounded to the 20 prior invoices, excluding the
/// immediately preceding one.
const DUPLICATE_SEED_COUNT: usize = 10;
const DUPLICATE_LOOKBACK: usize = 20;

/// Gross amounts carry 18% GST split into two co-equal 9% components.
const GST_GROSS_DIVISOR: Decimal = dec!(1.18);
const GST_COMPONENT_RATE: Decimal = dec!(0.09);

/// 50:10:15:5 at K=80, scaled exactly for other K.
const STATUS_RATIO: [(InvoiceStatus, u32); 4] = [
    (InvoiceStatus::Matched, 50),
    (InvoiceStatus::Duplicate, 10),
    (InvoiceStatus::Exception, 15),
    (InvoiceStatus::Pending, 5),
];

const PAYMENT_TERMS: [&str; 4] = ["Net 30", "Net 45", "Net 60", "Due on Receipt"];

/// One injected defect per EXCEPTION invoice.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Anomaly {
    /// Amount perturbed by a multiplicative factor in [0.8, 1.3] relative to
    /// the PO amount.
    AmountMismatch,
    /// PO and GR references stripped from a PO-sourced invoice.
    MissingReference,
    /// Invoice dated strictly before its PO (or before the generation window
    /// when no PO is involved).
    DateShift,
}

/// Generate `count` invoices in order; order is load-bearing, since the
/// DUPLICATE look-back addresses earlier invoices by position.
///
/// Statuses come from a shuffled fixed-ratio pool. MATCHED and EXCEPTION
/// invoices are sourced from a uniformly chosen CLOSED purchase order and its
/// goods receipt; EXCEPTION invoices then have exactly one anomaly applied.
/// DUPLICATE invoices past the seed prefix copy the invoice number and vendor
/// of a bounded-look-back predecessor verbatim.
pub fn generate_invoices(
    ctx: &mut GenContext,
    vendors: &[Vendor],
    purchase_orders: &[PurchaseOrder],
    goods_receipts: &[GoodsReceipt],
    count: usize,
) -> DatasetResult<Vec<Invoice>> {
    let approved: Vec<&Vendor> = vendors.iter().filter(|v| v.is_approved()).collect();
    if approved.is_empty() {
        return Err(DatasetError::precondition(
            Precondition::NoApprovedVendors,
            format!("{count} invoices"),
        ));
    }

    let closed: Vec<&PurchaseOrder> =
        purchase_orders.iter().filter(|p| p.is_closed()).collect();
    let statuses = fixed_ratio_pool(count, &STATUS_RATIO, &mut ctx.rng);
    let window_start = ctx.anchor.date() - Duration::days(INVOICE_WINDOW_DAYS);

    let mut invoices: Vec<Invoice> = Vec::with_capacity(count);
    for i in 1..=count {
        let status = statuses[i - 1];
        let rng = &mut ctx.rng;

        // PO-sourced for MATCHED always, and for EXCEPTION so the injected
        // anomaly has a real reference to violate.
        let source_po = if matches!(status, InvoiceStatus::Matched | InvoiceStatus::Exception) {
            closed.choose(rng).copied()
        } else {
            None
        };

        let (mut vendor_id, mut amount, mut po_reference, mut gr_reference) = match source_po {
            Some(po) => {
                let gr = goods_receipts
                    .iter()
                    .find(|g| g.po_id == po.po_id)
                    .ok_or_else(|| {
                        DatasetError::precondition(
                            Precondition::MissingGoodsReceipt(po.po_id.clone()),
                            format!("{count} invoices"),
                        )
                    })?;
                (
                    po.vendor_id.clone(),
                    po.po_amount,
                    Some(po.po_id.clone()),
                    Some(gr.gr_id.clone()),
                )
            }
            None => {
                let vendor = approved.choose(rng).copied().unwrap_or(approved[0]);
                (
                    vendor.vendor_id.clone(),
                    sample_amount(rng, AMOUNT_MIN, AMOUNT_MAX),
                    None,
                    None,
                )
            }
        };

        // PO-sourced invoices postdate their PO; the date-shift anomaly
        // below relies on that baseline.
        let mut invoice_date = match source_po {
            Some(po) => po.po_date + Duration::days(rng.gen_range(5..=40)),
            None => window_start + Duration::days(rng.gen_range(0..=80)),
        };

        if status == InvoiceStatus::Exception {
            let anomaly = match source_po {
                Some(_) => *[
                    Anomaly::AmountMismatch,
                    Anomaly::MissingReference,
                    Anomaly::DateShift,
                ]
                .choose(rng)
                .unwrap_or(&Anomaly::DateShift),
                // Without a PO there is no reference or amount to violate.
                None => Anomaly::DateShift,
            };
            match anomaly {
                Anomaly::AmountMismatch => {
                    amount = (amount * sample_factor(rng, 0.8, 1.3)).round_dp(2);
                }
                Anomaly::MissingReference => {
                    po_reference = None;
                    gr_reference = None;
                }
                Anomaly::DateShift => {
                    let before = match source_po {
                        Some(po) => po.po_date,
                        None => window_start,
                    };
                    invoice_date = before - Duration::days(rng.gen_range(1..=15));
                }
            }
        }

        let invoice_number = if status == InvoiceStatus::Duplicate && i > DUPLICATE_SEED_COUNT {
            // Uniform source index in [max(1, i-20), i-2], 1-based: at most 20
            // prior invoices, never the immediately preceding one.
            let lo = i.saturating_sub(DUPLICATE_LOOKBACK).max(1);
            let hi = i - 2;
            let source = &invoices[rng.gen_range(lo..=hi) - 1];
            vendor_id = source.vendor_id.clone();
            source.invoice_number.clone()
        } else {
            fresh_invoice_number(rng, &vendor_id)
        };

        let (base_amount, cgst, sgst, total_amount) = gst_breakdown(amount);

        let invoice = Invoice {
            invoice_id: format!("INV-{:04}", i),
            vendor_id,
            invoice_number,
            invoice_date,
            due_date: invoice_date
                + Duration::days(*[30i64, 45, 60].choose(rng).unwrap_or(&30)),
            base_amount,
            cgst,
            sgst,
            igst: Decimal::ZERO,
            total_amount,
            currency: "INR".to_string(),
            status,
            po_reference,
            gr_reference,
            submission_date: invoice_date + Duration::days(rng.gen_range(0..=5)),
            payment_terms: PAYMENT_TERMS.choose(rng).copied().unwrap_or("Net 30").to_string(),
            description: Bs().fake_with_rng(rng),
            line_items: rng.gen_range(1..=8),
        };
        debug!(invoice_id = %invoice.invoice_id, status = %invoice.status, "generated invoice");
        invoices.push(invoice);
    }

    Ok(invoices)
}

/// Split a gross amount into base + CGST + SGST at the flat 18% regime.
/// Components are rounded to cent precision individually, so the stored
/// total is the rounded sum of the rounded parts.
fn gst_breakdown(gross: Decimal) -> (Decimal, Decimal, Decimal, Decimal) {
    let base = gross / GST_GROSS_DIVISOR;
    let component = (base * GST_COMPONENT_RATE).round_dp(2);
    let total = (base + component + component).round_dp(2);
    (base.round_dp(2), component, component, total)
}

fn fresh_invoice_number(rng: &mut rand::rngs::StdRng, vendor_id: &str) -> String {
    let vendor_seq = vendor_id.rsplit('-').next().unwrap_or("0000");
    format!("INV-{}-{:04}", vendor_seq, rng.gen_range(0..=9999))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{generate_procurement, generate_vendors, test_anchor};
    use assert_matches::assert_matches;

    struct Fixture {
        ctx: GenContext,
        vendors: Vec<Vendor>,
        purchase_orders: Vec<PurchaseOrder>,
        goods_receipts: Vec<GoodsReceipt>,
    }

    fn fixture(seed: u64) -> Fixture {
        let mut ctx = GenContext::new(seed, test_anchor());
        let vendors = generate_vendors(&mut ctx, 20);
        let (purchase_orders, goods_receipts) =
            generate_procurement(&mut ctx, &vendors, 50).unwrap();
        Fixture {
            ctx,
            vendors,
            purchase_orders,
            goods_receipts,
        }
    }

    fn invoices(fixture: &mut Fixture, count: usize) -> Vec<Invoice> {
        generate_invoices(
            &mut fixture.ctx,
            &fixture.vendors,
            &fixture.purchase_orders,
            &fixture.goods_receipts,
            count,
        )
        .unwrap()
    }

    #[test]
    fn status_pool_is_exact_at_documented_count() {
        let mut f = fixture(42);
        let invoices = invoices(&mut f, 80);
        let count = |s: InvoiceStatus| invoices.iter().filter(|v| v.status == s).count();
        assert_eq!(count(InvoiceStatus::Matched), 50);
        assert_eq!(count(InvoiceStatus::Duplicate), 10);
        assert_eq!(count(InvoiceStatus::Exception), 15);
        assert_eq!(count(InvoiceStatus::Pending), 5);
    }

    #[test]
    fn matched_invoices_resolve_to_closed_pos() {
        let mut f = fixture(42);
        let invoices = invoices(&mut f, 80);
        for invoice in invoices.iter().filter(|v| v.status == InvoiceStatus::Matched) {
            let po_id = invoice.po_reference.as_deref().expect("MATCHED without PO");
            let po = f
                .purchase_orders
                .iter()
                .find(|p| p.po_id == po_id)
                .expect("dangling PO reference");
            assert!(po.is_closed());
            assert_eq!(invoice.vendor_id, po.vendor_id);
            assert!(invoice.gr_reference.is_some());
        }
    }

    #[test]
    fn tax_components_reconcile_to_total() {
        let mut f = fixture(42);
        for invoice in invoices(&mut f, 80) {
            assert_eq!(invoice.cgst, invoice.sgst);
            assert_eq!(invoice.igst, Decimal::ZERO);
            let reconstructed =
                (invoice.base_amount + invoice.cgst + invoice.sgst).round_dp(2);
            let drift = (reconstructed - invoice.total_amount).abs();
            assert!(drift <= dec!(0.01), "{}: drift {}", invoice.invoice_id, drift);

            let expected_component =
                ((invoice.total_amount / GST_GROSS_DIVISOR) * GST_COMPONENT_RATE).round_dp(2);
            let component_drift = (invoice.cgst - expected_component).abs();
            assert!(component_drift <= dec!(0.01), "{}", invoice.invoice_id);
        }
    }

    #[test]
    fn duplicate_lookback_is_bounded_and_skips_predecessor() {
        let mut f = fixture(42);
        let invoices = invoices(&mut f, 200);
        for (idx0, invoice) in invoices.iter().enumerate() {
            let i = idx0 + 1;
            if invoice.status != InvoiceStatus::Duplicate || i <= DUPLICATE_SEED_COUNT {
                continue;
            }
            let sources: Vec<usize> = invoices[..idx0]
                .iter()
                .enumerate()
                .filter(|(_, earlier)| {
                    earlier.invoice_number == invoice.invoice_number
                        && earlier.vendor_id == invoice.vendor_id
                })
                .map(|(j, _)| j + 1)
                .collect();
            assert!(!sources.is_empty(), "{} copied nothing", invoice.invoice_id);
            let lo = i.saturating_sub(DUPLICATE_LOOKBACK).max(1);
            assert!(
                sources.iter().any(|j| (lo..=i - 2).contains(j)),
                "{}: no source within [{}, {}]",
                invoice.invoice_id,
                lo,
                i - 2
            );
        }
    }

    #[test]
    fn exception_invoices_carry_exactly_one_anomaly() {
        let mut f = fixture(42);
        let invoices = invoices(&mut f, 200);
        for invoice in invoices.iter().filter(|v| v.status == InvoiceStatus::Exception) {
            let mut anomalies = 0;
            if let Some(po_id) = invoice.po_reference.as_deref() {
                let po = f.purchase_orders.iter().find(|p| p.po_id == po_id).unwrap();
                if invoice.total_amount != gst_breakdown(po.po_amount).3 {
                    anomalies += 1; // amount mismatch
                }
                if invoice.invoice_date < po.po_date {
                    anomalies += 1; // date shift
                }
            } else {
                anomalies += 1; // reference stripped or never sourced
            }
            assert_eq!(anomalies, 1, "{}", invoice.invoice_id);
        }
    }

    #[test]
    fn zero_approved_vendors_is_fatal() {
        let mut f = fixture(42);
        let mut vendors = f.vendors.clone();
        for vendor in &mut vendors {
            vendor.status = crate::models::VendorStatus::Pending;
        }
        let err = generate_invoices(
            &mut f.ctx,
            &vendors,
            &f.purchase_orders,
            &f.goods_receipts,
            10,
        )
        .unwrap_err();
        assert_matches!(
            err,
            DatasetError::PreconditionFailed {
                precondition: Precondition::NoApprovedVendors,
                ..
            }
        );
    }

    #[test]
    fn missing_receipt_for_closed_po_is_fatal() {
        let mut f = fixture(42);
        let err = generate_invoices(
            &mut f.ctx,
            &f.vendors,
            &f.purchase_orders,
            &[], // receipts lost: CLOSED POs can no longer be resolved
            80,
        )
        .unwrap_err();
        assert_matches!(
            err,
            DatasetError::PreconditionFailed {
                precondition: Precondition::MissingGoodsReceipt(_),
                ..
            }
        );
    }
}
