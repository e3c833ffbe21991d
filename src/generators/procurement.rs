//! Phase 2: purchase orders and goods receipts.

use chrono::Duration;
use fake::faker::company::en::CatchPhrase;
use fake::faker::name::en::Name;
use fake::Fake;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::{sample_amount, sample_factor, GenContext};
use crate::errors::{DatasetError, DatasetResult, Precondition};
use crate::models::{GoodsReceipt, PurchaseOrder, PurchaseOrderStatus, Vendor};

const PO_WINDOW_DAYS: i64 = 120;
const PO_AMOUNT_MIN: f64 = 50_000.0;
const PO_AMOUNT_MAX: f64 = 5_000_000.0;
const RECEIPT_PROBABILITY: f64 = 0.7;
const EXACT_AMOUNT_PROBABILITY: f64 = 0.8;

const WAREHOUSES: [&str; 4] = ["WH-Mumbai", "WH-Bangalore", "WH-Delhi", "WH-Chennai"];

/// Generate `count` purchase orders against APPROVED vendors, plus a goods
/// receipt for roughly 70% of them.
///
/// A PO is CLOSED if and only if a goods receipt was generated for it; every
/// receipt postdates its PO by a positive offset and its amount is either the
/// PO amount exactly or a 95-100% fraction of it at cent precision.
///
/// Fails if no vendor is APPROVED; a PO against an unapproved vendor would
/// break the referential contract, so there is nothing sensible to fall back
/// to.
pub fn generate_procurement(
    ctx: &mut GenContext,
    vendors: &[Vendor],
    count: usize,
) -> DatasetResult<(Vec<PurchaseOrder>, Vec<GoodsReceipt>)> {
    let approved: Vec<&Vendor> = vendors.iter().filter(|v| v.is_approved()).collect();
    if approved.is_empty() {
        return Err(DatasetError::precondition(
            Precondition::NoApprovedVendors,
            format!("{count} purchase orders"),
        ));
    }

    let window_start = ctx.anchor.date() - Duration::days(PO_WINDOW_DAYS);
    let mut purchase_orders = Vec::with_capacity(count);
    let mut goods_receipts = Vec::new();

    for i in 0..count {
        let rng = &mut ctx.rng;
        let vendor = approved
            .choose(rng)
            .copied()
            .unwrap_or(approved[0]);
        let po_id = format!("PO-{:04}", i + 1);
        let po_date = window_start + Duration::days(rng.gen_range(0..=90));
        let po_amount = sample_amount(rng, PO_AMOUNT_MIN, PO_AMOUNT_MAX);
        let has_receipt = rng.gen_bool(RECEIPT_PROBABILITY);

        if has_receipt {
            let gr_date = po_date + Duration::days(rng.gen_range(10..=40));
            let gr_amount = if rng.gen_bool(EXACT_AMOUNT_PROBABILITY) {
                po_amount
            } else {
                (po_amount * sample_factor(rng, 0.95, 1.0)).round_dp(2)
            };
            goods_receipts.push(GoodsReceipt {
                gr_id: format!("GR-{:04}", goods_receipts.len() + 1),
                gr_number: format!("GR{}-{}", rng.gen_range(1000..=9999), rng.gen_range(1000..=9999)),
                po_id: po_id.clone(),
                vendor_id: vendor.vendor_id.clone(),
                gr_date,
                gr_amount,
                quantity_received: rng.gen_range(1..=100),
                warehouse: WAREHOUSES.choose(rng).copied().unwrap_or(WAREHOUSES[0]).to_string(),
                received_by: Name().fake_with_rng(rng),
            });
        }

        let po = PurchaseOrder {
            po_id,
            po_number: format!("PO{}-{}", rng.gen_range(1000..=9999), rng.gen_range(1000..=9999)),
            vendor_id: vendor.vendor_id.clone(),
            po_date,
            po_amount,
            currency: "INR".to_string(),
            description: CatchPhrase().fake_with_rng(rng),
            delivery_date: po_date + Duration::days(rng.gen_range(15..=45)),
            status: if has_receipt {
                PurchaseOrderStatus::Closed
            } else {
                PurchaseOrderStatus::Open
            },
            line_items_count: rng.gen_range(1..=10),
        };
        debug!(po_id = %po.po_id, status = %po.status, "generated purchase order");
        purchase_orders.push(po);
    }

    Ok((purchase_orders, goods_receipts))
}
