use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Goods receipt, 1:1 with a CLOSED purchase order.
///
/// `gr_date` strictly postdates the PO date; `gr_amount` equals the PO amount
/// or a 95-100% fraction of it, at cent precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoodsReceipt {
    pub gr_id: String,
    pub gr_number: String,
    pub po_id: String,
    pub vendor_id: String,
    pub gr_date: NaiveDate,
    pub gr_amount: Decimal,
    pub quantity_received: u32,
    pub warehouse: String,
    pub received_by: String,
}
