use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::Display;

/// Purchase-order status. CLOSED if and only if exactly one goods receipt
/// references the PO.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PurchaseOrderStatus {
    Open,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub po_id: String,
    pub po_number: String,
    pub vendor_id: String,
    pub po_date: NaiveDate,
    pub po_amount: Decimal,
    pub currency: String,
    pub description: String,
    pub delivery_date: NaiveDate,
    pub status: PurchaseOrderStatus,
    pub line_items_count: u32,
}

impl PurchaseOrder {
    pub fn is_closed(&self) -> bool {
        self.status == PurchaseOrderStatus::Closed
    }
}
