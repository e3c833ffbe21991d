use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    /// Three-way matched against a CLOSED PO and its goods receipt.
    Matched,
    /// Invoice number and vendor copied verbatim from an earlier invoice,
    /// deliberately violating invoice-number uniqueness.
    Duplicate,
    /// Carries exactly one injected anomaly (amount, references, or date).
    Exception,
    /// Freestanding invoice awaiting processing; no PO linkage.
    Pending,
}

/// Supplier invoice.
///
/// Tax model is a flat 18% GST split into two co-equal components:
/// `base_amount` = gross/1.18, `cgst` = `sgst` = round(base x 0.09, 2),
/// `total_amount` = round(base + cgst + sgst, 2). `igst` is reserved for an
/// inter-state tax regime and always zero here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub invoice_id: String,
    pub vendor_id: String,
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
    pub due_date: NaiveDate,
    pub base_amount: Decimal,
    pub cgst: Decimal,
    pub sgst: Decimal,
    pub igst: Decimal,
    pub total_amount: Decimal,
    pub currency: String,
    pub status: InvoiceStatus,
    pub po_reference: Option<String>,
    pub gr_reference: Option<String>,
    pub submission_date: NaiveDate,
    pub payment_terms: String,
    pub description: String,
    pub line_items: u32,
}

impl Invoice {
    pub fn has_po_linkage(&self) -> bool {
        self.po_reference.is_some()
    }
}
