use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::Display;

/// Vendor onboarding status.
///
/// Only APPROVED vendors may be referenced by purchase orders or by invoices
/// carrying a PO linkage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum VendorStatus {
    Approved,
    Pending,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

/// Vendor master record.
///
/// Field order is the export column order. Domestic (India) vendors carry
/// PAN/GST/IFSC identifiers and a state; foreign vendors carry a numeric tax
/// id and a SWIFT code instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub vendor_id: String,
    pub vendor_name: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub industry: String,
    pub contact_email: String,
    pub phone: String,
    pub status: VendorStatus,
    pub risk_band: RiskBand,
    pub onboarding_date: NaiveDate,
    pub last_updated: NaiveDate,
    pub pan: String,
    pub gst: String,
    pub tax_id: String,
    pub registration_number: String,
    pub website: String,
    pub primary_contact_name: String,
    pub primary_contact_title: String,
    pub bank_account: String,
    pub ifsc_code: String,
    pub swift_code: String,
}

impl Vendor {
    pub fn is_approved(&self) -> bool {
        self.status == VendorStatus::Approved
    }

    pub fn is_domestic(&self) -> bool {
        self.country == "India"
    }
}
