use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::Display;

use super::vendor::RiskBand;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    Renew,
    Monitor,
    Retender,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskTrend {
    Stable,
    Improving,
    Declining,
}

/// Per-vendor performance aggregate, one row for every vendor that invoiced
/// at least once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierHistory {
    pub vendor_id: String,
    pub vendor_name: String,
    pub total_invoices_processed: usize,
    pub total_amount_paid: Decimal,
    pub on_time_payment_rate: f64,
    pub dispute_rate: f64,
    pub average_cycle_time_days: u32,
    pub last_invoice_date: NaiveDate,
    pub risk_band: RiskBand,
    pub risk_trend: RiskTrend,
    pub recommendation: Recommendation,
    pub quality_score: f64,
    pub delivery_score: f64,
    pub compliance_score: f64,
}
