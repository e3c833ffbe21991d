use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EventOutcome {
    Success,
    Warning,
    Error,
}

/// Audit-trail event.
///
/// Events are decorative noise, not a real audit trail: `invoice_id` is drawn
/// independently of `vendor_id`, so the two are not guaranteed consistent
/// with each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub event_id: String,
    pub timestamp: NaiveDateTime,
    pub vendor_id: String,
    pub invoice_id: Option<String>,
    pub agent_name: String,
    pub event_type: String,
    pub description: String,
    pub status: EventOutcome,
    pub confidence_score: f64,
    pub processing_time_ms: u32,
}
