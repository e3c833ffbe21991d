//! Phase 5: audit-trail events.

use chrono::Duration;
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::GenContext;
use crate::errors::{DatasetError, DatasetResult, Precondition};
use crate::models::{Event, EventOutcome, Invoice, Vendor};

const EVENT_WINDOW_DAYS: i64 = 60;

pub const AGENTS: [&str; 6] = [
    "VendorIntakeAgent",
    "RiskGuardAgent",
    "ContractCraftAgent",
    "InvoiceIQAgent",
    "PayFlowAgent",
    "Supplier360Agent",
];

pub const EVENT_TYPES: [&str; 19] = [
    "VENDOR_CREATED",
    "VENDOR_APPROVED",
    "VENDOR_REJECTED",
    "KYC_EXTRACTED",
    "RISK_ASSESSED",
    "RISK_ESCALATED",
    "CONTRACT_GENERATED",
    "CONTRACT_REVIEWED",
    "CONTRACT_SIGNED",
    "INVOICE_RECEIVED",
    "INVOICE_OCR_COMPLETED",
    "INVOICE_MATCHED",
    "INVOICE_DUPLICATE_DETECTED",
    "INVOICE_EXCEPTION_FLAGGED",
    "PAYMENT_QUEUED",
    "PAYMENT_PROCESSED",
    "PAYMENT_FAILED",
    "PERFORMANCE_CALCULATED",
    "RECOMMENDATION_GENERATED",
];

/// Outcome weights: 85% SUCCESS, 10% WARNING, 5% ERROR.
const OUTCOMES: [(EventOutcome, u32); 3] = [
    (EventOutcome::Success, 85),
    (EventOutcome::Warning, 10),
    (EventOutcome::Error, 5),
];

/// Generate `count` audit events referencing vendors and invoices, sorted by
/// timestamp ascending as a final step.
///
/// Events are decorative noise: only event types containing "INVOICE" get an
/// invoice reference, drawn uniformly from the full invoice set without
/// regard to the event's vendor.
pub fn generate_events(
    ctx: &mut GenContext,
    vendors: &[Vendor],
    invoices: &[Invoice],
    count: usize,
) -> DatasetResult<Vec<Event>> {
    let approved: Vec<&Vendor> = vendors.iter().filter(|v| v.is_approved()).collect();
    if approved.is_empty() {
        return Err(DatasetError::precondition(
            Precondition::NoApprovedVendors,
            format!("{count} events"),
        ));
    }

    let window_start = ctx.anchor.date() - Duration::days(EVENT_WINDOW_DAYS);
    let outcome_weights = WeightedIndex::new(OUTCOMES.iter().map(|(_, w)| *w))
        .map_err(|e| DatasetError::Config(format!("invalid outcome weights: {e}")))?;

    let mut events = Vec::with_capacity(count);
    for i in 1..=count {
        let rng = &mut ctx.rng;
        // Business-hour bias: any day of the window, 09:00-18:59 local.
        let day = window_start + Duration::days(rng.gen_range(0..=59));
        let timestamp = day.and_time(chrono::NaiveTime::default())
            + Duration::hours(rng.gen_range(9..=18))
            + Duration::minutes(rng.gen_range(0..=59))
            + Duration::seconds(rng.gen_range(0..=59));

        let vendor_id = approved
            .choose(rng)
            .map(|v| v.vendor_id.clone())
            .unwrap_or_default();
        let agent_name = AGENTS.choose(rng).copied().unwrap_or(AGENTS[0]).to_string();
        let event_type = EVENT_TYPES.choose(rng).copied().unwrap_or(EVENT_TYPES[0]);

        let invoice_id = if event_type.contains("INVOICE") {
            invoices.choose(rng).map(|v| v.invoice_id.clone())
        } else {
            None
        };

        let description = describe(rng, event_type, &agent_name, &vendor_id);
        let outcome = OUTCOMES[outcome_weights.sample(rng)].0;

        let event = Event {
            event_id: format!("EVT-{:05}", i),
            timestamp,
            vendor_id,
            invoice_id,
            agent_name,
            event_type: event_type.to_string(),
            description,
            status: outcome,
            confidence_score: (rng.gen_range(0.75_f64..=0.99) * 10_000.0).round() / 10_000.0,
            processing_time_ms: rng.gen_range(100..=5000),
        };
        debug!(event_id = %event.event_id, event_type = %event.event_type, "generated event");
        events.push(event);
    }

    // Consumers read the log chronologically, not in generation order.
    events.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    Ok(events)
}

/// Per-type description template, generic fallback for types without one.
fn describe(
    rng: &mut rand::rngs::StdRng,
    event_type: &str,
    agent_name: &str,
    vendor_id: &str,
) -> String {
    match event_type {
        "VENDOR_CREATED" => format!("New vendor profile created for {vendor_id}"),
        "RISK_ASSESSED" => format!(
            "Risk score calculated: {}/100. Risk band assigned.",
            rng.gen_range(60..=95)
        ),
        "INVOICE_MATCHED" => {
            "Invoice successfully matched to PO and GR. Amount validated.".to_string()
        }
        "INVOICE_DUPLICATE_DETECTED" => {
            "Duplicate invoice detected. Same invoice number already processed.".to_string()
        }
        "PAYMENT_PROCESSED" => format!(
            "Payment of INR {} processed successfully",
            rng.gen_range(50_000..=500_000)
        ),
        "RECOMMENDATION_GENERATED" => format!(
            "Performance analysis complete. Recommendation: {}",
            ["RENEW", "MONITOR", "RETENDER"]
                .choose(rng)
                .copied()
                .unwrap_or("MONITOR")
        ),
        _ => format!("{agent_name} processed {event_type} for {vendor_id}"),
    }
}
