//! Static metadata snapshot of a generated dataset.
//!
//! The manifest summarizes entity counts and the fixed agent/persona
//! catalogs. It is emitted last and read by nothing else in the pipeline.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::generators::event::AGENTS;
use crate::pipeline::Dataset;

pub const DATASET_NAME: &str = "Source-to-Settle AI Demo Dataset";

pub const PERSONAS: [&str; 3] = ["Ananya(Procurement)", "Rohan(Finance)", "Neha(Manager)"];

/// Formats the exported artifacts come in.
pub const FILE_FORMATS: [&str; 2] = ["CSV", "JSON"];

/// Invoices span the trailing 90 days before the anchor; the manifest's date
/// range mirrors that window.
const DATE_RANGE_DAYS: i64 = 90;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub dataset_name: String,
    pub version: String,
    pub generated_date: NaiveDateTime,
    pub total_vendors: usize,
    pub total_purchase_orders: usize,
    pub total_goods_receipts: usize,
    pub total_invoices: usize,
    pub total_supplier_records: usize,
    pub total_events: usize,
    pub date_range_start: NaiveDate,
    pub date_range_end: NaiveDate,
    pub agents_covered: String,
    pub personas_supported: String,
    pub file_formats: String,
}

impl Manifest {
    pub fn new(dataset: &Dataset, anchor: NaiveDateTime) -> Self {
        Self {
            dataset_name: DATASET_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_date: anchor,
            total_vendors: dataset.vendors.len(),
            total_purchase_orders: dataset.purchase_orders.len(),
            total_goods_receipts: dataset.goods_receipts.len(),
            total_invoices: dataset.invoices.len(),
            total_supplier_records: dataset.supplier_history.len(),
            total_events: dataset.events.len(),
            date_range_start: anchor.date() - Duration::days(DATE_RANGE_DAYS),
            date_range_end: anchor.date(),
            agents_covered: AGENTS
                .iter()
                .map(|a| a.trim_end_matches("Agent"))
                .collect::<Vec<_>>()
                .join(","),
            personas_supported: PERSONAS.join(","),
            file_formats: FILE_FORMATS.join(","),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::generators::test_anchor;
    use crate::pipeline::generate;

    #[test]
    fn counts_match_generated_sequences() {
        let config = GeneratorConfig {
            anchor: Some(test_anchor()),
            ..Default::default()
        };
        let dataset = generate(&config).unwrap();
        let manifest = Manifest::new(&dataset, test_anchor());

        assert_eq!(manifest.total_vendors, dataset.vendors.len());
        assert_eq!(manifest.total_purchase_orders, dataset.purchase_orders.len());
        assert_eq!(manifest.total_goods_receipts, dataset.goods_receipts.len());
        assert_eq!(manifest.total_invoices, dataset.invoices.len());
        assert_eq!(manifest.total_supplier_records, dataset.supplier_history.len());
        assert_eq!(manifest.total_events, dataset.events.len());
        assert_eq!(manifest.agents_covered.matches(',').count(), 5);
    }
}
