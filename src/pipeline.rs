//! The five-phase generation pipeline.
//!
//! Phases run strictly sequentially; each consumes the full, read-only output
//! of its predecessors. Any precondition failure aborts the run.

use std::path::Path;

use chrono::NaiveDateTime;
use tracing::info;

use crate::config::GeneratorConfig;
use crate::errors::DatasetResult;
use crate::export;
use crate::generators::{
    generate_events, generate_invoices, generate_procurement, generate_supplier_history,
    generate_vendors, GenContext,
};
use crate::manifest::Manifest;
use crate::models::{Event, GoodsReceipt, Invoice, PurchaseOrder, SupplierHistory, Vendor};

/// The complete generated dataset, in generation order.
///
/// `anchor` is the timestamp the run was resolved against; every date in the
/// tables and in the manifest derives from it.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub anchor: NaiveDateTime,
    pub vendors: Vec<Vendor>,
    pub purchase_orders: Vec<PurchaseOrder>,
    pub goods_receipts: Vec<GoodsReceipt>,
    pub invoices: Vec<Invoice>,
    pub supplier_history: Vec<SupplierHistory>,
    pub events: Vec<Event>,
}

/// Run all five synthesizer phases for the given configuration.
pub fn generate(config: &GeneratorConfig) -> DatasetResult<Dataset> {
    let anchor = config.anchor_or_now();
    let mut ctx = GenContext::new(config.seed, anchor);

    info!(seed = config.seed, anchor = %anchor, "generating dataset");

    let vendors = generate_vendors(&mut ctx, config.vendor_count);
    info!("generated {} vendors", vendors.len());

    let (purchase_orders, goods_receipts) =
        generate_procurement(&mut ctx, &vendors, config.purchase_order_count)?;
    info!(
        "generated {} purchase orders ({} with goods receipts)",
        purchase_orders.len(),
        goods_receipts.len()
    );

    let invoices = generate_invoices(
        &mut ctx,
        &vendors,
        &purchase_orders,
        &goods_receipts,
        config.invoice_count,
    )?;
    info!("generated {} invoices", invoices.len());

    let supplier_history = generate_supplier_history(&mut ctx, &vendors, &invoices);
    info!("generated supplier history for {} vendors", supplier_history.len());

    let events = generate_events(&mut ctx, &vendors, &invoices, config.event_count)?;
    info!("generated {} events", events.len());

    Ok(Dataset {
        anchor,
        vendors,
        purchase_orders,
        goods_receipts,
        invoices,
        supplier_history,
        events,
    })
}

/// Generate and export in one step: all tables plus the manifest.
pub fn run(config: &GeneratorConfig) -> DatasetResult<Manifest> {
    let dataset = generate(config)?;
    let manifest = Manifest::new(&dataset, dataset.anchor);
    export::write_dataset(&dataset, &manifest, Path::new(&config.output_dir))?;
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_anchor;
    use chrono::Duration;

    #[test]
    fn dataset_records_the_resolved_anchor() {
        let config = GeneratorConfig {
            anchor: Some(test_anchor()),
            ..Default::default()
        };
        let dataset = generate(&config).unwrap();
        assert_eq!(dataset.anchor, test_anchor());
    }

    #[test]
    fn wall_clock_anchor_is_resolved_once_per_run() {
        // The anchor falls back to "now"; the manifest must still describe
        // the same instant the dataset was generated against.
        let config = GeneratorConfig {
            anchor: None,
            ..Default::default()
        };
        let dataset = generate(&config).unwrap();
        let manifest = Manifest::new(&dataset, dataset.anchor);

        assert_eq!(manifest.generated_date, dataset.anchor);
        assert_eq!(manifest.date_range_end, dataset.anchor.date());
        let window_start = dataset.anchor.date() - Duration::days(60);
        for event in &dataset.events {
            assert!(event.timestamp.date() >= window_start);
            assert!(event.timestamp.date() <= dataset.anchor.date());
        }
    }
}
