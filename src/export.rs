//! Tabular export: one CSV table per entity set, plus the manifest.
//!
//! Headers come from the model struct field order; re-exporting the same
//! dataset is byte-identical.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::errors::DatasetResult;
use crate::manifest::Manifest;
use crate::pipeline::Dataset;

pub const VENDORS_FILE: &str = "vendors.csv";
pub const PURCHASE_ORDERS_FILE: &str = "po_gr.csv";
pub const GOODS_RECEIPTS_FILE: &str = "goods_receipts.csv";
pub const INVOICES_FILE: &str = "invoices.csv";
pub const SUPPLIER_HISTORY_FILE: &str = "supplier_history.csv";
pub const EVENTS_FILE: &str = "events_sample.csv";
pub const MANIFEST_CSV_FILE: &str = "manifest_summary.csv";
pub const MANIFEST_JSON_FILE: &str = "manifest.json";

/// Serialize one record sequence to a CSV file with a header row.
pub fn write_table<T: Serialize>(path: &Path, rows: &[T]) -> DatasetResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write every entity table plus the manifest (CSV row and JSON) to `dir`,
/// creating it if needed.
pub fn write_dataset(dataset: &Dataset, manifest: &Manifest, dir: &Path) -> DatasetResult<()> {
    fs::create_dir_all(dir)?;

    write_table(&dir.join(VENDORS_FILE), &dataset.vendors)?;
    write_table(&dir.join(PURCHASE_ORDERS_FILE), &dataset.purchase_orders)?;
    write_table(&dir.join(GOODS_RECEIPTS_FILE), &dataset.goods_receipts)?;
    write_table(&dir.join(INVOICES_FILE), &dataset.invoices)?;
    write_table(&dir.join(SUPPLIER_HISTORY_FILE), &dataset.supplier_history)?;
    write_table(&dir.join(EVENTS_FILE), &dataset.events)?;
    write_table(&dir.join(MANIFEST_CSV_FILE), std::slice::from_ref(manifest))?;

    let json = serde_json::to_string_pretty(manifest)?;
    fs::write(dir.join(MANIFEST_JSON_FILE), json)?;

    info!(dir = %dir.display(), "dataset written");
    Ok(())
}
