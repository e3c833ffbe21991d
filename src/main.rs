//! Generate the full source-to-settle demo dataset.
//!
//! Run with: cargo run --bin settlegen
//!
//! This creates, under the output directory:
//! - vendor master records with exact status/risk ratios
//! - purchase orders and goods receipts for approved vendors
//! - invoices with injected duplicate/exception defects
//! - supplier performance history and renewal recommendations
//! - a chronological audit-event log
//! - a manifest summarizing all of the above

use anyhow::Context;
use chrono::NaiveDateTime;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use validator::Validate;

use settlegen::models::{InvoiceStatus, VendorStatus};
use settlegen::{generate, export, GeneratorConfig, Manifest};

#[derive(Parser, Debug)]
#[command(name = "settlegen", version, about = "Deterministic source-to-settle demo dataset generator")]
struct Cli {
    /// Random seed; identical seed + counts + anchor give identical output
    #[arg(long)]
    seed: Option<u64>,

    /// Number of vendors to generate
    #[arg(long)]
    vendors: Option<usize>,

    /// Number of purchase orders to generate
    #[arg(long)]
    purchase_orders: Option<usize>,

    /// Number of invoices to generate
    #[arg(long)]
    invoices: Option<usize>,

    /// Number of audit events to generate
    #[arg(long)]
    events: Option<usize>,

    /// Output directory for the CSV tables and manifest
    #[arg(long)]
    out_dir: Option<String>,

    /// Anchor timestamp (e.g. 2025-06-01T12:00:00); defaults to now
    #[arg(long, value_parser = parse_anchor)]
    anchor: Option<NaiveDateTime>,

    /// Print the manifest as JSON to stdout after generation
    #[arg(long)]
    json: bool,
}

fn parse_anchor(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
}

/// Fold command-line flags into the loaded configuration, then re-validate:
/// overrides bypass `GeneratorConfig::load` and must not smuggle in values
/// the file/env path would have rejected.
fn apply_overrides(
    config: &mut GeneratorConfig,
    cli: &Cli,
) -> Result<(), validator::ValidationErrors> {
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(n) = cli.vendors {
        config.vendor_count = n;
    }
    if let Some(n) = cli.purchase_orders {
        config.purchase_order_count = n;
    }
    if let Some(n) = cli.invoices {
        config.invoice_count = n;
    }
    if let Some(n) = cli.events {
        config.event_count = n;
    }
    if let Some(dir) = &cli.out_dir {
        config.output_dir = dir.clone();
    }
    if cli.anchor.is_some() {
        config.anchor = cli.anchor;
    }
    config.validate()
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    let mut config = GeneratorConfig::load().context("failed to load configuration")?;
    apply_overrides(&mut config, &cli).context("invalid command-line overrides")?;

    info!("=== Source-to-Settle Dataset Generator ===");
    info!(
        "Target: {} vendors, {} purchase orders, {} invoices, {} events (seed {})",
        config.vendor_count,
        config.purchase_order_count,
        config.invoice_count,
        config.event_count,
        config.seed
    );

    let dataset = generate(&config).context("dataset generation failed")?;

    let approved = dataset
        .vendors
        .iter()
        .filter(|v| v.status == VendorStatus::Approved)
        .count();
    info!(
        "  vendors: {} total, {} APPROVED",
        dataset.vendors.len(),
        approved
    );
    let closed = dataset.purchase_orders.iter().filter(|p| p.is_closed()).count();
    info!(
        "  purchase orders: {} total, {} CLOSED with receipts, {} OPEN",
        dataset.purchase_orders.len(),
        closed,
        dataset.purchase_orders.len() - closed
    );
    for status in [
        InvoiceStatus::Matched,
        InvoiceStatus::Duplicate,
        InvoiceStatus::Exception,
        InvoiceStatus::Pending,
    ] {
        let n = dataset.invoices.iter().filter(|v| v.status == status).count();
        info!("  invoices {}: {}", status, n);
    }
    info!("  supplier history rows: {}", dataset.supplier_history.len());
    info!("  events: {}", dataset.events.len());

    let manifest = Manifest::new(&dataset, dataset.anchor);
    export::write_dataset(&dataset, &manifest, std::path::Path::new(&config.output_dir))
        .context("failed to write dataset")?;

    info!("=== Generation Complete ===");
    info!("Tables written to {}", config.output_dir);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&manifest)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_loaded_values() {
        let cli = Cli::parse_from(["settlegen", "--seed", "7", "--vendors", "5", "--out-dir", "tmp"]);
        let mut config = GeneratorConfig::default();
        apply_overrides(&mut config, &cli).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.vendor_count, 5);
        assert_eq!(config.output_dir, "tmp");
        // Untouched fields keep their loaded values.
        assert_eq!(config.invoice_count, 80);
    }

    #[test]
    fn zero_count_override_is_rejected() {
        let cli = Cli::parse_from(["settlegen", "--events", "0"]);
        let mut config = GeneratorConfig::default();
        assert!(apply_overrides(&mut config, &cli).is_err());
    }

    #[test]
    fn empty_out_dir_override_is_rejected() {
        let cli = Cli::parse_from(["settlegen", "--out-dir", ""]);
        let mut config = GeneratorConfig::default();
        assert!(apply_overrides(&mut config, &cli).is_err());
    }
}
