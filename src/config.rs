use chrono::NaiveDateTime;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;
use tracing::info;
use validator::Validate;

use crate::errors::DatasetError;

/// Default values for configuration
const DEFAULT_SEED: u64 = 42;
const DEFAULT_VENDORS: usize = 20;
const DEFAULT_PURCHASE_ORDERS: usize = 50;
const DEFAULT_INVOICES: usize = 80;
const DEFAULT_EVENTS: usize = 100;
const DEFAULT_OUTPUT_DIR: &str = "data";
const ENV_PREFIX: &str = "SETTLEGEN";

/// Generator configuration with validation.
///
/// Loaded from defaults, an optional `settlegen.toml`, and `SETTLEGEN_*`
/// environment variables, in that order of precedence (later wins).
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Seed for the pseudo-random generator; identical seed + counts +
    /// anchor produce byte-identical output tables.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Number of vendor master records to generate
    #[serde(default = "default_vendors")]
    #[validate(range(min = 1, max = 100_000))]
    pub vendor_count: usize,

    /// Number of purchase orders to generate
    #[serde(default = "default_purchase_orders")]
    #[validate(range(min = 1, max = 1_000_000))]
    pub purchase_order_count: usize,

    /// Number of invoices to generate
    #[serde(default = "default_invoices")]
    #[validate(range(min = 1, max = 1_000_000))]
    pub invoice_count: usize,

    /// Number of audit-trail events to generate
    #[serde(default = "default_events")]
    #[validate(range(min = 1, max = 1_000_000))]
    pub event_count: usize,

    /// Directory the CSV tables and manifest are written to
    #[serde(default = "default_output_dir")]
    #[validate(length(min = 1))]
    pub output_dir: String,

    /// Anchor timestamp all generated dates are computed relative to.
    /// Defaults to the current wall-clock time; fix it for reproducible runs.
    #[serde(default)]
    pub anchor: Option<NaiveDateTime>,
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_vendors() -> usize {
    DEFAULT_VENDORS
}

fn default_purchase_orders() -> usize {
    DEFAULT_PURCHASE_ORDERS
}

fn default_invoices() -> usize {
    DEFAULT_INVOICES
}

fn default_events() -> usize {
    DEFAULT_EVENTS
}

fn default_output_dir() -> String {
    DEFAULT_OUTPUT_DIR.to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            vendor_count: DEFAULT_VENDORS,
            purchase_order_count: DEFAULT_PURCHASE_ORDERS,
            invoice_count: DEFAULT_INVOICES,
            event_count: DEFAULT_EVENTS,
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            anchor: None,
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from `settlegen.toml` (if present) and the
    /// environment, then validate it.
    pub fn load() -> Result<Self, DatasetError> {
        let mut builder = Config::builder();

        if Path::new("settlegen.toml").exists() {
            info!("Loading configuration from settlegen.toml");
            builder = builder.add_source(File::with_name("settlegen"));
        }

        let settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .map_err(|e| DatasetError::Config(e.to_string()))?;

        let config: GeneratorConfig = settings
            .try_deserialize()
            .map_err(|e| DatasetError::Config(e.to_string()))?;

        config
            .validate()
            .map_err(|e| DatasetError::Config(e.to_string()))?;

        Ok(config)
    }

    /// Anchor timestamp, falling back to the current wall-clock time.
    pub fn anchor_or_now(&self) -> NaiveDateTime {
        self.anchor
            .unwrap_or_else(|| chrono::Utc::now().naive_utc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let config = GeneratorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.vendor_count, 20);
        assert_eq!(config.purchase_order_count, 50);
        assert_eq!(config.invoice_count, 80);
        assert_eq!(config.event_count, 100);
    }

    #[test]
    fn zero_counts_rejected() {
        let config = GeneratorConfig {
            vendor_count: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_output_dir_rejected() {
        let config = GeneratorConfig {
            output_dir: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
