//! settlegen: deterministic synthetic dataset generator for a fictitious
//! source-to-settle workflow.
//!
//! Five synthesizer phases run strictly in order, each a pure function of its
//! predecessors' output plus an explicit seeded generation context:
//!
//! 1. vendors (status/risk from exact-ratio shuffled pools)
//! 2. purchase orders + goods receipts (CLOSED iff receipted)
//! 3. invoices (three-way matched, with injected duplicate/exception defects)
//! 4. supplier performance history and renewal recommendations
//! 5. audit-trail events, sorted chronologically
//!
//! The result is exported as one CSV table per entity plus a manifest.
//! Identical seed, counts and anchor produce byte-identical output.

pub mod config;
pub mod errors;
pub mod export;
pub mod generators;
pub mod manifest;
pub mod models;
pub mod pipeline;

pub use config::GeneratorConfig;
pub use errors::{DatasetError, DatasetResult, Precondition};
pub use manifest::Manifest;
pub use pipeline::{generate, run, Dataset};
