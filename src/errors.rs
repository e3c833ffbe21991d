/// Errors surfaced by dataset generation and export.
///
/// Generation itself has exactly one failure kind: a referential precondition
/// did not hold (empty approved-vendor pool, a CLOSED purchase order with no
/// goods receipt). These are fatal; synthesizing a plausible default instead
/// would silently break the referential invariants the dataset exists to
/// demonstrate.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("generation precondition failed: {precondition} (requested: {requested})")]
    PreconditionFailed {
        precondition: Precondition,
        requested: String,
    },

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

/// The specific referential precondition that was violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Precondition {
    #[error("no APPROVED vendors available")]
    NoApprovedVendors,

    #[error("no goods receipt found for CLOSED purchase order {0}")]
    MissingGoodsReceipt(String),
}

impl DatasetError {
    pub fn precondition(precondition: Precondition, requested: impl Into<String>) -> Self {
        DatasetError::PreconditionFailed {
            precondition,
            requested: requested.into(),
        }
    }
}

pub type DatasetResult<T> = Result<T, DatasetError>;
