use thiserror::Error;

use super::{Operation, StoreErrorKind};

/// Boxed error returned by a store client.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors reported by a document store.
///
/// These are passed through to the caller. Failures coming from a client
/// library keep the original error as their `source`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{operation} on table '{table}' failed ({kind})")]
    Sdk {
        operation: Operation,
        table: String,
        kind: StoreErrorKind,
        #[source]
        source: BoxError,
    },
    #[error("{operation} on table '{table}' rejected ({kind}): {message}")]
    Rejected {
        operation: Operation,
        table: String,
        kind: StoreErrorKind,
        message: String,
    },
    #[error("invalid item in table '{table}': {message}")]
    InvalidItem { table: String, message: String },
}

impl StoreError {
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            Self::Sdk { kind, .. } | Self::Rejected { kind, .. } => *kind,
            Self::InvalidItem { .. } => StoreErrorKind::Other,
        }
    }
}

/// Result type for document store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
