//! # Record Store Errors

use thiserror::Error;

/// Result type for record store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Record store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {path}: {source}")]
    Serialization {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Collection {0} does not contain a JSON array")]
    NotAnArray(String),

    #[error("Lock poisoned for collection {0}")]
    LockPoisoned(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn serialization(path: impl Into<String>, source: serde_json::Error) -> Self {
        StoreError::Serialization {
            path: path.into(),
            source,
        }
    }
}
