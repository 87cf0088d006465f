//! Storage error types
//!
//! Client errors (`Validation`, `DuplicateKey`, `InvalidId`,
//! `IdSpaceExhausted`) are caused by the caller's input. Everything else is
//! an infrastructure fault.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::schema::SchemaError;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    /// Document or patch violates the collection schema
    #[error(transparent)]
    Validation(#[from] SchemaError),

    /// Insert collided with an existing primary key
    #[error("Duplicate key error: {collection} already contains _id {id}")]
    DuplicateKey { collection: String, id: String },

    /// No integer id above the current maximum is left to generate
    #[error("Cannot generate _id for {collection}: id space exhausted, supply _id explicitly")]
    IdSpaceExhausted { collection: String },

    /// Lookup key has the wrong type for the collection
    #[error("Invalid id for {collection}: expected {expected}, got {id}")]
    InvalidId {
        collection: String,
        expected: &'static str,
        id: String,
    },

    /// No schema registered under this name
    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    /// Persistence I/O failure
    #[error("Storage I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Persisted collection file cannot be decoded
    #[error("Corrupt collection file {}: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },

    /// A writer panicked while holding the collection lock
    #[error("Storage lock poisoned")]
    Poisoned,
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the failure was caused by the request, not the store
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            StorageError::Validation(_)
                | StorageError::DuplicateKey { .. }
                | StorageError::InvalidId { .. }
                | StorageError::IdSpaceExhausted { .. }
        )
    }
}
