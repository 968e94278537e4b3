//! Error types for the store module.

use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Record serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Invalid data in storage.
    #[error("invalid data at {key}: {reason}")]
    InvalidData { key: String, reason: String },

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),

    /// The ledger cannot serve requests right now (poisoned lock, host outage).
    #[error("ledger unavailable: {0}")]
    Unavailable(String),

    /// Key namespace configuration is unusable.
    #[error("invalid key namespaces: {0}")]
    InvalidNamespaces(String),
}

impl StoreError {
    /// Whether the same operation could succeed if attempted again.
    ///
    /// Database and availability failures may clear up; bad data, bad
    /// configuration, and schema mismatches will not.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Database(_) | StoreError::Unavailable(_))
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
