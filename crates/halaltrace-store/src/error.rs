//! Error types for the store module.

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A write path referenced a batch the store does not hold.
    #[error("batch missing from store: {0}")]
    MissingBatch(String),

    /// The admin identity was already set by an earlier initialization.
    #[error("admin identity already set")]
    AdminAlreadySet,

    /// A registry operation ran before the admin was initialized.
    #[error("store is not initialized (no admin identity)")]
    Uninitialized,

    /// Invalid data in storage.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
