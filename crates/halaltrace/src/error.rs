//! Error types for the Ledger.

use halaltrace_core::{AccountId, BatchId, ValidationError};
use halaltrace_store::StoreError;
use thiserror::Error;

/// Errors that can occur during Ledger operations.
///
/// Failures are immediate and total: a failing operation has touched
/// neither the batch store, the history log, nor the role registry.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Caller lacks the required role or ownership.
    #[error("unauthorized: caller {caller} {missing}")]
    Unauthorized {
        caller: AccountId,
        /// What the caller was missing, e.g. "lacks role Producer".
        missing: String,
    },

    /// Batch id is not present in the store.
    #[error("batch not found: {0}")]
    NotFound(BatchId),

    /// Batch id was already claimed. Ids are never recycled.
    #[error("batch already exists: {0}")]
    AlreadyExists(BatchId),

    /// Invalid input: empty or oversized string, zero or self-referential
    /// identity, or a transfer recipient without a custody role.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] ValidationError),

    /// The backing store was initialized with a different admin.
    #[error("ledger already initialized with admin {existing}")]
    AlreadyInitialized { existing: AccountId },

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for Ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
