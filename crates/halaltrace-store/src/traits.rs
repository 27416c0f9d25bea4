//! Store trait: the abstract persistence boundary for the ledger.
//!
//! The trait keeps the lifecycle engine storage-agnostic. Implementations
//! include SQLite (durable) and in-memory (for tests).

use halaltrace_core::{AccountId, Batch, BatchId, HistoryEntry};
use halaltrace_roles::Role;

use crate::error::Result;

/// Result of inserting a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertResult {
    /// Batch was inserted successfully.
    Inserted,
    /// A batch with this id already exists. Ids are never recycled, so
    /// this is permanent.
    AlreadyExists,
}

/// The Store trait: synchronous interface for ledger persistence.
///
/// # Design Notes
///
/// - **One call, one transaction**: each write method commits atomically.
///   The engine validates everything up front and then issues exactly one
///   write per operation, so a failed operation leaves no partial state.
/// - **Paired writes**: a batch mutation and its history entry travel in
///   the same call; the batch record and the history log can never diverge.
/// - **No deletes**: batches and history entries are never removed. The
///   creation-order index only grows.
pub trait Store: Send + Sync {
    // ─────────────────────────────────────────────────────────────────────────
    // Batch Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Insert a new batch together with its creation history entry and its
    /// position in the creation-order index, atomically.
    ///
    /// Returns `AlreadyExists` (with no state change) if the id is taken.
    fn insert_batch(&self, batch: &Batch, entry: &HistoryEntry) -> Result<InsertResult>;

    /// Overwrite an existing batch record, appending a history entry in the
    /// same transaction when one is supplied.
    ///
    /// The `None` arm exists for ownership-only transfers, which change the
    /// batch without recording history.
    fn update_batch(&self, batch: &Batch, entry: Option<&HistoryEntry>) -> Result<()>;

    /// Get a batch by id.
    fn get_batch(&self, id: &BatchId) -> Result<Option<Batch>>;

    /// Check whether a batch exists.
    fn has_batch(&self, id: &BatchId) -> Result<bool>;

    /// Number of batches ever created.
    fn batch_count(&self) -> Result<u64>;

    /// All batch ids in creation order.
    fn list_batch_ids(&self) -> Result<Vec<BatchId>>;

    /// Batch ids currently owned by `owner`, in creation order.
    fn list_batch_ids_by_owner(&self, owner: &AccountId) -> Result<Vec<BatchId>>;

    // ─────────────────────────────────────────────────────────────────────────
    // History Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Full history for a batch, in append order. Empty only if the batch
    /// was never created.
    fn history(&self, id: &BatchId) -> Result<Vec<HistoryEntry>>;

    /// Number of history entries for a batch.
    fn history_len(&self, id: &BatchId) -> Result<u64>;

    // ─────────────────────────────────────────────────────────────────────────
    // Role Registry Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// The admin identity, if the store has been initialized.
    fn admin(&self) -> Result<Option<AccountId>>;

    /// Set the admin identity. Fails with `AdminAlreadySet` if one exists;
    /// the admin is immutable for the lifetime of the store.
    fn init_admin(&self, admin: &AccountId) -> Result<()>;

    /// Add `account` to `role`'s membership set. Idempotent.
    fn grant_role(&self, role: Role, account: &AccountId) -> Result<()>;

    /// Remove `account` from `role`'s membership set. Idempotent.
    fn revoke_role(&self, role: Role, account: &AccountId) -> Result<()>;

    /// Whether `account` currently holds `role`.
    fn has_role(&self, role: Role, account: &AccountId) -> Result<bool>;

    /// Every role `account` currently holds.
    fn roles_of(&self, account: &AccountId) -> Result<Vec<Role>>;
}
