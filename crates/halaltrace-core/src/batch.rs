//! Batch: the trackable unit of product moving through the supply chain.
//!
//! A batch record is mutated only through the lifecycle engine, and every
//! status change appends a matching history entry in the same atomic
//! commit. History entries are immutable once written.

use serde::{Deserialize, Serialize};

use crate::status::BatchStatus;
use crate::types::{AccountId, BatchId, CertHash};

/// The current state of one tracked batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    /// Caller-supplied unique identifier. Immutable.
    pub batch_id: BatchId,

    /// Human-readable product name. Immutable after creation.
    pub product_name: String,

    /// The account that created the batch. Immutable.
    pub producer: AccountId,

    /// The account currently holding transfer and update rights.
    pub current_owner: AccountId,

    /// Current lifecycle stage.
    pub status: BatchStatus,

    /// Certification artifact reference; `None` until certified.
    pub halal_cert_hash: Option<CertHash>,

    /// Host commit timestamp at creation (Unix ms). Immutable.
    pub created_at: i64,
}

impl Batch {
    /// Construct the record for a freshly created batch: status `Produced`,
    /// owner = producer, no certificate.
    pub fn new(batch_id: BatchId, product_name: String, producer: AccountId, now: i64) -> Self {
        Self {
            batch_id,
            product_name,
            producer,
            current_owner: producer,
            status: BatchStatus::Produced,
            halal_cert_hash: None,
            created_at: now,
        }
    }

    /// Whether a certification artifact has been attached.
    pub fn is_certified(&self) -> bool {
        self.halal_cert_hash.is_some()
    }

    /// Whether `account` holds transfer/update rights on this batch.
    pub fn is_owned_by(&self, account: &AccountId) -> bool {
        self.current_owner == *account
    }
}

/// One immutable record of a status change.
///
/// History for a batch is an ordered, append-only sequence of these; it has
/// at least the creation entry once the batch exists and only ever grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The status that was set.
    pub status: BatchStatus,

    /// Host commit timestamp of the change (Unix ms).
    pub timestamp: i64,

    /// The account that made the change.
    pub updated_by: AccountId,
}

impl HistoryEntry {
    pub fn new(status: BatchStatus, timestamp: i64, updated_by: AccountId) -> Self {
        Self {
            status,
            timestamp,
            updated_by,
        }
    }
}
