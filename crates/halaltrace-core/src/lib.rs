//! # halaltrace Core
//!
//! Pure primitives for the halaltrace ledger: identities, batches,
//! statuses, and history entries.
//!
//! This crate contains no I/O, no storage, no authorization logic. It is
//! pure data plus input validation.
//!
//! ## Key Types
//!
//! - [`AccountId`] - Opaque 32-byte account reference supplied by the host
//! - [`BatchId`] - Caller-supplied unique batch identifier
//! - [`Batch`] - Current state of one tracked batch
//! - [`BatchStatus`] - Lifecycle stage, with a `Custom` escape hatch
//! - [`HistoryEntry`] - One immutable record of a status change

pub mod batch;
pub mod error;
pub mod status;
pub mod types;
pub mod validation;

pub use batch::{Batch, HistoryEntry};
pub use error::ValidationError;
pub use status::BatchStatus;
pub use types::{AccountId, BatchId, CertHash};
pub use validation::{
    validate_transfer_target, Limits, MAX_BATCH_ID_LEN, MAX_CERT_HASH_LEN,
    MAX_PRODUCT_NAME_LEN, MAX_STATUS_LEN,
};
