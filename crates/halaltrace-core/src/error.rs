//! Error types for the halaltrace core.

use thiserror::Error;

/// Rejections produced by input validation.
///
/// Every variant maps to the ledger-level `InvalidArgument` kind; the
/// variant carries the specific triggering condition so it surfaces
/// verbatim to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("batch id must not be empty")]
    EmptyBatchId,

    #[error("batch id exceeds maximum length ({0} bytes)")]
    BatchIdTooLong(usize),

    #[error("product name must not be empty")]
    EmptyProductName,

    #[error("product name exceeds maximum length ({0} bytes)")]
    ProductNameTooLong(usize),

    #[error("status must not be empty")]
    EmptyStatus,

    #[error("status exceeds maximum length ({0} bytes)")]
    StatusTooLong(usize),

    #[error("certificate hash must not be empty")]
    EmptyCertHash,

    #[error("certificate hash exceeds maximum length ({0} bytes)")]
    CertHashTooLong(usize),

    #[error("account must not be the zero identity")]
    ZeroAccount,

    #[error("cannot transfer a batch to its current owner")]
    SelfTransfer,

    #[error("recipient holds no custody role")]
    RecipientNotCustodian,
}
