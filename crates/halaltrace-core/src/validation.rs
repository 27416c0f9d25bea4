//! Input validation for caller-supplied strings.
//!
//! Every external operation validates its inputs before any state is read
//! or written, so a failing call has zero side effects. Length caps are
//! policy and travel with the engine configuration; the defaults here are
//! what a hosting ledger would typically accept.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::status::BatchStatus;
use crate::types::{AccountId, BatchId, CertHash};

/// Default maximum byte length of a batch identifier.
pub const MAX_BATCH_ID_LEN: usize = 128;

/// Default maximum byte length of a product name.
pub const MAX_PRODUCT_NAME_LEN: usize = 256;

/// Default maximum byte length of a status string.
pub const MAX_STATUS_LEN: usize = 128;

/// Default maximum byte length of a certificate content-address.
pub const MAX_CERT_HASH_LEN: usize = 256;

/// Length caps applied to caller-supplied strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    pub max_batch_id_len: usize,
    pub max_product_name_len: usize,
    pub max_status_len: usize,
    pub max_cert_hash_len: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_batch_id_len: MAX_BATCH_ID_LEN,
            max_product_name_len: MAX_PRODUCT_NAME_LEN,
            max_status_len: MAX_STATUS_LEN,
            max_cert_hash_len: MAX_CERT_HASH_LEN,
        }
    }
}

impl Limits {
    /// A batch id must be non-empty and within the cap.
    pub fn validate_batch_id(&self, id: &BatchId) -> Result<(), ValidationError> {
        if id.is_empty() {
            return Err(ValidationError::EmptyBatchId);
        }
        if id.len() > self.max_batch_id_len {
            return Err(ValidationError::BatchIdTooLong(id.len()));
        }
        Ok(())
    }

    /// A product name must be non-empty and within the cap.
    pub fn validate_product_name(&self, name: &str) -> Result<(), ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::EmptyProductName);
        }
        if name.len() > self.max_product_name_len {
            return Err(ValidationError::ProductNameTooLong(name.len()));
        }
        Ok(())
    }

    /// Any non-empty status is accepted; only `Custom("")` can be empty.
    pub fn validate_status(&self, status: &BatchStatus) -> Result<(), ValidationError> {
        if status.is_empty() {
            return Err(ValidationError::EmptyStatus);
        }
        if status.as_str().len() > self.max_status_len {
            return Err(ValidationError::StatusTooLong(status.as_str().len()));
        }
        Ok(())
    }

    /// A certificate hash must be non-empty and within the cap.
    pub fn validate_cert_hash(&self, hash: &CertHash) -> Result<(), ValidationError> {
        if hash.is_empty() {
            return Err(ValidationError::EmptyCertHash);
        }
        if hash.len() > self.max_cert_hash_len {
            return Err(ValidationError::CertHashTooLong(hash.len()));
        }
        Ok(())
    }
}

/// A transfer recipient must be a real identity distinct from the sender.
pub fn validate_transfer_target(
    caller: &AccountId,
    to: &AccountId,
) -> Result<(), ValidationError> {
    if to.is_zero() {
        return Err(ValidationError::ZeroAccount);
    }
    if to == caller {
        return Err(ValidationError::SelfTransfer);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_batch_id_rejected() {
        let limits = Limits::default();
        let result = limits.validate_batch_id(&BatchId::from(""));
        assert!(matches!(result, Err(ValidationError::EmptyBatchId)));
    }

    #[test]
    fn test_batch_id_length_cap() {
        let limits = Limits::default();

        let at_cap = BatchId::new("x".repeat(limits.max_batch_id_len));
        assert!(limits.validate_batch_id(&at_cap).is_ok());

        let over = BatchId::new("x".repeat(limits.max_batch_id_len + 1));
        assert!(matches!(
            limits.validate_batch_id(&over),
            Err(ValidationError::BatchIdTooLong(_))
        ));
    }

    #[test]
    fn test_empty_product_name_rejected() {
        let limits = Limits::default();
        assert!(matches!(
            limits.validate_product_name(""),
            Err(ValidationError::EmptyProductName)
        ));
        assert!(limits.validate_product_name("Chicken breast").is_ok());
    }

    #[test]
    fn test_empty_custom_status_rejected() {
        let limits = Limits::default();
        let result = limits.validate_status(&BatchStatus::Custom(String::new()));
        assert!(matches!(result, Err(ValidationError::EmptyStatus)));

        assert!(limits.validate_status(&BatchStatus::Sold).is_ok());
        assert!(limits
            .validate_status(&BatchStatus::Custom("Recalled".into()))
            .is_ok());
    }

    #[test]
    fn test_empty_cert_hash_rejected() {
        let limits = Limits::default();
        assert!(matches!(
            limits.validate_cert_hash(&CertHash::from("")),
            Err(ValidationError::EmptyCertHash)
        ));
        assert!(limits.validate_cert_hash(&CertHash::from("Qm123")).is_ok());
    }

    #[test]
    fn test_tightened_limits() {
        let limits = Limits {
            max_batch_id_len: 8,
            ..Limits::default()
        };
        assert!(limits.validate_batch_id(&BatchId::from("12345678")).is_ok());
        assert!(limits
            .validate_batch_id(&BatchId::from("123456789"))
            .is_err());
    }

    #[test]
    fn test_transfer_target_zero_rejected() {
        let caller = AccountId::derive("owner");
        assert!(matches!(
            validate_transfer_target(&caller, &AccountId::ZERO),
            Err(ValidationError::ZeroAccount)
        ));
    }

    #[test]
    fn test_transfer_target_self_rejected() {
        let caller = AccountId::derive("owner");
        assert!(matches!(
            validate_transfer_target(&caller, &caller),
            Err(ValidationError::SelfTransfer)
        ));

        let other = AccountId::derive("other");
        assert!(validate_transfer_target(&caller, &other).is_ok());
    }
}
