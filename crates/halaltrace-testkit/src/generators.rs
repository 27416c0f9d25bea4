//! Proptest generators for property-based testing.

use proptest::prelude::*;

use halaltrace_core::{AccountId, BatchId, BatchStatus, CertHash};
use halaltrace_roles::Role;

/// Generate a random account id.
pub fn account_id() -> impl Strategy<Value = AccountId> {
    any::<[u8; 32]>().prop_map(AccountId::from_bytes)
}

/// Generate a labeled account id from a small pool, so operation sequences
/// revisit the same parties.
pub fn labeled_account() -> impl Strategy<Value = AccountId> {
    "[a-z]{1,8}".prop_map(|label| AccountId::derive(&label))
}

/// Generate a valid batch id.
pub fn batch_id() -> impl Strategy<Value = BatchId> {
    "[A-Z0-9][A-Z0-9-]{0,15}".prop_map(|s| BatchId::new(s))
}

/// Generate a valid product name.
pub fn product_name() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z ]{0,31}".prop_map(String::from)
}

/// Generate a valid certificate content-address.
pub fn cert_hash() -> impl Strategy<Value = CertHash> {
    "Qm[a-zA-Z0-9]{8,44}".prop_map(|s| CertHash::new(s))
}

/// Generate any role.
pub fn role() -> impl Strategy<Value = Role> {
    prop_oneof![
        Just(Role::Producer),
        Just(Role::HalalAuthority),
        Just(Role::Distributor),
        Just(Role::Retailer),
    ]
}

/// Generate a non-empty status: conventional stages plus custom strings.
pub fn status() -> impl Strategy<Value = BatchStatus> {
    prop_oneof![
        Just(BatchStatus::Produced),
        Just(BatchStatus::CertifiedHalal),
        Just(BatchStatus::InTransit),
        Just(BatchStatus::AtRetailer),
        Just(BatchStatus::Sold),
        "[A-Za-z][A-Za-z-]{0,15}".prop_map(|s| BatchStatus::from(s.as_str())),
    ]
}

/// Generate a reasonable host timestamp (Unix ms).
pub fn timestamp() -> impl Strategy<Value = i64> {
    0i64..=i64::MAX / 2
}
