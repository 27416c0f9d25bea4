//! # halaltrace Roles
//!
//! The role vocabulary and membership state for the halaltrace ledger.
//!
//! Authorization is four independent boolean membership sets (Producer,
//! HalalAuthority, Distributor, Retailer) plus a single admin identity
//! fixed when the ledger is initialized. Role checks are direct enum-keyed
//! lookups; there is no role hierarchy and no stringly-typed dispatch.

pub mod registry;
pub mod role;

pub use registry::RoleRegistry;
pub use role::Role;
