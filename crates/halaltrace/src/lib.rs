//! # halaltrace
//!
//! The unified API for the halaltrace system - a permissioned supply-chain
//! ledger tracking product batches from producer to sale.
//!
//! ## Overview
//!
//! A small set of roles (Producer, Halal Authority, Distributor, Retailer,
//! plus a single Admin) collaborate to create, certify, transport, and sell
//! tracked batches. Every state change is permanently recorded and
//! attributable:
//!
//! - **Batches**: keyed by caller-supplied ids, never deleted, ids never
//!   reused
//! - **History**: an append-only status log per batch; every status change
//!   appends exactly one entry in the same atomic commit
//! - **Roles**: four independent membership sets, mutated only by the admin
//! - **Events**: one structured notification per committed operation
//!
//! The hosting ledger supplies caller identity and commit timestamps; this
//! crate supplies the authorization and transition logic.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use halaltrace::{Ledger, LedgerConfig, Role};
//! use halaltrace::core::{AccountId, BatchId};
//! use halaltrace::store::SqliteStore;
//!
//! fn example() {
//!     let store = SqliteStore::open("ledger.db").unwrap();
//!     let admin = AccountId::derive("admin");
//!     let ledger = Ledger::open(store, admin, LedgerConfig::default()).unwrap();
//!
//!     let producer = AccountId::derive("producer");
//!     ledger.grant_role(&admin, Role::Producer, &producer, 1_736_870_400_000).unwrap();
//!
//!     let batch = ledger
//!         .create_batch(&producer, BatchId::from("B-1001"), "Chicken breast", 1_736_870_400_001)
//!         .unwrap();
//!     assert_eq!(batch.status.as_str(), "Produced");
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `halaltrace::core` - Core primitives (Batch, BatchStatus, AccountId, ...)
//! - `halaltrace::roles` - Role vocabulary and membership state
//! - `halaltrace::store` - Storage abstraction, SQLite and memory backends

pub mod error;
pub mod events;
pub mod ledger;

// Re-export component crates
pub use halaltrace_core as core;
pub use halaltrace_roles as roles;
pub use halaltrace_store as store;

// Re-export main types for convenience
pub use error::{LedgerError, Result};
pub use events::{Event, EventSink, NoopSink};
pub use ledger::{Ledger, LedgerConfig};

// Re-export commonly used component types
pub use halaltrace_core::{
    AccountId, Batch, BatchId, BatchStatus, CertHash, HistoryEntry, Limits, ValidationError,
};
pub use halaltrace_roles::Role;
pub use halaltrace_store::{MemoryStore, SqliteStore, Store};
