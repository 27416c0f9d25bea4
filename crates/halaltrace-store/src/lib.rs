//! # halaltrace Store
//!
//! Storage abstraction for the halaltrace ledger. Provides a trait-based
//! interface for batch, history, and role persistence with SQLite and
//! in-memory implementations.
//!
//! ## Overview
//!
//! The store module abstracts persistence behind the [`Store`] trait,
//! allowing the lifecycle engine to be storage-agnostic. The primary
//! implementation is [`SqliteStore`], with [`MemoryStore`] for testing.
//!
//! ## Key Types
//!
//! - [`Store`] - The trait for all storage operations
//! - [`SqliteStore`] - SQLite-based durable storage
//! - [`MemoryStore`] - In-memory storage for tests
//! - [`InsertResult`] - Result of inserting a batch
//!
//! ## Design Notes
//!
//! - **Atomic pairs**: a batch write and its history entry commit in one
//!   transaction; the two can never diverge.
//! - **Append-only history**: entries are never reordered or pruned.
//! - **No id recycling**: the creation-order index keeps every id ever
//!   created; there is no delete path.

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{InsertResult, Store};
