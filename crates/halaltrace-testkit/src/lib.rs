//! # halaltrace Testkit
//!
//! Testing utilities for the halaltrace ledger.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: a memory-backed ledger with a recording event sink and a
//!   monotonic test clock standing in for the host's commit timestamps
//! - **Generators**: proptest strategies for ids, names, statuses, and roles
//!
//! ## Test Fixtures
//!
//! Quickly set up test scenarios:
//!
//! ```rust
//! use halaltrace_testkit::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let alice = fixture.producer("alice");
//! let batch = fixture.create_batch(&alice, "B1", "Chicken breast");
//! assert_eq!(batch.status.as_str(), "Produced");
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use halaltrace_testkit::generators;
//!
//! proptest! {
//!     #[test]
//!     fn status_roundtrips(s in generators::status()) {
//!         prop_assert_eq!(BatchStatus::from(s.as_str()), s);
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{RecordingSink, TestFixture};
