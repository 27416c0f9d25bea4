//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use halaltrace::{Event, EventSink, Ledger, LedgerConfig};
use halaltrace_core::{AccountId, Batch, BatchId};
use halaltrace_roles::Role;
use halaltrace_store::MemoryStore;

/// Sink that records every emitted event.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<Event>>,
}

impl RecordingSink {
    /// Snapshot of everything emitted so far.
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    /// Drain and return everything emitted so far.
    pub fn take(&self) -> Vec<Event> {
        std::mem::take(&mut self.events.lock().unwrap())
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

/// A memory-backed ledger with a recording sink and a monotonic test clock.
///
/// The real system receives commit timestamps from its host; [`tick`]
/// plays that part here, handing out strictly increasing values.
///
/// [`tick`]: TestFixture::tick
pub struct TestFixture {
    pub admin: AccountId,
    pub ledger: Ledger<MemoryStore>,
    pub sink: Arc<RecordingSink>,
    clock: AtomicI64,
}

impl TestFixture {
    /// Create a fixture with an empty registry.
    pub fn new() -> Self {
        let admin = AccountId::derive("admin");
        let sink = Arc::new(RecordingSink::default());
        let ledger = Ledger::open(MemoryStore::new(), admin, LedgerConfig::default())
            .expect("fresh memory store always opens")
            .with_sink(sink.clone());

        Self {
            admin,
            ledger,
            sink,
            clock: AtomicI64::new(1_736_870_400_000),
        }
    }

    /// Next host commit timestamp.
    pub fn tick(&self) -> i64 {
        self.clock.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Deterministic account for a label.
    pub fn account(&self, label: &str) -> AccountId {
        AccountId::derive(label)
    }

    /// Derive an account and grant it `role`.
    pub fn account_with_role(&self, label: &str, role: Role) -> AccountId {
        let account = self.account(label);
        let now = self.tick();
        self.ledger
            .grant_role(&self.admin, role, &account, now)
            .expect("admin grant in fixture");
        account
    }

    /// Shorthand for a Producer-role account.
    pub fn producer(&self, label: &str) -> AccountId {
        self.account_with_role(label, Role::Producer)
    }

    /// Shorthand for a HalalAuthority-role account.
    pub fn authority(&self, label: &str) -> AccountId {
        self.account_with_role(label, Role::HalalAuthority)
    }

    /// Shorthand for a Distributor-role account.
    pub fn distributor(&self, label: &str) -> AccountId {
        self.account_with_role(label, Role::Distributor)
    }

    /// Shorthand for a Retailer-role account.
    pub fn retailer(&self, label: &str) -> AccountId {
        self.account_with_role(label, Role::Retailer)
    }

    /// Create a batch owned by `producer`.
    pub fn create_batch(&self, producer: &AccountId, id: &str, name: &str) -> Batch {
        let now = self.tick();
        self.ledger
            .create_batch(producer, BatchId::from(id), name, now)
            .expect("fixture batch creation")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
