//! In-memory implementation of the Store trait.
//!
//! This is primarily for testing. It has the same semantics as SQLite
//! but keeps everything in memory with no persistence.

use std::collections::HashMap;
use std::sync::RwLock;

use halaltrace_core::{AccountId, Batch, BatchId, HistoryEntry};
use halaltrace_roles::{Role, RoleRegistry};

use crate::error::{Result, StoreError};
use crate::traits::{InsertResult, Store};

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock;
/// every write path mutates under a single write lock, which gives the
/// same all-or-nothing visibility as a SQLite transaction.
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

struct MemoryStoreInner {
    /// Batches indexed by id.
    batches: HashMap<BatchId, Batch>,

    /// History sequences, one per batch id.
    history: HashMap<BatchId, Vec<HistoryEntry>>,

    /// Creation-order index of every batch id ever created.
    index: Vec<BatchId>,

    /// Role membership; None until the admin is initialized.
    registry: Option<RoleRegistry>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryStoreInner {
                batches: HashMap::new(),
                history: HashMap::new(),
                index: Vec::new(),
                registry: None,
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemoryStore {
    fn insert_batch(&self, batch: &Batch, entry: &HistoryEntry) -> Result<InsertResult> {
        let mut inner = self.inner.write().unwrap();

        if inner.batches.contains_key(&batch.batch_id) {
            return Ok(InsertResult::AlreadyExists);
        }

        inner
            .batches
            .insert(batch.batch_id.clone(), batch.clone());
        inner
            .history
            .insert(batch.batch_id.clone(), vec![entry.clone()]);
        inner.index.push(batch.batch_id.clone());

        Ok(InsertResult::Inserted)
    }

    fn update_batch(&self, batch: &Batch, entry: Option<&HistoryEntry>) -> Result<()> {
        let mut inner = self.inner.write().unwrap();

        if !inner.batches.contains_key(&batch.batch_id) {
            return Err(StoreError::MissingBatch(batch.batch_id.to_string()));
        }

        inner
            .batches
            .insert(batch.batch_id.clone(), batch.clone());

        if let Some(entry) = entry {
            inner
                .history
                .entry(batch.batch_id.clone())
                .or_default()
                .push(entry.clone());
        }

        Ok(())
    }

    fn get_batch(&self, id: &BatchId) -> Result<Option<Batch>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.batches.get(id).cloned())
    }

    fn has_batch(&self, id: &BatchId) -> Result<bool> {
        let inner = self.inner.read().unwrap();
        Ok(inner.batches.contains_key(id))
    }

    fn batch_count(&self) -> Result<u64> {
        let inner = self.inner.read().unwrap();
        Ok(inner.index.len() as u64)
    }

    fn list_batch_ids(&self) -> Result<Vec<BatchId>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.index.clone())
    }

    fn list_batch_ids_by_owner(&self, owner: &AccountId) -> Result<Vec<BatchId>> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .index
            .iter()
            .filter(|id| {
                inner
                    .batches
                    .get(id)
                    .is_some_and(|b| b.current_owner == *owner)
            })
            .cloned()
            .collect())
    }

    fn history(&self, id: &BatchId) -> Result<Vec<HistoryEntry>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.history.get(id).cloned().unwrap_or_default())
    }

    fn history_len(&self, id: &BatchId) -> Result<u64> {
        let inner = self.inner.read().unwrap();
        Ok(inner.history.get(id).map(|h| h.len()).unwrap_or(0) as u64)
    }

    fn admin(&self) -> Result<Option<AccountId>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.registry.as_ref().map(|r| *r.admin()))
    }

    fn init_admin(&self, admin: &AccountId) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        if inner.registry.is_some() {
            return Err(StoreError::AdminAlreadySet);
        }
        inner.registry = Some(RoleRegistry::new(*admin));
        Ok(())
    }

    fn grant_role(&self, role: Role, account: &AccountId) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        let registry = inner.registry.as_mut().ok_or(StoreError::Uninitialized)?;
        registry.grant(role, *account);
        Ok(())
    }

    fn revoke_role(&self, role: Role, account: &AccountId) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        let registry = inner.registry.as_mut().ok_or(StoreError::Uninitialized)?;
        registry.revoke(role, account);
        Ok(())
    }

    fn has_role(&self, role: Role, account: &AccountId) -> Result<bool> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .registry
            .as_ref()
            .is_some_and(|r| r.is_member(role, account)))
    }

    fn roles_of(&self, account: &AccountId) -> Result<Vec<Role>> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .registry
            .as_ref()
            .map(|r| r.roles_of(account))
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use halaltrace_core::BatchStatus;

    fn make_batch(id: &str, owner: AccountId) -> (Batch, HistoryEntry) {
        let batch = Batch::new(BatchId::from(id), "Chicken".to_string(), owner, 1000);
        let entry = HistoryEntry::new(BatchStatus::Produced, 1000, owner);
        (batch, entry)
    }

    #[test]
    fn test_insert_and_get() {
        let store = MemoryStore::new();
        let producer = AccountId::derive("producer");
        let (batch, entry) = make_batch("B1", producer);

        let result = store.insert_batch(&batch, &entry).unwrap();
        assert_eq!(result, InsertResult::Inserted);

        let got = store.get_batch(&BatchId::from("B1")).unwrap().unwrap();
        assert_eq!(got, batch);
        assert_eq!(store.history(&BatchId::from("B1")).unwrap(), vec![entry]);
    }

    #[test]
    fn test_insert_duplicate_keeps_original() {
        let store = MemoryStore::new();
        let producer = AccountId::derive("producer");
        let (batch, entry) = make_batch("B1", producer);

        assert_eq!(
            store.insert_batch(&batch, &entry).unwrap(),
            InsertResult::Inserted
        );

        let (mut dup, dup_entry) = make_batch("B1", AccountId::derive("other"));
        dup.product_name = "Beef".to_string();
        assert_eq!(
            store.insert_batch(&dup, &dup_entry).unwrap(),
            InsertResult::AlreadyExists
        );

        // Original record and single-entry history are untouched.
        let got = store.get_batch(&BatchId::from("B1")).unwrap().unwrap();
        assert_eq!(got.product_name, "Chicken");
        assert_eq!(store.history_len(&BatchId::from("B1")).unwrap(), 1);
    }

    #[test]
    fn test_update_missing_batch() {
        let store = MemoryStore::new();
        let (batch, _) = make_batch("B1", AccountId::derive("producer"));

        let result = store.update_batch(&batch, None);
        assert!(matches!(result, Err(StoreError::MissingBatch(_))));
    }

    #[test]
    fn test_update_without_entry_leaves_history() {
        let store = MemoryStore::new();
        let producer = AccountId::derive("producer");
        let (mut batch, entry) = make_batch("B1", producer);
        store.insert_batch(&batch, &entry).unwrap();

        batch.current_owner = AccountId::derive("other");
        store.update_batch(&batch, None).unwrap();

        assert_eq!(store.history_len(&BatchId::from("B1")).unwrap(), 1);
        let got = store.get_batch(&BatchId::from("B1")).unwrap().unwrap();
        assert_eq!(got.current_owner, AccountId::derive("other"));
    }

    #[test]
    fn test_creation_order_index() {
        let store = MemoryStore::new();
        let producer = AccountId::derive("producer");

        for id in ["B3", "B1", "B2"] {
            let (batch, entry) = make_batch(id, producer);
            store.insert_batch(&batch, &entry).unwrap();
        }

        let ids: Vec<String> = store
            .list_batch_ids()
            .unwrap()
            .iter()
            .map(|b| b.to_string())
            .collect();
        assert_eq!(ids, vec!["B3", "B1", "B2"]);
        assert_eq!(store.batch_count().unwrap(), 3);
    }

    #[test]
    fn test_list_by_owner() {
        let store = MemoryStore::new();
        let a = AccountId::derive("a");
        let b = AccountId::derive("b");

        for (id, owner) in [("B1", a), ("B2", b), ("B3", a)] {
            let (batch, entry) = make_batch(id, owner);
            store.insert_batch(&batch, &entry).unwrap();
        }

        let owned: Vec<String> = store
            .list_batch_ids_by_owner(&a)
            .unwrap()
            .iter()
            .map(|b| b.to_string())
            .collect();
        assert_eq!(owned, vec!["B1", "B3"]);
    }

    #[test]
    fn test_admin_set_once() {
        let store = MemoryStore::new();
        let admin = AccountId::derive("admin");

        assert_eq!(store.admin().unwrap(), None);
        store.init_admin(&admin).unwrap();
        assert_eq!(store.admin().unwrap(), Some(admin));

        let again = store.init_admin(&AccountId::derive("other"));
        assert!(matches!(again, Err(StoreError::AdminAlreadySet)));
        assert_eq!(store.admin().unwrap(), Some(admin));
    }

    #[test]
    fn test_roles_require_init() {
        let store = MemoryStore::new();
        let alice = AccountId::derive("alice");

        let result = store.grant_role(Role::Producer, &alice);
        assert!(matches!(result, Err(StoreError::Uninitialized)));

        // Queries on an uninitialized store answer false, not error.
        assert!(!store.has_role(Role::Producer, &alice).unwrap());
        assert!(store.roles_of(&alice).unwrap().is_empty());
    }

    #[test]
    fn test_grant_revoke_roundtrip() {
        let store = MemoryStore::new();
        store.init_admin(&AccountId::derive("admin")).unwrap();
        let alice = AccountId::derive("alice");

        store.grant_role(Role::Distributor, &alice).unwrap();
        assert!(store.has_role(Role::Distributor, &alice).unwrap());
        assert_eq!(store.roles_of(&alice).unwrap(), vec![Role::Distributor]);

        store.revoke_role(Role::Distributor, &alice).unwrap();
        assert!(!store.has_role(Role::Distributor, &alice).unwrap());
    }
}
