//! The Ledger: unified API for the halaltrace system.
//!
//! The Ledger is the only writer. Every external call validates its inputs,
//! consults the role registry, reads the batch store, and issues exactly one
//! atomic store write; the batch record and the history log therefore never
//! diverge, and a failing call has zero side effects.
//!
//! Caller identity and commit timestamps are supplied by the hosting ledger
//! per call. The engine never authenticates identities and never reads a
//! clock of its own.

use halaltrace_core::{
    validate_transfer_target, AccountId, Batch, BatchId, BatchStatus, CertHash, HistoryEntry,
    Limits, ValidationError,
};
use halaltrace_roles::Role;
use halaltrace_store::{InsertResult, Store, StoreError};

use crate::error::{LedgerError, Result};
use crate::events::{Event, EventSink, NoopSink};

/// Configuration for the Ledger.
#[derive(Debug, Clone, Default)]
pub struct LedgerConfig {
    /// Length caps applied to caller-supplied strings.
    pub limits: Limits,
}

/// The main Ledger struct.
///
/// Provides a unified API for:
/// - Creating, certifying, re-statusing, and transferring batches
/// - Granting and revoking roles (admin only)
/// - Querying batches, histories, and the creation-order index
pub struct Ledger<S: Store> {
    /// The storage backend.
    store: S,
    /// Configuration.
    config: LedgerConfig,
    /// Notification sink; defaults to discarding.
    sink: Box<dyn EventSink>,
}

impl<S: Store> Ledger<S> {
    /// Open a ledger over `store` with `admin` as the role administrator.
    ///
    /// On a fresh store the admin is recorded and becomes immutable. On a
    /// previously initialized store the given admin must match the recorded
    /// one; a mismatch fails with [`LedgerError::AlreadyInitialized`].
    pub fn open(store: S, admin: AccountId, config: LedgerConfig) -> Result<Self> {
        if admin.is_zero() {
            return Err(ValidationError::ZeroAccount.into());
        }

        match store.admin()? {
            None => store.init_admin(&admin)?,
            Some(existing) if existing == admin => {}
            Some(existing) => return Err(LedgerError::AlreadyInitialized { existing }),
        }

        Ok(Self {
            store,
            config,
            sink: Box::new(NoopSink),
        })
    }

    /// Install an event sink, replacing the default no-op sink.
    pub fn with_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The admin identity.
    pub fn admin(&self) -> Result<AccountId> {
        Ok(self.store.admin()?.ok_or(StoreError::Uninitialized)?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Role Registry
    // ─────────────────────────────────────────────────────────────────────────

    /// Grant `role` to `account`. Admin only. Idempotent.
    pub fn grant_role(
        &self,
        caller: &AccountId,
        role: Role,
        account: &AccountId,
        now: i64,
    ) -> Result<()> {
        if account.is_zero() {
            return Err(ValidationError::ZeroAccount.into());
        }
        self.require_admin(caller)?;

        self.store.grant_role(role, account)?;
        self.sink.emit(Event::RoleAssigned {
            role,
            account: *account,
            timestamp: now,
        });
        Ok(())
    }

    /// Revoke `role` from `account`. Admin only. Idempotent.
    ///
    /// Takes effect for all future authorization checks but never strips an
    /// existing `current_owner` assignment: ownership checks compare
    /// identities, not roles.
    pub fn revoke_role(
        &self,
        caller: &AccountId,
        role: Role,
        account: &AccountId,
        now: i64,
    ) -> Result<()> {
        if account.is_zero() {
            return Err(ValidationError::ZeroAccount.into());
        }
        self.require_admin(caller)?;

        self.store.revoke_role(role, account)?;
        self.sink.emit(Event::RoleRevoked {
            role,
            account: *account,
            timestamp: now,
        });
        Ok(())
    }

    /// Whether `account` currently holds `role`.
    pub fn has_role(&self, role: Role, account: &AccountId) -> Result<bool> {
        Ok(self.store.has_role(role, account)?)
    }

    /// String-keyed membership query for hosts that pass role names through.
    ///
    /// Unrecognized names answer `false`, never an error.
    pub fn has_role_named(&self, name: &str, account: &AccountId) -> Result<bool> {
        match Role::parse(name) {
            Some(role) => self.has_role(role, account),
            None => Ok(false),
        }
    }

    /// Every role `account` currently holds.
    pub fn roles_of(&self, account: &AccountId) -> Result<Vec<Role>> {
        Ok(self.store.roles_of(account)?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a batch. Caller must hold the Producer role.
    ///
    /// The new batch starts as `Produced`, owned by its producer, with no
    /// certificate. The batch record, its creation history entry, and its
    /// position in the creation-order index commit together.
    pub fn create_batch(
        &self,
        caller: &AccountId,
        batch_id: BatchId,
        product_name: &str,
        now: i64,
    ) -> Result<Batch> {
        self.config.limits.validate_batch_id(&batch_id)?;
        self.config.limits.validate_product_name(product_name)?;
        self.require_role(caller, Role::Producer)?;

        let batch = Batch::new(batch_id, product_name.to_string(), *caller, now);
        let entry = HistoryEntry::new(BatchStatus::Produced, now, *caller);

        match self.store.insert_batch(&batch, &entry)? {
            InsertResult::Inserted => {}
            InsertResult::AlreadyExists => {
                return Err(LedgerError::AlreadyExists(batch.batch_id));
            }
        }

        self.sink.emit(Event::BatchCreated {
            batch_id: batch.batch_id.clone(),
            product_name: batch.product_name.clone(),
            producer: *caller,
            timestamp: now,
        });
        Ok(batch)
    }

    /// Attach a certification artifact. Caller must hold HalalAuthority.
    ///
    /// Sets the certificate hash and forces status `CertifiedHalal` with no
    /// precondition on the prior status; re-certification overwrites the
    /// stored hash.
    pub fn set_halal_certificate(
        &self,
        caller: &AccountId,
        batch_id: &BatchId,
        cert_hash: CertHash,
        now: i64,
    ) -> Result<Batch> {
        self.config.limits.validate_cert_hash(&cert_hash)?;
        self.require_role(caller, Role::HalalAuthority)?;

        let mut batch = self.get_batch(batch_id)?;
        batch.halal_cert_hash = Some(cert_hash.clone());
        batch.status = BatchStatus::CertifiedHalal;

        let entry = HistoryEntry::new(BatchStatus::CertifiedHalal, now, *caller);
        self.store.update_batch(&batch, Some(&entry))?;

        self.sink.emit(Event::HalalCertified {
            batch_id: batch.batch_id.clone(),
            cert_hash,
            authority: *caller,
            timestamp: now,
        });
        Ok(batch)
    }

    /// Overwrite a batch's status. Caller must be the current owner or hold
    /// HalalAuthority.
    ///
    /// Any non-empty value is accepted, including one that regresses the
    /// lifecycle stage; the vocabulary is deliberately open.
    pub fn update_status(
        &self,
        caller: &AccountId,
        batch_id: &BatchId,
        status: BatchStatus,
        now: i64,
    ) -> Result<Batch> {
        self.config.limits.validate_status(&status)?;

        let mut batch = self.get_batch(batch_id)?;
        if !batch.is_owned_by(caller) && !self.store.has_role(Role::HalalAuthority, caller)? {
            return Err(LedgerError::Unauthorized {
                caller: *caller,
                missing: "is neither the current owner nor a halal authority".to_string(),
            });
        }

        batch.status = status.clone();
        let entry = HistoryEntry::new(status.clone(), now, *caller);
        self.store.update_batch(&batch, Some(&entry))?;

        self.sink.emit(Event::StatusUpdated {
            batch_id: batch.batch_id.clone(),
            status,
            updated_by: *caller,
            timestamp: now,
        });
        Ok(batch)
    }

    /// Transfer custody of a batch. Caller must be the current owner; the
    /// recipient must hold at least one custody role.
    ///
    /// A recipient holding Distributor moves the batch to `InTransit`, a
    /// Retailer to `AtRetailer` (Distributor wins when both are held), each
    /// with a history entry attributed to the sender. A producer-only
    /// recipient takes ownership with no status change and no history
    /// entry. The transfer event is emitted unconditionally.
    pub fn transfer_batch(
        &self,
        caller: &AccountId,
        batch_id: &BatchId,
        to: &AccountId,
        now: i64,
    ) -> Result<Batch> {
        validate_transfer_target(caller, to)?;

        let mut batch = self.get_batch(batch_id)?;
        if !batch.is_owned_by(caller) {
            return Err(LedgerError::Unauthorized {
                caller: *caller,
                missing: "is not the current owner".to_string(),
            });
        }

        let mut recipient_is_custodian = false;
        for role in Role::CUSTODY {
            if self.store.has_role(role, to)? {
                recipient_is_custodian = true;
                break;
            }
        }
        if !recipient_is_custodian {
            return Err(ValidationError::RecipientNotCustodian.into());
        }

        let previous_owner = batch.current_owner;
        batch.current_owner = *to;

        let entry = if self.store.has_role(Role::Distributor, to)? {
            batch.status = BatchStatus::InTransit;
            Some(HistoryEntry::new(BatchStatus::InTransit, now, *caller))
        } else if self.store.has_role(Role::Retailer, to)? {
            batch.status = BatchStatus::AtRetailer;
            Some(HistoryEntry::new(BatchStatus::AtRetailer, now, *caller))
        } else {
            // Producer-only recipient: custody moves, the log stays silent.
            tracing::warn!(
                batch_id = %batch.batch_id,
                new_owner = %to,
                "ownership transferred without a status transition"
            );
            None
        };

        self.store.update_batch(&batch, entry.as_ref())?;

        self.sink.emit(Event::BatchTransferred {
            batch_id: batch.batch_id.clone(),
            previous_owner,
            new_owner: *to,
            timestamp: now,
        });
        Ok(batch)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Query Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Get a batch by id.
    pub fn get_batch(&self, batch_id: &BatchId) -> Result<Batch> {
        self.store
            .get_batch(batch_id)?
            .ok_or_else(|| LedgerError::NotFound(batch_id.clone()))
    }

    /// Full status history for a batch, in append order.
    pub fn history(&self, batch_id: &BatchId) -> Result<Vec<HistoryEntry>> {
        if !self.store.has_batch(batch_id)? {
            return Err(LedgerError::NotFound(batch_id.clone()));
        }
        Ok(self.store.history(batch_id)?)
    }

    /// Number of history entries for a batch.
    pub fn history_len(&self, batch_id: &BatchId) -> Result<u64> {
        if !self.store.has_batch(batch_id)? {
            return Err(LedgerError::NotFound(batch_id.clone()));
        }
        Ok(self.store.history_len(batch_id)?)
    }

    /// All batch ids in creation order.
    pub fn list_batches(&self) -> Result<Vec<BatchId>> {
        Ok(self.store.list_batch_ids()?)
    }

    /// Batch ids currently owned by `owner`, in creation order.
    pub fn list_batches_by_owner(&self, owner: &AccountId) -> Result<Vec<BatchId>> {
        Ok(self.store.list_batch_ids_by_owner(owner)?)
    }

    /// Number of batches ever created.
    pub fn batch_count(&self) -> Result<u64> {
        Ok(self.store.batch_count()?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authorization helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn require_admin(&self, caller: &AccountId) -> Result<()> {
        if self.store.admin()? != Some(*caller) {
            return Err(LedgerError::Unauthorized {
                caller: *caller,
                missing: "is not the admin".to_string(),
            });
        }
        Ok(())
    }

    fn require_role(&self, caller: &AccountId, role: Role) -> Result<()> {
        if !self.store.has_role(role, caller)? {
            return Err(LedgerError::Unauthorized {
                caller: *caller,
                missing: format!("lacks role {role}"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use halaltrace_store::MemoryStore;

    fn ledger() -> Ledger<MemoryStore> {
        Ledger::open(
            MemoryStore::new(),
            AccountId::derive("admin"),
            LedgerConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_open_records_admin() {
        let ledger = ledger();
        assert_eq!(ledger.admin().unwrap(), AccountId::derive("admin"));
    }

    #[test]
    fn test_open_rejects_zero_admin() {
        let result = Ledger::open(MemoryStore::new(), AccountId::ZERO, LedgerConfig::default());
        assert!(matches!(
            result,
            Err(LedgerError::InvalidArgument(ValidationError::ZeroAccount))
        ));
    }

    #[test]
    fn test_reopen_same_admin_ok_different_admin_fails() {
        let store = MemoryStore::new();
        let admin = AccountId::derive("admin");
        store.init_admin(&admin).unwrap();

        let reopened = Ledger::open(store, admin, LedgerConfig::default());
        assert!(reopened.is_ok());

        let store = MemoryStore::new();
        store.init_admin(&admin).unwrap();
        let mismatch = Ledger::open(
            store,
            AccountId::derive("impostor"),
            LedgerConfig::default(),
        );
        assert!(matches!(
            mismatch,
            Err(LedgerError::AlreadyInitialized { existing }) if existing == admin
        ));
    }

    #[test]
    fn test_grant_requires_admin() {
        let ledger = ledger();
        let alice = AccountId::derive("alice");

        let result = ledger.grant_role(&alice, Role::Producer, &alice, 1);
        assert!(matches!(result, Err(LedgerError::Unauthorized { .. })));
        assert!(!ledger.has_role(Role::Producer, &alice).unwrap());
    }

    #[test]
    fn test_has_role_named_unknown_is_false() {
        let ledger = ledger();
        let admin = AccountId::derive("admin");
        let alice = AccountId::derive("alice");
        ledger.grant_role(&admin, Role::Producer, &alice, 1).unwrap();

        assert!(ledger.has_role_named("Producer", &alice).unwrap());
        assert!(!ledger.has_role_named("Shipmaster", &alice).unwrap());
        assert!(!ledger.has_role_named("", &alice).unwrap());
    }

    #[test]
    fn test_create_requires_producer_role() {
        let ledger = ledger();
        let alice = AccountId::derive("alice");

        let result = ledger.create_batch(&alice, BatchId::from("B1"), "Chicken", 1);
        assert!(matches!(result, Err(LedgerError::Unauthorized { .. })));
        assert_eq!(ledger.batch_count().unwrap(), 0);
    }

    #[test]
    fn test_create_validates_before_authorizing() {
        let ledger = ledger();
        let alice = AccountId::derive("alice");

        // Empty id trips validation even though alice also lacks the role.
        let result = ledger.create_batch(&alice, BatchId::from(""), "Chicken", 1);
        assert!(matches!(
            result,
            Err(LedgerError::InvalidArgument(ValidationError::EmptyBatchId))
        ));
    }
}
