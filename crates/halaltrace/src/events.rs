//! Ledger notifications.
//!
//! Every successful state change emits exactly one event, synchronously,
//! after its commit. Events are fire-and-forget: the ledger never reads
//! them back, and a sink cannot fail an operation that already committed.

use serde::{Deserialize, Serialize};

use halaltrace_core::{AccountId, BatchId, BatchStatus, CertHash};
use halaltrace_roles::Role;

/// A structured notification for external indexers and observers.
///
/// Payload fields are exactly the operation's inputs plus the resulting
/// identity and host timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    BatchCreated {
        batch_id: BatchId,
        product_name: String,
        producer: AccountId,
        timestamp: i64,
    },
    HalalCertified {
        batch_id: BatchId,
        cert_hash: CertHash,
        authority: AccountId,
        timestamp: i64,
    },
    StatusUpdated {
        batch_id: BatchId,
        status: BatchStatus,
        updated_by: AccountId,
        timestamp: i64,
    },
    BatchTransferred {
        batch_id: BatchId,
        previous_owner: AccountId,
        new_owner: AccountId,
        timestamp: i64,
    },
    RoleAssigned {
        role: Role,
        account: AccountId,
        timestamp: i64,
    },
    RoleRevoked {
        role: Role,
        account: AccountId,
        timestamp: i64,
    },
}

impl Event {
    /// The batch this event concerns, if any.
    pub fn batch_id(&self) -> Option<&BatchId> {
        match self {
            Event::BatchCreated { batch_id, .. }
            | Event::HalalCertified { batch_id, .. }
            | Event::StatusUpdated { batch_id, .. }
            | Event::BatchTransferred { batch_id, .. } => Some(batch_id),
            Event::RoleAssigned { .. } | Event::RoleRevoked { .. } => None,
        }
    }
}

/// Consumer seam for ledger notifications.
///
/// Implementations must not block; the ledger calls `emit` inline on the
/// committing thread.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: Event);
}

impl<T: EventSink + ?Sized> EventSink for std::sync::Arc<T> {
    fn emit(&self, event: Event) {
        (**self).emit(event)
    }
}

/// Default sink: discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn emit(&self, _event: Event) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_batch_id() {
        let event = Event::BatchCreated {
            batch_id: BatchId::from("B1"),
            product_name: "Chicken".to_string(),
            producer: AccountId::derive("producer"),
            timestamp: 1000,
        };
        assert_eq!(event.batch_id(), Some(&BatchId::from("B1")));

        let role_event = Event::RoleAssigned {
            role: Role::Producer,
            account: AccountId::derive("alice"),
            timestamp: 1000,
        };
        assert_eq!(role_event.batch_id(), None);
    }

    #[test]
    fn test_event_serializes_for_indexers() {
        let event = Event::StatusUpdated {
            batch_id: BatchId::from("B1"),
            status: BatchStatus::Sold,
            updated_by: AccountId::derive("retailer"),
            timestamp: 99,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"StatusUpdated\""));
        assert!(json.contains("\"Sold\""));

        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
