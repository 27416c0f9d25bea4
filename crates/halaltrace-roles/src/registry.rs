//! Role membership state.
//!
//! One admin identity, fixed at construction, plus four independent
//! membership sets. Revoking a role takes effect for every later
//! authorization check but is never retroactive: ownership assignments made
//! while the role was held stand, because ownership checks compare
//! identities, not roles.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use halaltrace_core::AccountId;

use crate::role::Role;

/// In-memory role membership state.
///
/// The memory store embeds this directly; the SQLite store persists the
/// same shape as rows and rebuilds nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRegistry {
    /// The single identity allowed to grant and revoke roles.
    admin: AccountId,

    /// Membership sets, indexed by `Role::to_u8`.
    members: [HashSet<AccountId>; 4],
}

impl RoleRegistry {
    /// Create a registry with the given admin and no members.
    pub fn new(admin: AccountId) -> Self {
        Self {
            admin,
            members: Default::default(),
        }
    }

    /// The admin identity. Immutable for the registry's lifetime.
    pub fn admin(&self) -> &AccountId {
        &self.admin
    }

    /// Whether `account` is the admin.
    pub fn is_admin(&self, account: &AccountId) -> bool {
        self.admin == *account
    }

    /// Add `account` to `role`'s membership set. Idempotent.
    pub fn grant(&mut self, role: Role, account: AccountId) {
        self.members[role.to_u8() as usize].insert(account);
    }

    /// Remove `account` from `role`'s membership set. Idempotent; removing
    /// a non-member is a no-op.
    pub fn revoke(&mut self, role: Role, account: &AccountId) {
        self.members[role.to_u8() as usize].remove(account);
    }

    /// Whether `account` currently holds `role`.
    pub fn is_member(&self, role: Role, account: &AccountId) -> bool {
        self.members[role.to_u8() as usize].contains(account)
    }

    /// Whether `account` holds any role allowed to take custody of a batch.
    pub fn is_custodian(&self, account: &AccountId) -> bool {
        Role::CUSTODY.iter().any(|r| self.is_member(*r, account))
    }

    /// Every role `account` currently holds, in declaration order.
    pub fn roles_of(&self, account: &AccountId) -> Vec<Role> {
        Role::ALL
            .iter()
            .copied()
            .filter(|r| self.is_member(*r, account))
            .collect()
    }

    /// All members of `role`.
    pub fn members(&self, role: Role) -> impl Iterator<Item = &AccountId> {
        self.members[role.to_u8() as usize].iter()
    }
}
