//! The closed role vocabulary.
//!
//! Roles are independent capability flags, not a hierarchy. An account may
//! hold any combination of them, and holding one never implies another.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A capability grant recognized by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// May create batches and take custody of them.
    Producer,
    /// May certify batches and override statuses.
    HalalAuthority,
    /// May take custody; receiving a transfer marks the batch in transit.
    Distributor,
    /// May take custody; receiving a transfer marks the batch at retail.
    Retailer,
}

impl Role {
    /// Every recognized role.
    pub const ALL: [Role; 4] = [
        Role::Producer,
        Role::HalalAuthority,
        Role::Distributor,
        Role::Retailer,
    ];

    /// Roles allowed to take custody of a batch. HalalAuthority certifies
    /// but never owns.
    pub const CUSTODY: [Role; 3] = [Role::Producer, Role::Distributor, Role::Retailer];

    /// The canonical name of this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Producer => "Producer",
            Role::HalalAuthority => "HalalAuthority",
            Role::Distributor => "Distributor",
            Role::Retailer => "Retailer",
        }
    }

    /// Parse a role name. Unrecognized names yield `None`, never an error;
    /// membership queries against them simply come back false.
    pub fn parse(name: &str) -> Option<Role> {
        match name {
            "Producer" => Some(Role::Producer),
            "HalalAuthority" => Some(Role::HalalAuthority),
            "Distributor" => Some(Role::Distributor),
            "Retailer" => Some(Role::Retailer),
            _ => None,
        }
    }

    /// Whether this role can take custody of a batch.
    pub fn is_custody(&self) -> bool {
        !matches!(self, Role::HalalAuthority)
    }

    /// Stable numeric tag for storage.
    pub fn to_u8(self) -> u8 {
        match self {
            Role::Producer => 0,
            Role::HalalAuthority => 1,
            Role::Distributor => 2,
            Role::Retailer => 3,
        }
    }

    /// Inverse of [`Role::to_u8`].
    pub fn from_u8(value: u8) -> Option<Role> {
        match value {
            0 => Some(Role::Producer),
            1 => Some(Role::HalalAuthority),
            2 => Some(Role::Distributor),
            3 => Some(Role::Retailer),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_name_roundtrip() {
        for role in Role::ALL {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn test_role_tag_roundtrip() {
        for role in Role::ALL {
            assert_eq!(Role::from_u8(role.to_u8()), Some(role));
        }
        assert_eq!(Role::from_u8(200), None);
    }

    #[test]
    fn test_unknown_role_name() {
        assert_eq!(Role::parse("Admin"), None);
        assert_eq!(Role::parse("producer"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn test_custody_roles() {
        assert!(Role::Producer.is_custody());
        assert!(Role::Distributor.is_custody());
        assert!(Role::Retailer.is_custody());
        assert!(!Role::HalalAuthority.is_custody());
        assert_eq!(Role::CUSTODY.len(), 3);
    }
}
