//! Batch lifecycle statuses.
//!
//! The conventional lifecycle is `Produced -> CertifiedHalal ->
//! {InTransit | AtRetailer} -> Sold`, but the status vocabulary is
//! deliberately open: any authorized caller may set any non-empty value,
//! including regressing the lifecycle stage. The known stages get typed
//! arms; everything else lands in [`BatchStatus::Custom`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle stage of a batch.
///
/// Serializes as a plain string so external indexers see the same
/// vocabulary the history log records.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BatchStatus {
    /// Freshly created by its producer.
    Produced,
    /// A halal authority attached a certification artifact.
    CertifiedHalal,
    /// In custody of a distributor.
    InTransit,
    /// In custody of a retailer.
    AtRetailer,
    /// Sold to an end customer.
    Sold,
    /// Any other caller-supplied stage. Must be non-empty; the engine
    /// rejects `Custom("")` before it reaches storage.
    Custom(String),
}

impl BatchStatus {
    /// The canonical string for this status.
    pub fn as_str(&self) -> &str {
        match self {
            BatchStatus::Produced => "Produced",
            BatchStatus::CertifiedHalal => "CertifiedHalal",
            BatchStatus::InTransit => "InTransit",
            BatchStatus::AtRetailer => "AtRetailer",
            BatchStatus::Sold => "Sold",
            BatchStatus::Custom(s) => s,
        }
    }

    /// Whether the status string is empty (only possible for `Custom`).
    pub fn is_empty(&self) -> bool {
        matches!(self, BatchStatus::Custom(s) if s.is_empty())
    }

    /// Whether this is one of the conventional lifecycle stages.
    pub fn is_conventional(&self) -> bool {
        !matches!(self, BatchStatus::Custom(_))
    }
}

impl From<&str> for BatchStatus {
    /// Known stage strings normalize to their typed arms; anything else
    /// becomes `Custom`, so `BatchStatus::from(s).as_str() == s` always.
    fn from(s: &str) -> Self {
        match s {
            "Produced" => BatchStatus::Produced,
            "CertifiedHalal" => BatchStatus::CertifiedHalal,
            "InTransit" => BatchStatus::InTransit,
            "AtRetailer" => BatchStatus::AtRetailer,
            "Sold" => BatchStatus::Sold,
            other => BatchStatus::Custom(other.to_string()),
        }
    }
}

impl From<String> for BatchStatus {
    fn from(s: String) -> Self {
        BatchStatus::from(s.as_str())
    }
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for BatchStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BatchStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(BatchStatus::from(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_string_roundtrip() {
        for s in ["Produced", "CertifiedHalal", "InTransit", "AtRetailer", "Sold"] {
            let status = BatchStatus::from(s);
            assert!(status.is_conventional(), "{s} should have a typed arm");
            assert_eq!(status.as_str(), s);
        }
    }

    #[test]
    fn test_custom_status_preserved() {
        let status = BatchStatus::from("Recalled");
        assert_eq!(status, BatchStatus::Custom("Recalled".to_string()));
        assert_eq!(status.as_str(), "Recalled");
        assert!(!status.is_conventional());
    }

    #[test]
    fn test_known_strings_normalize() {
        // A Custom arm never shadows a conventional stage.
        assert_eq!(BatchStatus::from("InTransit"), BatchStatus::InTransit);
        assert_ne!(
            BatchStatus::from("InTransit"),
            BatchStatus::Custom("InTransit".to_string())
        );
    }

    #[test]
    fn test_empty_only_via_custom() {
        assert!(BatchStatus::Custom(String::new()).is_empty());
        assert!(!BatchStatus::Produced.is_empty());
        assert!(!BatchStatus::Custom("x".to_string()).is_empty());
    }

    #[test]
    fn test_serde_as_plain_string() {
        let json = serde_json::to_string(&BatchStatus::CertifiedHalal).unwrap();
        assert_eq!(json, "\"CertifiedHalal\"");

        let back: BatchStatus = serde_json::from_str("\"Quarantined\"").unwrap();
        assert_eq!(back, BatchStatus::Custom("Quarantined".to_string()));
    }
}
