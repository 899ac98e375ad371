//! Identifier codec — the storage/domain identity boundary.
//!
//! The relational store owns numeric keys; everything above the repository
//! layer sees only opaque string identifiers. This module is the single
//! point where the representation could change (e.g. to random opaque
//! tokens) without touching any aggregate or use case.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Storage-native numeric identity. Owned by the persistence layer and
/// never exposed beyond a repository implementation.
pub type StorageKey = i64;

/// Opaque string identifier for an aggregate outside the storage layer.
///
/// Consumers compare these for equality and pass them to repositories;
/// the string is never parsed for structure outside the codec.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DomainId(String);

impl DomainId {
    /// Wraps a raw string as a domain identifier.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DomainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DomainId {
    fn from(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}

impl From<String> for DomainId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// Converts a domain identifier back to its storage key.
///
/// # Errors
///
/// Returns `DomainError::InvalidIdentifier` if the string is not a
/// representation of a valid positive integer key.
pub fn to_storage(id: &DomainId) -> Result<StorageKey, DomainError> {
    match id.0.parse::<StorageKey>() {
        Ok(key) if key > 0 => Ok(key),
        _ => Err(DomainError::InvalidIdentifier(id.0.clone())),
    }
}

/// Converts a storage key to its domain identifier, the decimal string
/// form of the key. Total for any valid key.
#[must_use]
pub fn to_domain(key: StorageKey) -> DomainId {
    DomainId(key.to_string())
}

/// Propagates absence without invoking the fallible path.
#[must_use]
pub fn to_domain_optional(key: Option<StorageKey>) -> Option<DomainId> {
    key.map(to_domain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_for_valid_keys() {
        for key in [1_i64, 7, 24, 9_007_199_254_740_993, i64::MAX] {
            let id = to_domain(key);
            assert_eq!(to_storage(&id).unwrap(), key);
        }
    }

    #[test]
    fn test_to_domain_is_decimal_string_form() {
        assert_eq!(to_domain(42).as_str(), "42");
    }

    #[test]
    fn test_malformed_identifiers_are_rejected() {
        for raw in ["", "abc", "12abc", "1.5", " 7", "7 "] {
            let result = to_storage(&DomainId::from(raw));
            match result {
                Err(DomainError::InvalidIdentifier(s)) => assert_eq!(s, raw),
                other => panic!("expected InvalidIdentifier for {raw:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_non_positive_keys_are_rejected() {
        for raw in ["0", "-3"] {
            assert!(to_storage(&DomainId::from(raw)).is_err());
        }
    }

    #[test]
    fn test_to_domain_optional_propagates_absence() {
        assert_eq!(to_domain_optional(None), None);
        assert_eq!(to_domain_optional(Some(9)), Some(DomainId::from("9")));
    }
}
