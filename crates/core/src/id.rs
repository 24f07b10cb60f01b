//! Strongly-typed identifiers used across the domain.

use core::hash::{Hash, Hasher};
use core::str::FromStr;
use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Product code (e.g. `BP001`). Compared exactly, unique within the catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductCode(String);

/// User login identifier. Equality and hashing ignore case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

/// Order number assigned by the order ledger at commit time.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

macro_rules! impl_string_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Create an identifier from trimmed, non-empty text.
            pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
                let value = value.into();
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::validation(concat!($name, " cannot be empty")));
                }
                Ok(Self(trimmed.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

impl_string_newtype!(ProductCode, "product code");
impl_string_newtype!(UserId, "user id");

impl Borrow<str> for ProductCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl UserId {
    /// Case-insensitive comparison against raw login input.
    pub fn matches(&self, candidate: &str) -> bool {
        self.0.to_lowercase() == candidate.trim().to_lowercase()
    }
}

impl PartialEq for UserId {
    fn eq(&self, other: &Self) -> bool {
        self.matches(&other.0)
    }
}

impl Eq for UserId {}

impl Hash for UserId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_lowercase().hash(state);
    }
}

impl OrderId {
    /// The first id handed out by an empty ledger.
    pub const FIRST: OrderId = OrderId(1);

    pub fn new(value: u64) -> Result<Self, DomainError> {
        if value == 0 {
            return Err(DomainError::validation("order id must be positive"));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u64 {
        self.0
    }

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl core::fmt::Display for OrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for OrderId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u64>()
            .map_err(|e| DomainError::validation(format!("order id '{s}': {e}")))?;
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn product_codes_are_trimmed_and_non_empty() {
        assert_eq!(ProductCode::new("  BP001 ").unwrap().as_str(), "BP001");
        assert!(matches!(ProductCode::new("   "), Err(DomainError::Validation(_))));
    }

    #[test]
    fn user_ids_compare_case_insensitively() {
        let a = UserId::new("Cathy").unwrap();
        let b = UserId::new("cATHY").unwrap();
        assert_eq!(a, b);
        assert!(a.matches(" CATHY "));

        let mut set = HashSet::new();
        set.insert(a);
        assert!(!set.insert(b));
    }

    #[test]
    fn order_ids_are_positive_and_advance_by_one() {
        assert!(OrderId::new(0).is_err());
        assert_eq!(OrderId::FIRST.next().value(), 2);
        assert_eq!("42".parse::<OrderId>().unwrap().value(), 42);
        assert!("OrderID".parse::<OrderId>().is_err());
    }
}
