//! Identifiers for assumptions and interviews
//!
//! Both identifiers wrap a UUIDv7, so they sort chronologically by
//! creation time and need no coordination to generate.

use crate::DomainError;
use std::fmt;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u128);

        impl $name {
            /// Generate a new UUIDv7-based identifier
            pub fn new() -> Self {
                Self(uuid::Uuid::now_v7().as_u128())
            }

            /// Create an identifier from a raw u128 value
            ///
            /// This is primarily for storage layer deserialization and tests.
            pub fn from_value(value: u128) -> Self {
                Self(value)
            }

            /// Parse an identifier from its hyphenated UUID string
            pub fn from_string(s: &str) -> Result<Self, DomainError> {
                uuid::Uuid::parse_str(s)
                    .map(|u| Self(u.as_u128()))
                    .map_err(|e| DomainError::InvalidId {
                        kind: $kind,
                        value: s.to_string(),
                        reason: e.to_string(),
                    })
            }

            /// Get the raw u128 value
            pub fn value(&self) -> u128 {
                self.0
            }

            /// Millisecond timestamp embedded in the UUIDv7
            pub fn timestamp(&self) -> u64 {
                (self.0 >> 80) as u64
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", uuid::Uuid::from_u128(self.0))
            }
        }

        impl std::str::FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_string(s)
            }
        }
    };
}

uuid_id!(
    /// Unique identifier for an assumption
    AssumptionId,
    "assumption"
);

uuid_id!(
    /// Unique identifier for an interview
    InterviewId,
    "interview"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_ordering() {
        let id1 = AssumptionId::from_value(1000);
        let id2 = AssumptionId::from_value(2000);

        assert!(id1 < id2);
    }

    #[test]
    fn test_ids_are_chronological() {
        let id1 = InterviewId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let id2 = InterviewId::new();

        assert!(id1 < id2);
        assert!(id1.timestamp() <= id2.timestamp());
    }

    #[test]
    fn test_display_and_parse() {
        let id = AssumptionId::new();
        let id_str = id.to_string();
        assert_eq!(id_str.len(), 36);

        let parsed: AssumptionId = id_str.parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_invalid_string() {
        match AssumptionId::from_string("not-a-uuid") {
            Err(DomainError::InvalidId { kind, .. }) => assert_eq!(kind, "assumption"),
            other => panic!("Expected InvalidId, got {:?}", other),
        }
        assert!(InterviewId::from_string("").is_err());
    }
}
