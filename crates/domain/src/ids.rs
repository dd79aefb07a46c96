use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifiers arrive from the mission registry as opaque strings ("m1", "r7").
macro_rules! define_id {
    ($name:ident, $entity:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create an id, rejecting empty or whitespace-only values.
            pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
                let value = value.into();
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::invalid_id(concat!($entity, " id cannot be empty")));
                }
                Ok(Self(trimmed.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_id!(MissionId, "Mission");
define_id!(RegionId, "Region");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        let id = MissionId::new("  m1 ").unwrap();
        assert_eq!(id.as_str(), "m1");
        assert_eq!(id.to_string(), "m1");
    }

    #[test]
    fn rejects_blank_ids() {
        assert!(matches!(RegionId::new("   "), Err(DomainError::InvalidId(_))));
    }

    #[test]
    fn deserialization_goes_through_validation() {
        let id: RegionId = serde_json::from_str("\"r7\"").unwrap();
        assert_eq!(id.as_str(), "r7");
        assert!(serde_json::from_str::<RegionId>("\"\"").is_err());
    }
}
