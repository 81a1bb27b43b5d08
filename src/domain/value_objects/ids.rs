//! # Identifiers
//!
//! Strongly-typed identifiers for comparison-domain entities.
//!
//! UUID-backed identifiers are generated by this service; string-backed
//! identifiers come from upstream systems (tenant context, supplier
//! registry, user directory) and are carried through unchanged.
//!
//! # Examples
//!
//! ```
//! use procure_compare::domain::value_objects::{ComparisonId, TenantId};
//!
//! let id = ComparisonId::new_v4();
//! let tenant = TenantId::new("hospital-group-1");
//!
//! assert_ne!(id, ComparisonId::new_v4());
//! assert_eq!(tenant.as_str(), "hospital-group-1");
//! ```

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
            JsonSchema,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            #[must_use]
            pub fn new_v4() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wraps an existing UUID.
            #[inline]
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID.
            #[inline]
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }
    };
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier from a string.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

uuid_id!(
    /// Identifier of a [`Comparison`](crate::domain::entities::Comparison) aggregate.
    ComparisonId
);

uuid_id!(
    /// Identifier of the request-for-quotation a comparison belongs to.
    RfqId
);

uuid_id!(
    /// Identifier of a supplier quote.
    QuoteId
);

uuid_id!(
    /// Identifier of a domain event.
    EventId
);

string_id!(
    /// Tenant (organization) scoping every comparison.
    TenantId
);

string_id!(
    /// Supplier that issued a quote.
    SupplierId
);

string_id!(
    /// User acting on a comparison.
    UserId
);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn uuid_ids_are_unique() {
        assert_ne!(QuoteId::new_v4(), QuoteId::new_v4());
    }

    #[test]
    fn uuid_id_parses_from_display() {
        let id = ComparisonId::new_v4();
        let parsed: ComparisonId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn uuid_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<RfqId>().is_err());
    }

    #[test]
    fn string_id_serializes_transparently() {
        let tenant = TenantId::new("tenant-a");
        let json = serde_json::to_string(&tenant).unwrap();
        assert_eq!(json, "\"tenant-a\"");
    }

    #[test]
    fn quote_id_serializes_as_plain_uuid() {
        let uuid = Uuid::new_v4();
        let id = QuoteId::from_uuid(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{uuid}\""));
    }
}
