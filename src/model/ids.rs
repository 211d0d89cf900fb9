//! Opaque identifiers minted by the external persistence collaborator.
//!
//! All ids are strings on the wire; the newtypes keep them from being
//! mixed up across collections.

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

string_id! {
    /// Identifier of a piece of gas-distribution equipment.
    NodeId
}

string_id! {
    /// Identifier of a directed pipe segment.
    ConnectionId
}

string_id! {
    /// Identifier of a building.
    BuildingId
}

string_id! {
    /// Identifier of a floor within a building.
    FloorId
}

string_id! {
    /// Identifier of a zone within a floor.
    ZoneId
}

string_id! {
    /// Identifier of a diagram annotation.
    AnnotationId
}
