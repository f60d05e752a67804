//! Identifier newtypes. New ids are ULIDs; existing ids are opaque strings.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use ulid::Ulid;

/// Behaviour shared by every identifier type
pub trait EntityId:
    Clone
    + Eq
    + Hash
    + Ord
    + fmt::Debug
    + fmt::Display
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    /// Get the inner string value
    fn as_str(&self) -> &str;
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a fresh ULID-backed id
            pub fn new() -> Self {
                Self(Ulid::new().to_string())
            }

            /// Wrap an existing id
            pub fn from_string(id: impl Into<String>) -> Self {
                Self(id.into())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::from_string(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl EntityId for $name {
            fn as_str(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Identifies a board
    BoardId
);
define_id!(
    /// Identifies a list within a board
    ListId
);
define_id!(
    /// Identifies a card within a list
    CardId
);
