//! Identifier newtypes for every entity in a character tree.
//!
//! Identifiers wrap a `String` rather than a `Uuid`: documents saved by older
//! clients carry ids in whatever format those clients produced, and migration
//! carries the character id over untouched. Fresh ids are random UUID v4
//! strings, so documents authored on different devices can be merged without
//! collisions.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Produce a new, globally unique identifier string.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn generate() -> Self {
                Self(generate_id())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_id!(CharacterId);
define_id!(PageId);
define_id!(SectionId);
define_id!(BlockId);
