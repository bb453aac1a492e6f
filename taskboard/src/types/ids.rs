//! Identifier newtypes for columns and tasks.
//!
//! Ids are plain strings of the form `prefix + integer` (`C7`, `T12`). The
//! numeric suffix is what the allocator uses to pick the next id; anything
//! that does not parse is still a valid id, it just never takes part in
//! allocation.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Prefix every allocated id of this kind starts with
            pub const PREFIX: &'static str = $prefix;

            /// Wrap an existing id string without validation
            pub fn from_string(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Build the id for a numeric sequence value
            pub fn from_sequence(n: u64) -> Self {
                Self(format!("{}{}", $prefix, n))
            }

            /// Get the inner string value
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Numeric suffix, or `None` when the id is malformed
            pub fn sequence(&self) -> Option<u64> {
                crate::allocator::parse_sequence(&self.0, $prefix)
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

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Identifier of a column (`C1`, `C2`, ...)
    ColumnId,
    "C"
);

define_id!(
    /// Identifier of a task (`T1`, `T2`, ...)
    TaskId,
    "T"
);
