//! Typed identifier wrappers.
//!
//! Projects and tasks are addressed by integers on the wire. Wrapping them
//! keeps a project id from being passed where a task uid is expected. Both
//! serialize as bare numbers (serde newtype structs).
//!
//! Parsing is strict: surrounding whitespace is trimmed, but the whole
//! remainder must be a number, so `"3abc"` is rejected rather than read as
//! project 3. A malformed route param therefore never selects a project.
//!
//! Index uids and key identifiers stay plain strings: the remote service
//! accepts either a key value or its uid in the same path position.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Error returned when a route parameter or CLI argument is not a valid id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: {value:?}")]
pub struct ParseIdError {
    /// Which identifier was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

/// Generates a transparent newtype around an integer identifier.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident($inner:ty), $kind:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub $inner);

        impl $name {
            /// Return the inner integer value.
            pub const fn into_inner(self) -> $inner {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$inner> for $name {
            fn from(id: $inner) -> Self {
                Self(id)
            }
        }

        impl From<$name> for $inner {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<$inner>()
                    .ok()
                    .map(Self)
                    .ok_or_else(|| ParseIdError {
                        kind: $kind,
                        value: s.to_owned(),
                    })
            }
        }
    };
}

define_id! {
    /// Identifier of a project (one configured search-service instance).
    ProjectId(i64), "project id"
}

define_id! {
    /// Identifier of an asynchronous task on the remote search service.
    TaskUid(u64), "task uid"
}
