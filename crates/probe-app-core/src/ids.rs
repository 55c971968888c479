//! Identifier types for Probe-App.
//!
//! This module provides strongly-typed identifiers for apps, users, reviews,
//! and notifications.
//!
//! # Macro-based ID Types
//!
//! App and user identifiers come from the external identity and catalog
//! namespaces, so they are opaque validated strings rather than UUIDs. Review
//! and notification identifiers are generated locally as ULIDs so that their
//! byte order is creation order. Two macros keep the trait plumbing uniform.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// Macro to define a validated string identifier type.
///
/// This macro generates a newtype wrapper around `String` with
/// implementations for:
/// - `Clone`, `PartialEq`, `Eq`, `PartialOrd`, `Ord`, `Hash`
/// - `Serialize`, `Deserialize` (as string, validated)
/// - `FromStr`, `Display`, `Debug`
/// - `TryFrom<String>`, `Into<String>`
/// - `AsRef<[u8]>`
///
/// Validation rejects empty strings, strings longer than `MAX_LEN`, and
/// strings containing a NUL byte (NUL is the composite-key separator in the
/// store).
macro_rules! string_id_type {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Maximum accepted identifier length in bytes.
            pub const MAX_LEN: usize = 128;

            /// Create an identifier from a raw string, validating it.
            ///
            /// # Errors
            ///
            /// Returns an error if the string is empty, longer than
            /// `MAX_LEN`, or contains a NUL byte.
            pub fn new(raw: impl Into<String>) -> Result<Self, IdError> {
                let raw = raw.into();
                if raw.is_empty() {
                    return Err(IdError::Empty);
                }
                if raw.len() > Self::MAX_LEN {
                    return Err(IdError::TooLong {
                        len: raw.len(),
                        max: Self::MAX_LEN,
                    });
                }
                if raw.bytes().any(|b| b == 0) {
                    return Err(IdError::EmbeddedNul);
                }
                Ok(Self(raw))
            }

            /// Return the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                self.0.as_bytes()
            }
        }
    };
}

/// Macro to define a ULID-based identifier type with standard trait
/// implementations.
///
/// ULID identifiers are time-ordered, which makes them usable directly as
/// store keys that iterate in creation order.
macro_rules! ulid_id_type {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(Ulid);

        impl $name {
            /// Create an identifier from a ULID.
            #[must_use]
            pub const fn from_ulid(ulid: Ulid) -> Self {
                Self(ulid)
            }

            /// Generate a new identifier with the current timestamp.
            #[must_use]
            pub fn generate() -> Self {
                Self(Ulid::new())
            }

            /// Return the underlying ULID.
            #[must_use]
            pub const fn as_ulid(&self) -> &Ulid {
                &self.0
            }

            /// Return the bytes of the ULID (16 bytes).
            #[must_use]
            pub fn to_bytes(&self) -> [u8; 16] {
                self.0.to_bytes()
            }

            /// Create an identifier from bytes.
            ///
            /// # Errors
            ///
            /// Returns an error if the bytes are invalid.
            pub fn from_bytes(bytes: [u8; 16]) -> Result<Self, IdError> {
                Ok(Self(Ulid::from_bytes(bytes)))
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let ulid = Ulid::from_string(s).map_err(|_| IdError::InvalidUlid)?;
                Ok(Self(ulid))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0.to_string()
            }
        }
    };
}

string_id_type!(
    AppId,
    "An app identifier from the marketplace catalog.\n\nApp IDs are opaque strings minted by the publishing flow (outside this\nsystem) and arrive via URLs and request bodies."
);
string_id_type!(
    UserId,
    "A user identifier from the external identity provider.\n\nUser IDs are opaque strings; this system never mints them."
);

ulid_id_type!(
    ReviewId,
    "A review identifier using ULID for time-ordering.\n\nReview IDs sort in creation order, so reverse key iteration yields\nnewest-first listings without a separate timestamp index."
);
ulid_id_type!(
    NotificationId,
    "A notification identifier using ULID for time-ordering."
);

/// Errors that can occur when parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The input is empty.
    #[error("identifier is empty")]
    Empty,

    /// The input exceeds the maximum length.
    #[error("identifier is {len} bytes, maximum is {max}")]
    TooLong {
        /// Actual length in bytes.
        len: usize,
        /// Maximum allowed length in bytes.
        max: usize,
    },

    /// The input contains a NUL byte.
    #[error("identifier contains a NUL byte")]
    EmbeddedNul,

    /// The input is not a valid ULID.
    #[error("invalid ULID format")]
    InvalidUlid,
}
