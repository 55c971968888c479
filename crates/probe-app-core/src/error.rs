//! Error types for Probe-App domain operations.

use crate::ids::IdError;

/// Result type for domain operations.
pub type Result<T> = std::result::Result<T, DomainError>;

/// Errors that can occur when constructing or validating domain values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A rating outside the accepted 1..=5 range.
    #[error("rating must be between 1 and 5, got {value}")]
    InvalidRating {
        /// The rejected value.
        value: u8,
    },

    /// A price that cannot be charged.
    #[error("invalid price: {0} (must be a positive amount in cents)")]
    InvalidPrice(i64),

    /// Invalid identifier.
    #[error("invalid identifier: {0}")]
    InvalidId(#[from] IdError),
}
