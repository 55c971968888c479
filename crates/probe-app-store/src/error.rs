//! Error types for Probe-App storage.

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Serialization/deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Record not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of record ("app", "user", ...).
        entity: &'static str,
        /// The identifier that was not found.
        id: String,
    },

    /// An optimistic transaction lost a commit-time race.
    ///
    /// The caller may retry; every attempt sees a consistent record.
    #[error("concurrent update conflict on {entity}: {id}")]
    Conflict {
        /// The kind of record the commit raced on.
        entity: &'static str,
        /// The contended identifier.
        id: String,
    },
}

impl StoreError {
    /// Shorthand for a `NotFound` error.
    #[must_use]
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Shorthand for a `Conflict` error.
    #[must_use]
    pub fn conflict(entity: &'static str, id: impl Into<String>) -> Self {
        Self::Conflict {
            entity,
            id: id.into(),
        }
    }

    /// Whether this error is a commit-time conflict worth retrying.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}
