//! Review records and the star rating value type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;
use crate::ids::{AppId, ReviewId, UserId};

/// A star rating in the inclusive range 1..=5.
///
/// Constructed only through validation, so a `Rating` held anywhere in the
/// system is known to be in range.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Lowest accepted rating.
    pub const MIN: u8 = 1;

    /// Highest accepted rating.
    pub const MAX: u8 = 5;

    /// Create a rating, rejecting values outside 1..=5.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidRating`] for out-of-range values.
    pub fn new(value: u8) -> Result<Self, DomainError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidRating { value })
        }
    }

    /// Return the rating value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Debug for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rating({})", self.0)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user review of an app.
///
/// Reviews are immutable once written. They are listed newest-first, which
/// the store gets for free from the time-ordered [`ReviewId`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Review ID, time-ordered.
    pub id: ReviewId,

    /// The app this review belongs to.
    pub app_id: AppId,

    /// The submitting user.
    pub user_id: UserId,

    /// Display name shown next to the review.
    pub user_name: String,

    /// Star rating folded into the app's aggregate.
    pub rating: Rating,

    /// Free-text comment. May be empty.
    pub comment: String,

    /// When the review was submitted.
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Create a new review with a fresh time-ordered ID.
    #[must_use]
    pub fn new(
        app_id: AppId,
        user_id: UserId,
        user_name: impl Into<String>,
        rating: Rating,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            id: ReviewId::generate(),
            app_id,
            user_id,
            user_name: user_name.into(),
            rating,
            comment: comment.into(),
            created_at: Utc::now(),
        }
    }
}
