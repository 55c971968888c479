//! App catalog records and the rating aggregate.
//!
//! An [`AppRecord`] is the catalog entry for one purchasable or free app. It
//! carries the running rating aggregate (`average_rating`, `rating_count`),
//! which must always describe exactly the set of reviews recorded for the
//! app; the two fields are only ever updated together through
//! [`AppRecord::apply_rating`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::AppId;
use crate::review::Rating;

/// A marketplace catalog entry.
///
/// Prices are integer cents. The original catalog kept dollar floats and
/// multiplied by 100 at checkout time; storing cents end to end avoids the
/// float round trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppRecord {
    /// The app ID (from the catalog namespace).
    pub id: AppId,

    /// Display title.
    pub title: String,

    /// Publisher display name, if known.
    pub publisher: Option<String>,

    /// Marketing description. Preferred over `description` for display.
    pub marketing_description: Option<String>,

    /// Plain description.
    pub description: Option<String>,

    /// Thumbnail image URL.
    pub thumbnail: Option<String>,

    /// Price in cents. Ignored when `is_paid` is false.
    pub price_cents: i64,

    /// Whether the app is sold (true) or freely downloadable (false).
    pub is_paid: bool,

    /// Direct download URL for free apps.
    pub download_url: Option<String>,

    /// Running mean of all recorded ratings.
    pub average_rating: f64,

    /// Number of ratings folded into `average_rating`.
    pub rating_count: u64,

    /// When the record was created.
    pub created_at: DateTime<Utc>,

    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl AppRecord {
    /// Create a new free app with an empty rating aggregate.
    #[must_use]
    pub fn new(id: AppId, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: title.into(),
            publisher: None,
            marketing_description: None,
            description: None,
            thumbnail: None,
            price_cents: 0,
            is_paid: false,
            download_url: None,
            average_rating: 0.0,
            rating_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark the app as paid at the given price in cents.
    #[must_use]
    pub fn with_price_cents(mut self, price_cents: i64) -> Self {
        self.price_cents = price_cents;
        self.is_paid = true;
        self
    }

    /// Fold one more rating into the aggregate.
    ///
    /// Applies `new_average = (old_average * old_count + rating) /
    /// (old_count + 1)` and increments the count. The two fields change
    /// together or not at all; callers must persist the whole record
    /// atomically with the review that produced the rating.
    #[allow(clippy::cast_precision_loss)]
    pub fn apply_rating(&mut self, rating: Rating) {
        let old_count = self.rating_count as f64;
        self.average_rating =
            (self.average_rating * old_count + f64::from(rating.get())) / (old_count + 1.0);
        self.rating_count += 1;
        self.updated_at = Utc::now();
    }

    /// Description for display: marketing copy when present and non-empty,
    /// else the plain description.
    #[must_use]
    pub fn display_description(&self) -> Option<&str> {
        self.marketing_description
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.description.as_deref().filter(|s| !s.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_app() -> AppRecord {
        AppRecord::new(AppId::new("sudoku-pro").unwrap(), "Sudoku Pro")
    }

    #[test]
    fn new_app_has_empty_aggregate() {
        let app = sample_app();
        assert_eq!(app.rating_count, 0);
        assert!((app.average_rating - 0.0).abs() < f64::EPSILON);
        assert!(!app.is_paid);
    }

    #[test]
    fn with_price_marks_paid() {
        let app = sample_app().with_price_cents(499);
        assert!(app.is_paid);
        assert_eq!(app.price_cents, 499);
    }

    #[test]
    fn apply_rating_tracks_running_mean() {
        let mut app = sample_app();
        for value in [5, 3, 4] {
            app.apply_rating(Rating::new(value).unwrap());
        }
        assert_eq!(app.rating_count, 3);
        assert!((app.average_rating - 4.0).abs() < 1e-9);
    }

    #[test]
    fn apply_rating_matches_plain_mean_over_long_sequences() {
        let mut app = sample_app();
        let ratings = [1, 5, 5, 2, 3, 4, 4, 4, 1, 5, 2, 3];
        for value in ratings {
            app.apply_rating(Rating::new(value).unwrap());
        }
        // sum = 39 over 12 submissions
        assert_eq!(app.rating_count, 12);
        assert!((app.average_rating - 3.25).abs() < 1e-9);
    }

    #[test]
    fn display_description_prefers_marketing_copy() {
        let mut app = sample_app();
        assert_eq!(app.display_description(), None);

        app.description = Some("Best puzzle game".to_string());
        assert_eq!(app.display_description(), Some("Best puzzle game"));

        app.marketing_description = Some("The #1 sudoku experience".to_string());
        assert_eq!(app.display_description(), Some("The #1 sudoku experience"));

        app.marketing_description = Some(String::new());
        assert_eq!(app.display_description(), Some("Best puzzle game"));
    }
}
