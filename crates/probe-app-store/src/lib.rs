//! `RocksDB` storage layer for the Probe-App marketplace.
//!
//! This crate provides persistent storage for apps, reviews, user profiles,
//! and notifications using `RocksDB` with optimistic transactions.
//!
//! # Architecture
//!
//! The storage uses the following column families:
//!
//! - `apps`: Primary catalog records, keyed by `app_id`
//! - `reviews`: Review records, keyed by `app_id || 0x00 || review_id` (ULID)
//! - `users`: User profiles, keyed by `user_id`
//! - `notifications`: Notifications, keyed by `user_id || 0x00 || notification_id`
//!
//! The rating aggregate on an app record is the one cross-request shared
//! mutable value in the system. [`Store::submit_review`] updates it inside
//! an optimistic transaction that also writes the review itself, so the
//! aggregate and the review list can never drift apart; a commit-time race
//! surfaces as [`StoreError::Conflict`] and the caller decides whether to
//! retry.
//!
//! # Example
//!
//! ```no_run
//! use probe_app_store::{RocksStore, Store};
//! use probe_app_core::{AppId, AppRecord};
//!
//! let store = RocksStore::open("/tmp/probe-app-db").unwrap();
//!
//! let app_id = AppId::new("sudoku-pro").unwrap();
//! let app = AppRecord::new(app_id.clone(), "Sudoku Pro").with_price_cents(499);
//! store.put_app(&app).unwrap();
//!
//! let retrieved = store.get_app(&app_id).unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod keys;
pub mod rocks;
pub mod schema;

pub use error::{Result, StoreError};
pub use rocks::RocksStore;

use probe_app_core::{AppId, AppRecord, Notification, Review, UserId, UserProfile};

/// The storage trait defining all database operations.
///
/// This trait abstracts the storage layer, allowing for different
/// implementations (e.g., `RocksDB`, in-memory for testing).
pub trait Store: Send + Sync {
    // =========================================================================
    // App Operations
    // =========================================================================

    /// Insert or update an app catalog record.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_app(&self, app: &AppRecord) -> Result<()>;

    /// Get an app by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_app(&self, app_id: &AppId) -> Result<Option<AppRecord>>;

    // =========================================================================
    // Review Operations
    // =========================================================================

    /// Append a review and fold its rating into the app's aggregate, as one
    /// atomic commit.
    ///
    /// Returns the app record as updated by this submission.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotFound` if the app doesn't exist; no partial state
    ///   is left behind.
    /// - `StoreError::Conflict` if a concurrent submission won the commit
    ///   race; the caller may retry with the same review.
    fn submit_review(&self, review: &Review) -> Result<AppRecord>;

    /// List reviews for an app, ordered by time (newest first).
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_reviews(&self, app_id: &AppId, limit: usize) -> Result<Vec<Review>>;

    // =========================================================================
    // User Operations
    // =========================================================================

    /// Insert or update a user profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_user(&self, profile: &UserProfile) -> Result<()>;

    /// Get a user profile by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_user(&self, user_id: &UserId) -> Result<Option<UserProfile>>;

    // =========================================================================
    // Compound Operations
    // =========================================================================

    /// Record a verified purchase: upsert the user profile with the premium
    /// flag and the purchased app, and write the purchase notification, in
    /// one atomic commit.
    ///
    /// The profile is created if it doesn't exist yet. Re-granting the same
    /// app is a no-op for the purchased set and never moves
    /// `premium_since`.
    ///
    /// Returns the profile as updated by this grant.
    ///
    /// # Errors
    ///
    /// - `StoreError::Conflict` if a concurrent grant won the commit race;
    ///   the caller may retry.
    fn grant_purchase(
        &self,
        user_id: &UserId,
        app_id: &AppId,
        notification: &Notification,
    ) -> Result<UserProfile>;

    // =========================================================================
    // Notification Operations
    // =========================================================================

    /// Insert a notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_notification(&self, notification: &Notification) -> Result<()>;

    /// List notifications for a user, ordered by time (newest first).
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_notifications(&self, user_id: &UserId, limit: usize) -> Result<Vec<Notification>>;
}
