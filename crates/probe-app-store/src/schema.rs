//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Primary app catalog records, keyed by `app_id`.
    pub const APPS: &str = "apps";

    /// Review records, keyed by `app_id || 0x00 || review_id` (ULID).
    /// Reviews belong to exactly one app and are only ever read per app,
    /// so the composite key doubles as the per-app time index.
    pub const REVIEWS: &str = "reviews";

    /// User profiles (premium flag, purchased set), keyed by `user_id`.
    pub const USERS: &str = "users";

    /// Notifications, keyed by `user_id || 0x00 || notification_id` (ULID).
    pub const NOTIFICATIONS: &str = "notifications";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![cf::APPS, cf::REVIEWS, cf::USERS, cf::NOTIFICATIONS]
}
