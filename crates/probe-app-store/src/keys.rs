//! Key encoding utilities for `RocksDB`.
//!
//! App and user identifiers are variable-length strings, so composite keys
//! join the parent identifier and the child ULID with a NUL separator.
//! Identifiers are validated to never contain NUL, which keeps the encoding
//! unambiguous and keeps one app's keys from shadowing another's when one
//! identifier is a prefix of the other.

use probe_app_core::{AppId, NotificationId, ReviewId, UserId};

/// Separator between a parent identifier and a child ULID.
const SEP: u8 = 0;

/// Create an app key from an app ID.
#[must_use]
pub fn app_key(app_id: &AppId) -> Vec<u8> {
    app_id.as_ref().to_vec()
}

/// Create a user key from a user ID.
#[must_use]
pub fn user_key(user_id: &UserId) -> Vec<u8> {
    user_id.as_ref().to_vec()
}

/// Create a review key.
///
/// Format: `app_id || 0x00 || review_id (16 bytes)`
///
/// Since ULIDs are time-ordered, an app's reviews sort by creation time.
#[must_use]
pub fn review_key(app_id: &AppId, review_id: &ReviewId) -> Vec<u8> {
    let mut key = Vec::with_capacity(app_id.as_ref().len() + 1 + 16);
    key.extend_from_slice(app_id.as_ref());
    key.push(SEP);
    key.extend_from_slice(&review_id.to_bytes());
    key
}

/// Create a prefix covering all review keys for an app.
#[must_use]
pub fn app_reviews_prefix(app_id: &AppId) -> Vec<u8> {
    let mut prefix = Vec::with_capacity(app_id.as_ref().len() + 1);
    prefix.extend_from_slice(app_id.as_ref());
    prefix.push(SEP);
    prefix
}

/// Create a notification key.
///
/// Format: `user_id || 0x00 || notification_id (16 bytes)`
#[must_use]
pub fn notification_key(user_id: &UserId, notification_id: &NotificationId) -> Vec<u8> {
    let mut key = Vec::with_capacity(user_id.as_ref().len() + 1 + 16);
    key.extend_from_slice(user_id.as_ref());
    key.push(SEP);
    key.extend_from_slice(&notification_id.to_bytes());
    key
}

/// Create a prefix covering all notification keys for a user.
#[must_use]
pub fn user_notifications_prefix(user_id: &UserId) -> Vec<u8> {
    let mut prefix = Vec::with_capacity(user_id.as_ref().len() + 1);
    prefix.extend_from_slice(user_id.as_ref());
    prefix.push(SEP);
    prefix
}

/// The exclusive upper bound of a prefix range: the prefix with its final
/// byte incremented. Seeking here and iterating in reverse visits the
/// newest entry under the prefix first.
///
/// # Panics
///
/// Panics if the prefix is empty or ends in `0xFF`; prefixes built by this
/// module always end in the `0x00` separator.
#[must_use]
pub fn prefix_upper_bound(prefix: &[u8]) -> Vec<u8> {
    let mut bound = prefix.to_vec();
    let last = bound.last_mut().expect("prefix is never empty");
    assert!(*last < u8::MAX, "prefix must not end in 0xFF");
    *last += 1;
    bound
}
