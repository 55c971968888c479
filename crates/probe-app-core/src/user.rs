//! User profiles and the premium entitlement.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::ids::{AppId, UserId};

/// A marketplace user profile.
///
/// Profiles exist to hold the purchase record; identity itself lives with
/// the external provider. A profile is created lazily on first grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// The user ID (from the external identity provider).
    pub id: UserId,

    /// Whether the user holds the premium entitlement.
    pub premium: bool,

    /// When premium was first granted. Never moves on later purchases.
    pub premium_since: Option<DateTime<Utc>>,

    /// Apps the user has purchased. Set semantics: re-buying is a no-op.
    pub purchased_apps: BTreeSet<AppId>,

    /// When the profile was last updated.
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Create an empty profile with no entitlements.
    #[must_use]
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            premium: false,
            premium_since: None,
            purchased_apps: BTreeSet::new(),
            updated_at: Utc::now(),
        }
    }

    /// Record a verified purchase: set premium, stamp `premium_since` on
    /// the first grant only, and add the app to the purchased set.
    ///
    /// Returns true when the app was newly added.
    pub fn grant_purchase(&mut self, app_id: AppId, at: DateTime<Utc>) -> bool {
        self.premium = true;
        if self.premium_since.is_none() {
            self.premium_since = Some(at);
        }
        let added = self.purchased_apps.insert(app_id);
        self.updated_at = at;
        added
    }

    /// Whether the user already purchased the given app.
    #[must_use]
    pub fn has_purchased(&self, app_id: &AppId) -> bool {
        self.purchased_apps.contains(app_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_profile_has_no_entitlements() {
        let profile = UserProfile::new(UserId::new("user-1").unwrap());
        assert!(!profile.premium);
        assert!(profile.premium_since.is_none());
        assert!(profile.purchased_apps.is_empty());
    }

    #[test]
    fn grant_sets_premium_and_adds_app() {
        let mut profile = UserProfile::new(UserId::new("user-1").unwrap());
        let app = AppId::new("sudoku-pro").unwrap();
        let at = Utc::now();

        assert!(profile.grant_purchase(app.clone(), at));
        assert!(profile.premium);
        assert_eq!(profile.premium_since, Some(at));
        assert!(profile.has_purchased(&app));
    }

    #[test]
    fn regrant_keeps_first_premium_since() {
        let mut profile = UserProfile::new(UserId::new("user-1").unwrap());
        let first = Utc::now();
        profile.grant_purchase(AppId::new("sudoku-pro").unwrap(), first);

        let later = first + chrono::Duration::days(30);
        assert!(profile.grant_purchase(AppId::new("chess-master").unwrap(), later));
        assert_eq!(profile.premium_since, Some(first));
        assert_eq!(profile.purchased_apps.len(), 2);
    }

    #[test]
    fn regrant_of_same_app_is_a_no_op() {
        let mut profile = UserProfile::new(UserId::new("user-1").unwrap());
        let app = AppId::new("sudoku-pro").unwrap();
        profile.grant_purchase(app.clone(), Utc::now());
        assert!(!profile.grant_purchase(app, Utc::now()));
        assert_eq!(profile.purchased_apps.len(), 1);
    }
}
