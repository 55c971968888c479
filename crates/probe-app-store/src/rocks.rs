//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `Store` trait
//! on top of `OptimisticTransactionDB`. Plain reads and writes go straight to
//! the database; the two read-modify-write operations (`submit_review`,
//! `grant_purchase`) run inside optimistic transactions so a commit-time race
//! is detected instead of silently lost.

use std::path::Path;
use std::sync::Arc;

use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, Direction, ErrorKind, IteratorMode, MultiThreaded,
    OptimisticTransactionDB, Options,
};

use probe_app_core::{AppId, AppRecord, Notification, Review, UserId, UserProfile};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::Store;

type Db = OptimisticTransactionDB<MultiThreaded>;

/// `RocksDB`-backed storage implementation.
pub struct RocksStore {
    db: Arc<Db>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = Db::open_cf_descriptors(&opts, path.as_ref(), cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::debug!(path = %path.as_ref().display(), "opened marketplace store");

        Ok(Self { db: Arc::new(db) })
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Scan a prefix range newest-first, decoding values.
    ///
    /// Seeks to the exclusive upper bound of the prefix and walks backwards,
    /// which visits the highest (newest, for ULID-suffixed keys) entries
    /// first without loading the whole range.
    fn scan_prefix_newest_first<T: serde::de::DeserializeOwned>(
        &self,
        cf: &Arc<BoundColumnFamily<'_>>,
        prefix: &[u8],
        limit: usize,
    ) -> Result<Vec<T>> {
        let upper = keys::prefix_upper_bound(prefix);
        let iter = self
            .db
            .iterator_cf(cf, IteratorMode::From(&upper, Direction::Reverse));

        let mut items = Vec::new();
        for entry in iter {
            if items.len() >= limit {
                break;
            }
            let (key, value) = entry.map_err(|e| StoreError::Database(e.to_string()))?;
            if !key.starts_with(prefix) {
                break;
            }
            items.push(Self::deserialize(&value)?);
        }
        Ok(items)
    }

    /// Map a transaction commit result, translating commit-time races into
    /// `StoreError::Conflict`.
    fn map_commit(
        result: std::result::Result<(), rocksdb::Error>,
        entity: &'static str,
        id: &str,
    ) -> Result<()> {
        match result {
            Ok(()) => Ok(()),
            Err(e) => match e.kind() {
                ErrorKind::Busy | ErrorKind::TryAgain | ErrorKind::TimedOut => {
                    tracing::debug!(entity, id, "optimistic commit lost a race");
                    Err(StoreError::conflict(entity, id))
                }
                _ => Err(StoreError::Database(e.to_string())),
            },
        }
    }
}

impl Store for RocksStore {
    // =========================================================================
    // App Operations
    // =========================================================================

    fn put_app(&self, app: &AppRecord) -> Result<()> {
        let cf = self.cf(cf::APPS)?;
        let key = keys::app_key(&app.id);
        let value = Self::serialize(app)?;

        self.db
            .put_cf(&cf, key, value)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn get_app(&self, app_id: &AppId) -> Result<Option<AppRecord>> {
        let cf = self.cf(cf::APPS)?;
        let key = keys::app_key(app_id);

        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    // =========================================================================
    // Review Operations
    // =========================================================================

    fn submit_review(&self, review: &Review) -> Result<AppRecord> {
        let cf_apps = self.cf(cf::APPS)?;
        let cf_reviews = self.cf(cf::REVIEWS)?;

        let app_key = keys::app_key(&review.app_id);
        let review_key = keys::review_key(&review.app_id, &review.id);

        let txn = self.db.transaction();

        // The read is registered for commit-time validation: if another
        // submission commits a new aggregate first, this commit fails.
        let raw = txn
            .get_for_update_cf(&cf_apps, &app_key, true)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .ok_or_else(|| StoreError::not_found("app", review.app_id.as_str()))?;
        let mut app: AppRecord = Self::deserialize(&raw)?;

        app.apply_rating(review.rating);

        txn.put_cf(&cf_apps, &app_key, Self::serialize(&app)?)
            .map_err(|e| StoreError::Database(e.to_string()))?;
        txn.put_cf(&cf_reviews, &review_key, Self::serialize(review)?)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Self::map_commit(txn.commit(), "app", review.app_id.as_str())?;

        Ok(app)
    }

    fn list_reviews(&self, app_id: &AppId, limit: usize) -> Result<Vec<Review>> {
        let cf_reviews = self.cf(cf::REVIEWS)?;
        let prefix = keys::app_reviews_prefix(app_id);
        self.scan_prefix_newest_first(&cf_reviews, &prefix, limit)
    }

    // =========================================================================
    // User Operations
    // =========================================================================

    fn put_user(&self, profile: &UserProfile) -> Result<()> {
        let cf = self.cf(cf::USERS)?;
        let key = keys::user_key(&profile.id);
        let value = Self::serialize(profile)?;

        self.db
            .put_cf(&cf, key, value)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn get_user(&self, user_id: &UserId) -> Result<Option<UserProfile>> {
        let cf = self.cf(cf::USERS)?;
        let key = keys::user_key(user_id);

        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    // =========================================================================
    // Compound Operations
    // =========================================================================

    fn grant_purchase(
        &self,
        user_id: &UserId,
        app_id: &AppId,
        notification: &Notification,
    ) -> Result<UserProfile> {
        let cf_users = self.cf(cf::USERS)?;
        let cf_notifications = self.cf(cf::NOTIFICATIONS)?;

        let user_key = keys::user_key(user_id);
        let notification_key = keys::notification_key(user_id, &notification.id);

        let txn = self.db.transaction();

        let mut profile = txn
            .get_for_update_cf(&cf_users, &user_key, true)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize::<UserProfile>(&data))
            .transpose()?
            .unwrap_or_else(|| UserProfile::new(user_id.clone()));

        profile.grant_purchase(app_id.clone(), chrono::Utc::now());

        txn.put_cf(&cf_users, &user_key, Self::serialize(&profile)?)
            .map_err(|e| StoreError::Database(e.to_string()))?;
        txn.put_cf(
            &cf_notifications,
            &notification_key,
            Self::serialize(notification)?,
        )
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Self::map_commit(txn.commit(), "user", user_id.as_str())?;

        Ok(profile)
    }

    // =========================================================================
    // Notification Operations
    // =========================================================================

    fn put_notification(&self, notification: &Notification) -> Result<()> {
        let cf = self.cf(cf::NOTIFICATIONS)?;
        let key = keys::notification_key(&notification.user_id, &notification.id);
        let value = Self::serialize(notification)?;

        self.db
            .put_cf(&cf, key, value)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn list_notifications(&self, user_id: &UserId, limit: usize) -> Result<Vec<Notification>> {
        let cf_notifications = self.cf(cf::NOTIFICATIONS)?;
        let prefix = keys::user_notifications_prefix(user_id);
        self.scan_prefix_newest_first(&cf_notifications, &prefix, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use probe_app_core::Rating;
    use tempfile::TempDir;

    fn create_test_store() -> (RocksStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = RocksStore::open(dir.path()).unwrap();
        (store, dir)
    }

    fn app_id(raw: &str) -> AppId {
        AppId::new(raw).unwrap()
    }

    fn user_id(raw: &str) -> UserId {
        UserId::new(raw).unwrap()
    }

    fn review(app: &AppId, user: &str, rating: u8, comment: &str) -> Review {
        Review::new(
            app.clone(),
            user_id(user),
            user,
            Rating::new(rating).unwrap(),
            comment,
        )
    }

    #[test]
    fn app_crud() {
        let (store, _dir) = create_test_store();
        let id = app_id("sudoku-pro");
        let mut app = AppRecord::new(id.clone(), "Sudoku Pro").with_price_cents(499);
        app.description = Some("Best puzzle game".to_string());

        store.put_app(&app).unwrap();

        let retrieved = store.get_app(&id).unwrap().unwrap();
        assert_eq!(retrieved.title, "Sudoku Pro");
        assert_eq!(retrieved.price_cents, 499);
        assert!(retrieved.is_paid);
        assert_eq!(retrieved.rating_count, 0);

        assert!(store.get_app(&app_id("missing")).unwrap().is_none());
    }

    #[test]
    fn submit_review_updates_aggregate_and_appends_review() {
        let (store, _dir) = create_test_store();
        let id = app_id("sudoku-pro");
        store.put_app(&AppRecord::new(id.clone(), "Sudoku Pro")).unwrap();

        for (rating, comment) in [(5, "great"), (3, "okay"), (4, "good")] {
            store.submit_review(&review(&id, "carol", rating, comment)).unwrap();
            std::thread::sleep(std::time::Duration::from_millis(2)); // Ensure different ULIDs
        }

        let app = store.get_app(&id).unwrap().unwrap();
        assert_eq!(app.rating_count, 3);
        assert!((app.average_rating - 4.0).abs() < 1e-9);

        let reviews = store.list_reviews(&id, 10).unwrap();
        assert_eq!(reviews.len(), 3);
        assert_eq!(reviews[0].comment, "good"); // Newest first
        assert_eq!(reviews[2].comment, "great");
    }

    #[test]
    fn submit_review_to_missing_app_leaves_no_state() {
        let (store, _dir) = create_test_store();
        let id = app_id("ghost-app");

        let result = store.submit_review(&review(&id, "carol", 5, "nice"));
        assert!(matches!(result, Err(StoreError::NotFound { entity: "app", .. })));

        // Neither half of the submission may have landed.
        assert!(store.get_app(&id).unwrap().is_none());
        assert!(store.list_reviews(&id, 10).unwrap().is_empty());
    }

    #[test]
    fn concurrent_submissions_converge_on_exact_mean() {
        let (store, _dir) = create_test_store();
        let id = app_id("sudoku-pro");
        store.put_app(&AppRecord::new(id.clone(), "Sudoku Pro")).unwrap();

        let store = std::sync::Arc::new(store);
        let mut handles = Vec::new();

        // 5 threads each submit ratings 1..=5; the exact mean is 3.0.
        for t in 0..5 {
            let store = std::sync::Arc::clone(&store);
            let id = id.clone();
            handles.push(std::thread::spawn(move || {
                for rating in 1..=5u8 {
                    let r = review(&id, &format!("user-{t}"), rating, "load");
                    loop {
                        match store.submit_review(&r) {
                            Ok(_) => break,
                            Err(e) if e.is_conflict() => {}
                            Err(e) => panic!("unexpected store error: {e}"),
                        }
                    }
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let app = store.get_app(&id).unwrap().unwrap();
        assert_eq!(app.rating_count, 25);
        assert!((app.average_rating - 3.0).abs() < 1e-9);

        let reviews = store.list_reviews(&id, 100).unwrap();
        assert_eq!(reviews.len(), 25);
    }

    #[test]
    fn list_reviews_honors_limit_newest_first() {
        let (store, _dir) = create_test_store();
        let id = app_id("sudoku-pro");
        store.put_app(&AppRecord::new(id.clone(), "Sudoku Pro")).unwrap();

        for n in 1..=4 {
            store
                .submit_review(&review(&id, "carol", 4, &format!("review {n}")))
                .unwrap();
            std::thread::sleep(std::time::Duration::from_millis(2));
        }

        let reviews = store.list_reviews(&id, 2).unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].comment, "review 4");
        assert_eq!(reviews[1].comment, "review 3");
    }

    #[test]
    fn list_reviews_limit_zero_returns_nothing() {
        let (store, _dir) = create_test_store();
        let id = app_id("sudoku-pro");
        store.put_app(&AppRecord::new(id.clone(), "Sudoku Pro")).unwrap();
        store.submit_review(&review(&id, "carol", 5, "great")).unwrap();

        assert!(store.list_reviews(&id, 0).unwrap().is_empty());
        assert_eq!(store.list_reviews(&id, 1).unwrap().len(), 1);
    }

    #[test]
    fn reviews_do_not_leak_across_apps() {
        let (store, _dir) = create_test_store();
        let a = app_id("app");
        let b = app_id("app2");
        store.put_app(&AppRecord::new(a.clone(), "A")).unwrap();
        store.put_app(&AppRecord::new(b.clone(), "B")).unwrap();

        store.submit_review(&review(&a, "carol", 5, "for a")).unwrap();
        store.submit_review(&review(&b, "carol", 1, "for b")).unwrap();

        let for_a = store.list_reviews(&a, 10).unwrap();
        assert_eq!(for_a.len(), 1);
        assert_eq!(for_a[0].comment, "for a");

        let app_a = store.get_app(&a).unwrap().unwrap();
        assert_eq!(app_a.rating_count, 1);
        assert!((app_a.average_rating - 5.0).abs() < 1e-9);
    }

    #[test]
    fn grant_purchase_creates_profile_and_notification() {
        let (store, _dir) = create_test_store();
        let user = user_id("user-1");
        let app = app_id("sudoku-pro");

        let n = Notification::new(user.clone(), "Your purchase of \"Sudoku Pro\" is complete.");
        let profile = store.grant_purchase(&user, &app, &n).unwrap();

        assert!(profile.premium);
        assert!(profile.premium_since.is_some());
        assert!(profile.has_purchased(&app));

        let stored = store.get_user(&user).unwrap().unwrap();
        assert!(stored.premium);

        let notifications = store.list_notifications(&user, 10).unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].message, n.message);
        assert!(!notifications[0].read);
    }

    #[test]
    fn regrant_keeps_premium_since_and_set_semantics() {
        let (store, _dir) = create_test_store();
        let user = user_id("user-1");
        let app = app_id("sudoku-pro");

        let first = store
            .grant_purchase(&user, &app, &Notification::new(user.clone(), "first"))
            .unwrap();
        let second = store
            .grant_purchase(&user, &app, &Notification::new(user.clone(), "second"))
            .unwrap();

        assert_eq!(second.premium_since, first.premium_since);
        assert_eq!(second.purchased_apps.len(), 1);

        // Both notifications were still recorded.
        let notifications = store.list_notifications(&user, 10).unwrap();
        assert_eq!(notifications.len(), 2);
    }

    #[test]
    fn grants_accumulate_across_apps() {
        let (store, _dir) = create_test_store();
        let user = user_id("user-1");

        store
            .grant_purchase(&user, &app_id("sudoku-pro"), &Notification::new(user.clone(), "a"))
            .unwrap();
        let profile = store
            .grant_purchase(&user, &app_id("chess-master"), &Notification::new(user.clone(), "b"))
            .unwrap();

        assert_eq!(profile.purchased_apps.len(), 2);
    }

    #[test]
    fn notifications_list_newest_first_per_user() {
        let (store, _dir) = create_test_store();
        let user = user_id("user-1");
        let other = user_id("user-2");

        for n in 1..=3 {
            store
                .put_notification(&Notification::new(user.clone(), format!("note {n}")))
                .unwrap();
            std::thread::sleep(std::time::Duration::from_millis(2));
        }
        store
            .put_notification(&Notification::new(other.clone(), "other user"))
            .unwrap();

        let notifications = store.list_notifications(&user, 2).unwrap();
        assert_eq!(notifications.len(), 2);
        assert_eq!(notifications[0].message, "note 3");
        assert_eq!(notifications[1].message, "note 2");

        let others = store.list_notifications(&other, 10).unwrap();
        assert_eq!(others.len(), 1);
    }

    #[test]
    fn user_profile_roundtrip() {
        let (store, _dir) = create_test_store();
        let user = user_id("user-1");

        assert!(store.get_user(&user).unwrap().is_none());

        let mut profile = UserProfile::new(user.clone());
        profile.grant_purchase(app_id("sudoku-pro"), chrono::Utc::now());
        store.put_user(&profile).unwrap();

        let retrieved = store.get_user(&user).unwrap().unwrap();
        assert!(retrieved.premium);
        assert_eq!(retrieved.purchased_apps.len(), 1);
    }
}
