//! Notification feed and user profile integration tests.

mod common;

use axum::http::StatusCode;
use common::TestHarness;
use probe_app_core::{Notification, UserId};
use probe_app_store::Store;

#[tokio::test]
async fn feed_lists_newest_first_with_unread_count() {
    let harness = TestHarness::new();
    let user = UserId::new("user-1").unwrap();

    for n in 1..=3 {
        harness
            .store
            .put_notification(&Notification::new(user.clone(), format!("note {n}")))
            .unwrap();
        std::thread::sleep(std::time::Duration::from_millis(3));
    }

    let response = harness
        .server
        .get("/api/notifications")
        .add_query_param("userId", "user-1")
        .add_query_param("limit", "2")
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let notifications = body["notifications"].as_array().unwrap();
    assert_eq!(notifications.len(), 2);
    assert_eq!(notifications[0]["message"], "note 3");
    assert_eq!(notifications[1]["message"], "note 2");
    // Unread counts the whole recent window, not just the visible page.
    assert_eq!(body["unread"], 3);
}

#[tokio::test]
async fn feed_is_empty_for_unknown_user() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .get("/api/notifications")
        .add_query_param("userId", "nobody")
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert!(body["notifications"].as_array().unwrap().is_empty());
    assert_eq!(body["unread"], 0);
}

#[tokio::test]
async fn feed_requires_user_id() {
    let harness = TestHarness::new();

    let response = harness.server.get("/api/notifications").await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_user_profile_returns_404() {
    let harness = TestHarness::new();

    let response = harness.server.get("/api/users/nobody").await;

    response.assert_status(StatusCode::NOT_FOUND);
}
