//! Notification feed handlers.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use probe_app_core::{Notification, UserId};
use probe_app_store::Store;

use crate::error::ApiError;
use crate::state::AppState;

/// How far back the unread count looks. The bell only ever shows a small
/// number, so counting over the most recent window is enough.
const UNREAD_WINDOW: usize = 100;

/// Notification list query parameters.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNotificationsQuery {
    /// The user whose feed to list.
    pub user_id: String,
    /// Maximum number of notifications to return (default: 10).
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    10
}

/// Notification response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    /// Notification ID.
    pub id: String,
    /// Message text.
    pub message: String,
    /// Whether the user has seen the notification.
    pub read: bool,
    /// Creation timestamp.
    pub created_at: String,
}

impl From<&Notification> for NotificationResponse {
    fn from(n: &Notification) -> Self {
        Self {
            id: n.id.to_string(),
            message: n.message.clone(),
            read: n.read,
            created_at: n.created_at.to_rfc3339(),
        }
    }
}

/// Notification list response.
#[derive(Debug, Serialize)]
pub struct ListNotificationsResponse {
    /// Notifications (newest first).
    pub notifications: Vec<NotificationResponse>,
    /// Unread count over the recent window.
    pub unread: usize,
}

/// List a user's notifications, newest first, with the unread count.
pub async fn list_notifications(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListNotificationsQuery>,
) -> Result<Json<ListNotificationsResponse>, ApiError> {
    let user_id = UserId::new(query.user_id)?;
    let limit = query.limit.min(UNREAD_WINDOW);

    // One scan covers both the visible page and the unread count.
    let recent = state.store.list_notifications(&user_id, UNREAD_WINDOW)?;

    let unread = recent.iter().filter(|n| !n.read).count();
    let notifications = recent
        .iter()
        .take(limit)
        .map(NotificationResponse::from)
        .collect();

    Ok(Json(ListNotificationsResponse {
        notifications,
        unread,
    }))
}
