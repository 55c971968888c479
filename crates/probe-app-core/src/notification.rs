//! User notifications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{NotificationId, UserId};

/// A notification shown in a user's notification feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Notification ID, time-ordered.
    pub id: NotificationId,

    /// The recipient.
    pub user_id: UserId,

    /// Message text.
    pub message: String,

    /// Whether the user has seen the notification.
    pub read: bool,

    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Create a new unread notification.
    #[must_use]
    pub fn new(user_id: UserId, message: impl Into<String>) -> Self {
        Self {
            id: NotificationId::generate(),
            user_id,
            message: message.into(),
            read: false,
            created_at: Utc::now(),
        }
    }
}
