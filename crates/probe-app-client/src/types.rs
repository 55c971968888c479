//! Request and response types for the Probe-App client.
//!
//! The wire format is camelCase JSON, matching the marketplace API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An app catalog record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppDetails {
    /// App ID.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Publisher display name.
    #[serde(default)]
    pub publisher: Option<String>,
    /// Display description.
    #[serde(default)]
    pub description: Option<String>,
    /// Thumbnail image URL.
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Price in cents.
    pub price: i64,
    /// Whether the app is sold or freely downloadable.
    pub is_paid: bool,
    /// Direct download URL for free apps.
    #[serde(default)]
    pub download_url: Option<String>,
    /// Running mean of all recorded ratings.
    pub average_rating: f64,
    /// Number of ratings folded into the mean.
    pub rating_count: u64,
}

/// A review as returned by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewItem {
    /// Review ID.
    pub id: String,
    /// The app the review belongs to.
    pub app_id: String,
    /// The submitting user.
    pub user_id: String,
    /// Display name shown next to the review.
    pub user_name: String,
    /// Star rating (1-5).
    pub rating: u8,
    /// Free-text comment.
    pub comment: String,
    /// Submission timestamp.
    pub created_at: DateTime<Utc>,
}

/// Review list response.
#[derive(Debug, Clone, Deserialize)]
pub struct ListReviewsResponse {
    /// Reviews (newest first).
    pub reviews: Vec<ReviewItem>,
}

/// Review submission request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReviewRequest {
    /// The submitting user.
    pub user_id: String,
    /// Display name shown next to the review.
    pub user_name: String,
    /// Star rating (1-5).
    pub rating: u8,
    /// Free-text comment.
    pub comment: String,
}

/// Review submission response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReviewResponse {
    /// The stored review.
    pub review: ReviewItem,
    /// The app's updated mean rating.
    pub average_rating: f64,
    /// The app's updated rating count.
    pub rating_count: u64,
}

/// Checkout creation request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutRequest {
    /// The app being purchased.
    pub app_id: String,
    /// Product display name on the checkout page.
    pub app_name: String,
    /// Price in cents.
    pub price: i64,
    /// The purchasing user.
    pub user_id: String,
    /// Customer email pre-filled on the checkout page.
    pub user_email: String,
}

/// Checkout creation response.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCheckoutResponse {
    /// The provider-issued session ID.
    pub id: String,
}

/// Payment verification response.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyPaymentResponse {
    /// Whether the session's payment completed.
    pub success: bool,
}

/// A user profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileResponse {
    /// User ID.
    pub id: String,
    /// Whether the user holds the premium entitlement.
    pub premium: bool,
    /// When premium was first granted.
    #[serde(default)]
    pub premium_since: Option<DateTime<Utc>>,
    /// Apps the user has purchased.
    pub purchased_apps: Vec<String>,
}

/// A notification feed entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationItem {
    /// Notification ID.
    pub id: String,
    /// Message text.
    pub message: String,
    /// Whether the user has seen the notification.
    pub read: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Notification feed response.
#[derive(Debug, Clone, Deserialize)]
pub struct ListNotificationsResponse {
    /// Notifications (newest first).
    pub notifications: Vec<NotificationItem>,
    /// Unread count over the recent window.
    pub unread: usize,
}

/// Error response body: `{"error": "<message>"}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    /// The error message.
    pub error: String,
}
