//! Review submission and listing.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use probe_app_core::{AppId, Rating, Review, UserId};
use probe_app_store::Store;

use crate::error::ApiError;
use crate::state::AppState;

use super::with_conflict_retry;

/// Review list query parameters.
#[derive(Debug, Deserialize)]
pub struct ListReviewsQuery {
    /// Maximum number of reviews to return (default: 10).
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    10
}

/// Review response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
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
    pub created_at: String,
}

impl From<&Review> for ReviewResponse {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id.to_string(),
            app_id: review.app_id.to_string(),
            user_id: review.user_id.to_string(),
            user_name: review.user_name.clone(),
            rating: review.rating.get(),
            comment: review.comment.clone(),
            created_at: review.created_at.to_rfc3339(),
        }
    }
}

/// Review list response.
#[derive(Debug, Serialize)]
pub struct ListReviewsResponse {
    /// Reviews (newest first).
    pub reviews: Vec<ReviewResponse>,
}

/// List an app's reviews, newest first.
pub async fn list_reviews(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<ListReviewsQuery>,
) -> Result<Json<ListReviewsResponse>, ApiError> {
    let app_id = AppId::new(id)?;

    // Unknown apps 404 here the same way the catalog lookup does.
    state
        .store
        .get_app(&app_id)?
        .ok_or_else(|| ApiError::NotFound(format!("app not found: {app_id}")))?;

    let limit = query.limit.min(100);
    let reviews = state.store.list_reviews(&app_id, limit)?;

    Ok(Json(ListReviewsResponse {
        reviews: reviews.iter().map(ReviewResponse::from).collect(),
    }))
}

/// Review submission request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReviewRequest {
    /// The submitting user.
    pub user_id: String,
    /// Display name shown next to the review.
    pub user_name: String,
    /// Star rating (1-5).
    pub rating: u8,
    /// Free-text comment.
    #[serde(default)]
    pub comment: String,
}

/// Review submission response: the stored review plus the aggregate it
/// produced, so the page can refresh its stars without a second fetch.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReviewResponse {
    /// The stored review.
    pub review: ReviewResponse,
    /// The app's updated mean rating.
    pub average_rating: f64,
    /// The app's updated rating count.
    pub rating_count: u64,
}

/// Submit a review and fold its rating into the app's aggregate.
///
/// The review write and the aggregate update are one atomic store commit.
/// A commit-time race with a concurrent submission is retried a bounded
/// number of times before surfacing as 409.
pub async fn submit_review(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<SubmitReviewRequest>,
) -> Result<Json<SubmitReviewResponse>, ApiError> {
    let app_id = AppId::new(id)?;
    let user_id = UserId::new(body.user_id)?;
    let rating = Rating::new(body.rating)?;

    if body.user_name.is_empty() {
        return Err(ApiError::BadRequest("userName must not be empty".into()));
    }

    let review = Review::new(app_id.clone(), user_id, body.user_name, rating, body.comment);

    let app = with_conflict_retry("app", || state.store.submit_review(&review)).await?;

    tracing::info!(
        app_id = %app_id,
        review_id = %review.id,
        rating = %rating,
        average_rating = %app.average_rating,
        rating_count = %app.rating_count,
        "Review submitted"
    );

    Ok(Json(SubmitReviewResponse {
        review: ReviewResponse::from(&review),
        average_rating: app.average_rating,
        rating_count: app.rating_count,
    }))
}
