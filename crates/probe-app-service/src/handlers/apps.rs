//! App catalog handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use probe_app_core::{AppId, AppRecord};
use probe_app_store::Store;

use crate::error::ApiError;
use crate::state::AppState;

/// App record response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppResponse {
    /// App ID.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Publisher display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    /// Display description (marketing copy when present).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Thumbnail image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Price in cents.
    pub price: i64,
    /// Whether the app is sold or freely downloadable.
    pub is_paid: bool,
    /// Direct download URL for free apps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    /// Running mean of all recorded ratings.
    pub average_rating: f64,
    /// Number of ratings folded into the mean.
    pub rating_count: u64,
}

impl From<&AppRecord> for AppResponse {
    fn from(app: &AppRecord) -> Self {
        Self {
            id: app.id.to_string(),
            title: app.title.clone(),
            publisher: app.publisher.clone(),
            description: app.display_description().map(String::from),
            thumbnail: app.thumbnail.clone(),
            price: app.price_cents,
            is_paid: app.is_paid,
            download_url: app.download_url.clone(),
            average_rating: app.average_rating,
            rating_count: app.rating_count,
        }
    }
}

/// Get an app record by ID.
pub async fn get_app(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<AppResponse>, ApiError> {
    let app_id = AppId::new(id)?;

    let app = state
        .store
        .get_app(&app_id)?
        .ok_or_else(|| ApiError::NotFound(format!("app not found: {app_id}")))?;

    Ok(Json(AppResponse::from(&app)))
}
