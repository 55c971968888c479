//! User profile handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use probe_app_core::{UserId, UserProfile};
use probe_app_store::Store;

use crate::error::ApiError;
use crate::state::AppState;

/// User profile response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// User ID.
    pub id: String,
    /// Whether the user holds the premium entitlement.
    pub premium: bool,
    /// When premium was first granted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub premium_since: Option<String>,
    /// Apps the user has purchased.
    pub purchased_apps: Vec<String>,
}

impl From<&UserProfile> for UserResponse {
    fn from(profile: &UserProfile) -> Self {
        Self {
            id: profile.id.to_string(),
            premium: profile.premium,
            premium_since: profile.premium_since.map(|t| t.to_rfc3339()),
            purchased_apps: profile
                .purchased_apps
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// Get a user profile by ID.
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let user_id = UserId::new(id)?;

    let profile = state
        .store
        .get_user(&user_id)?
        .ok_or_else(|| ApiError::NotFound(format!("user not found: {user_id}")))?;

    Ok(Json(UserResponse::from(&profile)))
}
