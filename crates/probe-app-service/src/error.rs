//! API error types and responses.
//!
//! All JSON error responses use the flat `{"error": "<message>"}` shape the
//! marketplace front end expects.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Bad request - invalid input, rejected before any external call.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Conflict - a concurrent update won the race, retries exhausted.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Payment provider call failed.
    #[error("payment provider error: {0}")]
    Provider(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error response body: `{"error": "<message>"}`.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            Self::Provider(msg) => {
                tracing::error!(error = %msg, "Payment provider error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<probe_app_store::StoreError> for ApiError {
    fn from(err: probe_app_store::StoreError) -> Self {
        match err {
            probe_app_store::StoreError::NotFound { entity, id } => {
                Self::NotFound(format!("{entity} not found: {id}"))
            }
            probe_app_store::StoreError::Conflict { .. } => {
                Self::Conflict("The record was updated concurrently, please try again".into())
            }
            probe_app_store::StoreError::Database(msg)
            | probe_app_store::StoreError::Serialization(msg) => Self::Internal(msg),
        }
    }
}

impl From<probe_app_core::DomainError> for ApiError {
    fn from(err: probe_app_core::DomainError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<probe_app_core::IdError> for ApiError {
    fn from(err: probe_app_core::IdError) -> Self {
        Self::BadRequest(format!("invalid identifier: {err}"))
    }
}

impl From<crate::stripe::StripeError> for ApiError {
    fn from(err: crate::stripe::StripeError) -> Self {
        Self::Provider(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_renders_409() {
        let response = ApiError::Conflict("the record was updated concurrently".into())
            .into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn store_conflict_maps_to_conflict() {
        let err = ApiError::from(probe_app_store::StoreError::conflict("app", "sudoku-pro"));
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[test]
    fn internal_error_hides_details() {
        let response = ApiError::Internal("rocksdb: io error".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
