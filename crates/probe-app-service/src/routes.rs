//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{apps, checkout, health, notifications, pages, reviews, users};
use crate::state::AppState;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
/// - `GET /app?id=<appId>` - Server-rendered app-detail page with
///   social-preview metadata
///
/// ## Checkout
/// - `POST /api/create-checkout` - Create a Stripe checkout session
/// - `POST /api/verify-payment` - Verify a session and grant entitlement
///
/// ## Catalog & Reviews
/// - `GET /api/apps/:id` - App record
/// - `GET /api/apps/:id/reviews` - Reviews, newest first
/// - `POST /api/apps/:id/reviews` - Submit a review
///
/// ## Users & Notifications
/// - `GET /api/users/:id` - User profile
/// - `GET /api/notifications?userId=<id>` - Notification feed
///
/// Non-POST requests to the POST routes are rejected with 405 before any
/// handler (and therefore any provider call) runs.
pub fn create_router(state: AppState) -> Router {
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    // Build CORS layer
    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    Router::new()
        // Health (public)
        .route("/health", get(health::health))
        // Server-rendered pages
        .route("/app", get(pages::app_detail))
        // Checkout
        .route("/api/create-checkout", post(checkout::create_checkout))
        .route("/api/verify-payment", post(checkout::verify_payment))
        // Catalog & reviews
        .route("/api/apps/:id", get(apps::get_app))
        .route(
            "/api/apps/:id/reviews",
            get(reviews::list_reviews).post(reviews::submit_review),
        )
        // Users & notifications
        .route("/api/users/:id", get(users::get_user))
        .route("/api/notifications", get(notifications::list_notifications))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
