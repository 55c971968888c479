//! Server-rendered app-detail pages with social-preview metadata.
//!
//! Crawlers from social platforms fetch `GET /app?id=<appId>` and read the
//! `og:`/`twitter:` tags out of the head. Every outcome renders a complete
//! document: a missing id or unknown app gets a 404 page with generic
//! fallback tags, and only a store or template failure yields the 500 page.

use std::sync::Arc;

use askama::Template;
use axum::extract::{OriginalUri, Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use serde::Deserialize;

use probe_app_core::{AppId, AppRecord};
use probe_app_store::Store;

use crate::state::AppState;

/// Thumbnail used when the app record has none.
const DEFAULT_THUMBNAIL: &str = "https://default-thumbnail.png";

/// Description used when the app record has none.
const DEFAULT_DESCRIPTION: &str = "Check out this app on Probe-App!";

/// App-detail page query parameters.
#[derive(Debug, Deserialize)]
pub struct AppPageQuery {
    /// The app to render.
    #[serde(default)]
    pub id: Option<String>,
}

/// App-detail page template.
#[derive(Template)]
#[template(path = "app_detail.html")]
struct AppDetailTemplate {
    page_title: String,
    preview_title: String,
    description: String,
    image: String,
    url: String,
}

/// 404 page template. Carries generic preview tags so a shared link to a
/// missing app still unfurls sanely.
#[derive(Template)]
#[template(path = "not_found.html")]
struct NotFoundTemplate {
    message: &'static str,
}

/// 500 page template.
#[derive(Template)]
#[template(path = "server_error.html")]
struct ServerErrorTemplate;

/// Render the app-detail page for social-preview crawlers.
pub async fn app_detail(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<AppPageQuery>,
) -> (StatusCode, Html<String>) {
    let Some(raw_id) = query.id.filter(|id| !id.is_empty()) else {
        return not_found("App ID missing.");
    };

    let Ok(app_id) = AppId::new(raw_id) else {
        return not_found("App not found.");
    };

    let app = match state.store.get_app(&app_id) {
        Ok(Some(app)) => app,
        Ok(None) => return not_found("App not found."),
        Err(e) => {
            tracing::error!(app_id = %app_id, error = %e, "Failed to load app for page render");
            return server_error();
        }
    };

    // Canonical URL: the frontend origin plus this request's path and query.
    let path_and_query = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_string(), ToString::to_string);
    let url = format!("{}{path_and_query}", state.config.frontend_url);

    let template = detail_template(&app, url);
    match template.render() {
        Ok(html) => (StatusCode::OK, Html(html)),
        Err(e) => {
            tracing::error!(app_id = %app_id, error = %e, "Template render error");
            server_error()
        }
    }
}

/// Build the detail template from an app record, applying the fallbacks.
fn detail_template(app: &AppRecord, url: String) -> AppDetailTemplate {
    let title = if app.title.is_empty() {
        "App Detail"
    } else {
        &app.title
    };

    AppDetailTemplate {
        page_title: title.to_string(),
        preview_title: format!("{title} is on Probe-App!"),
        description: app
            .display_description()
            .unwrap_or(DEFAULT_DESCRIPTION)
            .to_string(),
        image: app
            .thumbnail
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_THUMBNAIL)
            .to_string(),
        url,
    }
}

fn not_found(message: &'static str) -> (StatusCode, Html<String>) {
    let template = NotFoundTemplate { message };
    match template.render() {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)),
        Err(e) => {
            tracing::error!(error = %e, "Template render error");
            server_error()
        }
    }
}

fn server_error() -> (StatusCode, Html<String>) {
    let html = ServerErrorTemplate
        .render()
        .unwrap_or_else(|_| "<h1>Server Error Loading App</h1>".to_string());
    (StatusCode::INTERNAL_SERVER_ERROR, Html(html))
}
