//! Server-rendered page integration tests.

mod common;

use axum::http::StatusCode;
use common::TestHarness;
use probe_app_core::{AppId, AppRecord};

#[tokio::test]
async fn app_page_renders_preview_tags() {
    let harness = TestHarness::new();
    harness.seed_app(&TestHarness::sudoku_pro());

    let response = harness.server.get("/app").add_query_param("id", "sudoku-pro").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains(r#"content="Sudoku Pro is on Probe-App!""#));
    assert!(html.contains(r#"content="Best puzzle game""#));
    assert!(html.contains(r#"content="https://cdn.example/sudoku.png""#));
    assert!(html.contains("<title>Probe-App: Sudoku Pro</title>"));
}

#[tokio::test]
async fn app_page_canonical_url_uses_request_path() {
    let harness = TestHarness::new();
    harness.seed_app(&TestHarness::sudoku_pro());

    let response = harness.server.get("/app").add_query_param("id", "sudoku-pro").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains(r#"content="https://probe-app-opal.vercel.app/app?id=sudoku-pro""#));
}

#[tokio::test]
async fn app_page_falls_back_for_sparse_records() {
    let harness = TestHarness::new();
    harness.seed_app(&AppRecord::new(AppId::new("bare-app").unwrap(), "Bare App"));

    let response = harness.server.get("/app").add_query_param("id", "bare-app").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains(r#"content="Bare App is on Probe-App!""#));
    assert!(html.contains(r#"content="Check out this app on Probe-App!""#));
    assert!(html.contains(r#"content="https://default-thumbnail.png""#));
}

#[tokio::test]
async fn app_page_prefers_marketing_description() {
    let harness = TestHarness::new();
    let mut app = TestHarness::sudoku_pro();
    app.marketing_description = Some("The #1 sudoku experience".to_string());
    harness.seed_app(&app);

    let response = harness.server.get("/app").add_query_param("id", "sudoku-pro").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains(r#"content="The #1 sudoku experience""#));
    assert!(!html.contains(r#"content="Best puzzle game""#));
}

#[tokio::test]
async fn missing_id_returns_404_with_generic_tags() {
    let harness = TestHarness::new();

    let response = harness.server.get("/app").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let html = response.text();
    assert!(html.contains("App ID missing."));
    assert!(html.contains(r#"content="Check out this app on Probe-App!""#));
    assert!(html.contains(r#"content="https://default-thumbnail.png""#));
}

#[tokio::test]
async fn unknown_app_returns_404_never_500() {
    let harness = TestHarness::new();

    let response = harness.server.get("/app").add_query_param("id", "no-such-app").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let html = response.text();
    assert!(html.contains("App not found."));
    assert!(html.contains(r#"content="Probe-App""#));
}

#[tokio::test]
async fn malformed_id_returns_404_never_500() {
    let harness = TestHarness::new();
    let overlong = "x".repeat(500);

    let response = harness.server.get("/app").add_query_param("id", &overlong).await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert!(response.text().contains("App not found."));
}
