//! Common test utilities for probe-app integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use tempfile::TempDir;

use probe_app_core::{AppId, AppRecord};
use probe_app_service::{create_router, AppState, ServiceConfig};
use probe_app_store::{RocksStore, Store};

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Direct store access for seeding test data.
    pub store: Arc<RocksStore>,
    /// Temporary directory for the database (kept alive for test duration).
    pub _temp_dir: TempDir,
}

impl TestHarness {
    /// Create a new test harness with a fresh database and no Stripe.
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Create a harness whose Stripe client points at the given base URL
    /// (a wiremock server in tests).
    pub fn with_stripe(stripe_api_url: &str) -> Self {
        Self::build(Some(stripe_api_url))
    }

    fn build(stripe_api_url: Option<&str>) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = Arc::new(RocksStore::open(temp_dir.path()).expect("Failed to open store"));

        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            data_dir: temp_dir.path().to_string_lossy().to_string(),
            stripe_api_key: stripe_api_url.map(|_| "sk_test_harness".into()),
            stripe_api_url: stripe_api_url
                .map_or_else(|| ServiceConfig::default().stripe_api_url, String::from),
            frontend_url: "https://probe-app-opal.vercel.app".into(),
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
        };

        let state = AppState::new(Arc::clone(&store), config);
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            store,
            _temp_dir: temp_dir,
        }
    }

    /// Seed an app record directly into the store.
    pub fn seed_app(&self, app: &AppRecord) {
        self.store.put_app(app).expect("Failed to seed app");
    }

    /// A paid test app with description and thumbnail filled in.
    pub fn sudoku_pro() -> AppRecord {
        let mut app =
            AppRecord::new(AppId::new("sudoku-pro").unwrap(), "Sudoku Pro").with_price_cents(499);
        app.description = Some("Best puzzle game".to_string());
        app.thumbnail = Some("https://cdn.example/sudoku.png".to_string());
        app
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
