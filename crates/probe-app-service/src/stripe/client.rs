//! Stripe API client implementation.

use reqwest::Client;
use std::time::Duration;

use super::types::{CheckoutSession, StripeErrorResponse};

/// Error type for Stripe operations.
#[derive(Debug, thiserror::Error)]
pub enum StripeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Stripe API returned an error.
    #[error("Stripe API error: {error_type} - {message}")]
    Api {
        /// Error type.
        error_type: String,
        /// Error message.
        message: String,
        /// Error code.
        code: Option<String>,
    },
}

/// Parameters for creating a checkout session for one app purchase.
#[derive(Debug, Clone)]
pub struct CheckoutParams {
    /// The app being purchased (carried in session and product metadata).
    pub app_id: String,
    /// Product display name on the checkout page.
    pub app_name: String,
    /// Price in cents.
    pub price_cents: i64,
    /// The purchasing user (carried in metadata for reconciliation).
    pub user_id: String,
    /// Customer email pre-filled on the checkout page.
    pub user_email: String,
    /// URL to redirect on success.
    pub success_url: String,
    /// URL to redirect on cancel.
    pub cancel_url: String,
}

/// Stripe API client.
#[derive(Debug, Clone)]
pub struct StripeClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl StripeClient {
    /// Stripe API base URL.
    pub const DEFAULT_API_URL: &'static str = "https://api.stripe.com/v1";

    /// Create a new Stripe client.
    ///
    /// # Arguments
    ///
    /// * `api_url` - API base URL (use [`Self::DEFAULT_API_URL`] outside tests)
    /// * `api_key` - Stripe secret API key (`sk_test_...` or `sk_live_...`)
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Create a Checkout session for a one-time card payment.
    ///
    /// The session carries a single line item for the app and the
    /// `appId`/`userId` pair in both session and product metadata so the
    /// purchase can be reconciled from the session alone. No idempotency
    /// key is attached: two identical calls create two distinct sessions.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or Stripe rejects it.
    pub async fn create_checkout_session(
        &self,
        params: &CheckoutParams,
    ) -> Result<CheckoutSession, StripeError> {
        let form = vec![
            ("mode", "payment".to_string()),
            ("payment_method_types[0]", "card".to_string()),
            ("success_url", params.success_url.clone()),
            ("cancel_url", params.cancel_url.clone()),
            ("customer_email", params.user_email.clone()),
            ("line_items[0][price_data][currency]", "usd".to_string()),
            (
                "line_items[0][price_data][product_data][name]",
                params.app_name.clone(),
            ),
            (
                "line_items[0][price_data][product_data][metadata][appId]",
                params.app_id.clone(),
            ),
            (
                "line_items[0][price_data][product_data][metadata][userId]",
                params.user_id.clone(),
            ),
            (
                "line_items[0][price_data][unit_amount]",
                params.price_cents.to_string(),
            ),
            ("line_items[0][quantity]", "1".to_string()),
            ("metadata[appId]", params.app_id.clone()),
            ("metadata[userId]", params.user_id.clone()),
        ];

        tracing::debug!(
            app_id = %params.app_id,
            user_id = %params.user_id,
            price_cents = %params.price_cents,
            "Creating Stripe checkout session"
        );

        let response = self
            .client
            .post(format!("{}/checkout/sessions", self.api_url))
            .basic_auth(&self.api_key, Option::<&str>::None)
            .form(&form)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Retrieve a Checkout session by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or Stripe rejects it.
    pub async fn get_checkout_session(
        &self,
        session_id: &str,
    ) -> Result<CheckoutSession, StripeError> {
        let response = self
            .client
            .get(format!("{}/checkout/sessions/{}", self.api_url, session_id))
            .basic_auth(&self.api_key, Option::<&str>::None)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, StripeError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        // Try to parse error response
        let error_body: Result<StripeErrorResponse, _> = response.json().await;

        match error_body {
            Ok(stripe_error) => Err(StripeError::Api {
                error_type: stripe_error.error.error_type,
                message: stripe_error.error.message,
                code: stripe_error.error.code,
            }),
            Err(_) => Err(StripeError::Api {
                error_type: "unknown".to_string(),
                message: format!("HTTP {status}"),
                code: None,
            }),
        }
    }
}
