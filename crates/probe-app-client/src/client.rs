//! Probe-App HTTP client implementation.

use reqwest::Client;
use std::time::Duration;

use crate::error::ClientError;
use crate::types::{
    ApiErrorResponse, AppDetails, CreateCheckoutRequest, CreateCheckoutResponse,
    ListNotificationsResponse, ListReviewsResponse, SubmitReviewRequest, SubmitReviewResponse,
    UserProfileResponse, VerifyPaymentResponse,
};

/// Probe-App API client.
///
/// Provides typed wrappers over the marketplace JSON API. The purchase flow
/// in [`crate::flow`] drives the checkout-related methods; everything else
/// backs the app-detail page.
#[derive(Debug, Clone)]
pub struct ProbeAppClient {
    client: Client,
    base_url: String,
}

impl ProbeAppClient {
    /// Create a new Probe-App client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the marketplace API
    ///   (e.g., `"https://api.probe-app.example"`)
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_options(base_url, ClientOptions::default())
    }

    /// Create a new Probe-App client with custom options.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built (should not happen with
    /// default settings).
    #[must_use]
    pub fn with_options(base_url: impl Into<String>, options: ClientOptions) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Fetch an app record by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] if the app doesn't exist.
    pub async fn get_app(&self, app_id: &str) -> Result<AppDetails, ClientError> {
        let url = format!("{}/api/apps/{app_id}", self.base_url);
        let response = self.client.get(&url).send().await?;
        self.handle_response(response).await
    }

    /// List an app's reviews, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn list_reviews(
        &self,
        app_id: &str,
        limit: Option<usize>,
    ) -> Result<ListReviewsResponse, ClientError> {
        let url = format!("{}/api/apps/{app_id}/reviews", self.base_url);
        let mut request = self.client.get(&url);
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }
        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Submit a review for an app.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] for an unknown app,
    /// [`ClientError::Conflict`] when concurrent submissions exhausted the
    /// server's retries (safe to resubmit), or [`ClientError::Api`] for
    /// validation failures.
    pub async fn submit_review(
        &self,
        app_id: &str,
        review: &SubmitReviewRequest,
    ) -> Result<SubmitReviewResponse, ClientError> {
        let url = format!("{}/api/apps/{app_id}/reviews", self.base_url);
        let response = self.client.post(&url).json(review).send().await?;
        self.handle_response(response).await
    }

    /// Create a checkout session for a one-time app purchase.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the provider call fails.
    pub async fn create_checkout(
        &self,
        request: &CreateCheckoutRequest,
    ) -> Result<CreateCheckoutResponse, ClientError> {
        let url = format!("{}/api/create-checkout", self.base_url);
        let response = self.client.post(&url).json(request).send().await?;
        self.handle_response(response).await
    }

    /// Verify a checkout session after the user returns from payment.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; an unpaid session is a
    /// successful response with `success == false`.
    pub async fn verify_payment(
        &self,
        session_id: &str,
    ) -> Result<VerifyPaymentResponse, ClientError> {
        let url = format!("{}/api/verify-payment", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "sessionId": session_id }))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Fetch a user profile (premium flag, purchased set).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] if the profile doesn't exist yet.
    pub async fn get_user(&self, user_id: &str) -> Result<UserProfileResponse, ClientError> {
        let url = format!("{}/api/users/{user_id}", self.base_url);
        let response = self.client.get(&url).send().await?;
        self.handle_response(response).await
    }

    /// List a user's notifications, newest first, with the unread count.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn list_notifications(
        &self,
        user_id: &str,
        limit: Option<usize>,
    ) -> Result<ListNotificationsResponse, ClientError> {
        let url = format!("{}/api/notifications", self.base_url);
        let mut request = self.client.get(&url).query(&[("userId", user_id)]);
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }
        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        // Try to parse the flat error payload
        let message = response
            .json::<ApiErrorResponse>()
            .await
            .map_or_else(|_| format!("HTTP {status}"), |body| body.error);

        match status {
            reqwest::StatusCode::NOT_FOUND => Err(ClientError::NotFound(message)),
            reqwest::StatusCode::CONFLICT => Err(ClientError::Conflict(message)),
            _ => Err(ClientError::Api {
                message,
                status: status.as_u16(),
            }),
        }
    }
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let client = ProbeAppClient::new("http://localhost:8080");
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn client_trims_trailing_slash() {
        let client = ProbeAppClient::new("http://localhost:8080/");
        assert_eq!(client.base_url, "http://localhost:8080");
    }
}
