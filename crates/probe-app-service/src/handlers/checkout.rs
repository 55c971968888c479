//! Checkout session creation and payment verification.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use probe_app_core::{AppId, DomainError, Notification, UserId};
use probe_app_store::Store;

use crate::error::ApiError;
use crate::state::AppState;
use crate::stripe::CheckoutParams;

use super::with_conflict_retry;

/// Checkout creation request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutRequest {
    /// The app being purchased.
    pub app_id: String,
    /// Product display name on the checkout page.
    pub app_name: String,
    /// Price in cents.
    pub price: i64,
    /// The purchasing user.
    pub user_id: String,
    /// Customer email pre-filled on the checkout page.
    pub user_email: String,
}

/// Checkout creation response.
#[derive(Debug, Serialize)]
pub struct CreateCheckoutResponse {
    /// The provider-issued session ID.
    pub id: String,
}

/// Create a Stripe checkout session for a one-time app purchase.
///
/// Validation failures are rejected before any provider call. Provider
/// failures surface as 500 with an error payload; there is no retry and no
/// idempotency key, so a client-side retry creates a fresh session.
pub async fn create_checkout(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateCheckoutRequest>,
) -> Result<Json<CreateCheckoutResponse>, ApiError> {
    let app_id = AppId::new(body.app_id)?;
    let user_id = UserId::new(body.user_id)?;

    if body.app_name.is_empty() {
        return Err(ApiError::BadRequest("appName must not be empty".into()));
    }
    if body.user_email.is_empty() {
        return Err(ApiError::BadRequest("userEmail must not be empty".into()));
    }
    if body.price <= 0 {
        return Err(DomainError::InvalidPrice(body.price).into());
    }

    let stripe = state
        .stripe
        .as_ref()
        .ok_or_else(|| ApiError::Provider("Stripe not configured".into()))?;

    let params = CheckoutParams {
        app_id: app_id.to_string(),
        app_name: body.app_name,
        price_cents: body.price,
        user_id: user_id.to_string(),
        user_email: body.user_email,
        success_url: format!(
            "{}/checkout/success?session_id={{CHECKOUT_SESSION_ID}}",
            state.config.frontend_url
        ),
        cancel_url: format!("{}/browse/app?id={app_id}", state.config.frontend_url),
    };

    let session = stripe.create_checkout_session(&params).await.map_err(|e| {
        tracing::error!(app_id = %app_id, user_id = %user_id, error = %e, "Failed to create checkout session");
        ApiError::from(e)
    })?;

    tracing::info!(
        app_id = %app_id,
        user_id = %user_id,
        session_id = %session.id,
        "Stripe checkout session created"
    );

    Ok(Json(CreateCheckoutResponse { id: session.id }))
}

/// Payment verification request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentRequest {
    /// The checkout session to verify.
    pub session_id: String,
}

/// Payment verification response.
#[derive(Debug, Serialize)]
pub struct VerifyPaymentResponse {
    /// Whether the session's payment completed.
    pub success: bool,
}

/// Verify a checkout session and grant the entitlement.
///
/// Reports `success: true` iff Stripe says the session's payment status is
/// `paid`. The grant is derived from the verified session's own metadata,
/// never from the request body, so calling this endpoint with an unpaid or
/// foreign session grants nothing.
pub async fn verify_payment(
    State(state): State<Arc<AppState>>,
    Json(body): Json<VerifyPaymentRequest>,
) -> Result<Json<VerifyPaymentResponse>, ApiError> {
    if body.session_id.is_empty() {
        return Err(ApiError::BadRequest("sessionId must not be empty".into()));
    }

    let stripe = state
        .stripe
        .as_ref()
        .ok_or_else(|| ApiError::Provider("Stripe not configured".into()))?;

    let session = stripe
        .get_checkout_session(&body.session_id)
        .await
        .map_err(|e| {
            tracing::error!(session_id = %body.session_id, error = %e, "Failed to retrieve checkout session");
            ApiError::from(e)
        })?;

    if !session.is_paid() {
        tracing::warn!(
            session_id = %session.id,
            payment_status = ?session.payment_status,
            "Payment verification failed: session not paid"
        );
        return Ok(Json(VerifyPaymentResponse { success: false }));
    }

    let app_id = session
        .metadata_str("appId")
        .ok_or_else(|| ApiError::Provider("checkout session missing appId metadata".into()))
        .and_then(|raw| AppId::new(raw).map_err(ApiError::from))?;
    let user_id = session
        .metadata_str("userId")
        .ok_or_else(|| ApiError::Provider("checkout session missing userId metadata".into()))
        .and_then(|raw| UserId::new(raw).map_err(ApiError::from))?;

    // Best display name for the purchase notification.
    let app_name = state
        .store
        .get_app(&app_id)?
        .map_or_else(|| app_id.to_string(), |app| app.title);

    let notification = Notification::new(
        user_id.clone(),
        format!("Your purchase of \"{app_name}\" is complete."),
    );

    let profile = with_conflict_retry("user", || {
        state.store.grant_purchase(&user_id, &app_id, &notification)
    })
    .await?;

    tracing::info!(
        session_id = %session.id,
        app_id = %app_id,
        user_id = %user_id,
        purchased_apps = profile.purchased_apps.len(),
        "Payment verified and entitlement granted"
    );

    Ok(Json(VerifyPaymentResponse { success: true }))
}
