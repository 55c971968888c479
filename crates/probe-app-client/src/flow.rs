//! The purchase-flow state machine.
//!
//! One [`PurchaseFlow`] instance drives one checkout attempt:
//!
//! ```text
//! Idle -> AwaitingConfirmation -> CreatingSession -> RedirectingToPayment
//!                                       |                    |
//!                                       v                    v
//!                                    Failed          VerifyingPayment
//!                                                        |       |
//!                                                        v       v
//!                                                    Complete  Failed
//! ```
//!
//! `Complete` and `Failed` are sealed; a fresh purchase starts a new flow.
//! Free apps short-circuit to a direct download and never engage the
//! payment provider, and an unauthenticated user is bounced back to `Idle`
//! before any server call is made.

use crate::client::ProbeAppClient;
use crate::error::FlowError;
use crate::types::{AppDetails, CreateCheckoutRequest};

/// Action label before a purchase starts, for paid apps.
pub const BUY_LABEL: &str = "Buy Now";

/// Action label before a purchase starts, for free apps.
pub const DOWNLOAD_LABEL: &str = "Download";

/// Action label while the checkout session is being created.
pub const PROCESSING_LABEL: &str = "Processing...";

/// States of one checkout attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    /// No purchase in progress.
    Idle,
    /// The confirmation dialog is up.
    AwaitingConfirmation,
    /// The checkout session is being created.
    CreatingSession,
    /// The session exists; hand its id to the provider's redirect.
    RedirectingToPayment,
    /// The user returned; the session is being verified.
    VerifyingPayment,
    /// Payment verified and entitlement granted. Sealed.
    Complete,
    /// The attempt failed. Sealed.
    Failed,
}

impl FlowState {
    /// Whether the flow has ended for this attempt.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Failed)
    }
}

/// The signed-in user, as the identity provider reports it.
#[derive(Debug, Clone)]
pub struct UserSession {
    /// User ID.
    pub user_id: String,
    /// Account email.
    pub email: String,
    /// Account display name, if the provider has one.
    pub display_name: Option<String>,
}

impl UserSession {
    /// Create a session without a display name.
    #[must_use]
    pub fn new(user_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
            display_name: None,
        }
    }

    /// Name to show next to a submitted review: the display name when the
    /// provider has one, else the email's local part.
    #[must_use]
    pub fn review_name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| self.email.split('@').next().unwrap_or(&self.email))
    }
}

/// The app fields the purchase flow needs.
#[derive(Debug, Clone)]
pub struct PurchaseApp {
    /// App ID.
    pub id: String,
    /// Product display name on the checkout page.
    pub name: String,
    /// Price in cents.
    pub price_cents: i64,
    /// Whether the app is sold or freely downloadable.
    pub is_paid: bool,
    /// Direct download URL for free apps.
    pub download_url: Option<String>,
}

impl From<&AppDetails> for PurchaseApp {
    fn from(app: &AppDetails) -> Self {
        Self {
            id: app.id.clone(),
            name: app.title.clone(),
            price_cents: app.price,
            is_paid: app.is_paid,
            download_url: app.download_url.clone(),
        }
    }
}

/// What the UI should do after the user activates the purchase action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseAction {
    /// Free app: navigate straight to the download, no purchase flow.
    Download {
        /// The app's download URL, when the record carries one.
        url: Option<String>,
    },
    /// Paid app: show the confirmation dialog.
    Confirm {
        /// The signed-in email shown in the dialog.
        email: String,
        /// The price shown in the dialog, in cents.
        price_cents: i64,
    },
}

/// One checkout attempt.
pub struct PurchaseFlow {
    client: ProbeAppClient,
    app: PurchaseApp,
    session: Option<UserSession>,
    state: FlowState,
    button_label: &'static str,
    checkout_session_id: Option<String>,
}

impl PurchaseFlow {
    /// Create a new flow in `Idle`.
    ///
    /// `session` is the signed-in user, or `None` when nobody is signed in.
    #[must_use]
    pub fn new(client: ProbeAppClient, app: PurchaseApp, session: Option<UserSession>) -> Self {
        let button_label = if app.is_paid { BUY_LABEL } else { DOWNLOAD_LABEL };
        Self {
            client,
            app,
            session,
            state: FlowState::Idle,
            button_label,
            checkout_session_id: None,
        }
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> FlowState {
        self.state
    }

    /// The current action-button label.
    #[must_use]
    pub const fn button_label(&self) -> &'static str {
        self.button_label
    }

    /// The checkout session id, once one has been created.
    #[must_use]
    pub fn checkout_session_id(&self) -> Option<&str> {
        self.checkout_session_id.as_deref()
    }

    /// The label the button returns to when an attempt fails.
    const fn pre_purchase_label(&self) -> &'static str {
        if self.app.is_paid {
            BUY_LABEL
        } else {
            DOWNLOAD_LABEL
        }
    }

    /// User activates the purchase action.
    ///
    /// Free apps short-circuit to [`PurchaseAction::Download`] and the flow
    /// stays `Idle`. Without a signed-in session the flow also stays `Idle`
    /// and no server call is made.
    ///
    /// # Errors
    ///
    /// [`FlowError::Unauthenticated`] without a session;
    /// [`FlowError::InvalidTransition`] outside `Idle`.
    pub fn begin(&mut self) -> Result<PurchaseAction, FlowError> {
        if self.state != FlowState::Idle {
            return Err(self.invalid("begin"));
        }

        if !self.app.is_paid {
            return Ok(PurchaseAction::Download {
                url: self.app.download_url.clone(),
            });
        }

        let Some(session) = &self.session else {
            tracing::debug!(app_id = %self.app.id, "Purchase attempted while signed out");
            return Err(FlowError::Unauthenticated);
        };

        self.state = FlowState::AwaitingConfirmation;
        Ok(PurchaseAction::Confirm {
            email: session.email.clone(),
            price_cents: self.app.price_cents,
        })
    }

    /// User declines the confirmation dialog.
    ///
    /// # Errors
    ///
    /// [`FlowError::InvalidTransition`] outside `AwaitingConfirmation`.
    pub fn decline(&mut self) -> Result<(), FlowError> {
        if self.state != FlowState::AwaitingConfirmation {
            return Err(self.invalid("decline"));
        }
        self.state = FlowState::Idle;
        Ok(())
    }

    /// User confirms the purchase: create the checkout session.
    ///
    /// On success the flow moves to `RedirectingToPayment` and the returned
    /// session id should be handed to the provider's redirect mechanism. On
    /// any error the flow ends `Failed`, the button label resets, and there
    /// is no automatic retry.
    ///
    /// # Errors
    ///
    /// [`FlowError::InvalidTransition`] outside `AwaitingConfirmation`;
    /// [`FlowError::Checkout`] when session creation fails.
    pub async fn confirm(&mut self) -> Result<String, FlowError> {
        if self.state != FlowState::AwaitingConfirmation {
            return Err(self.invalid("confirm"));
        }
        // begin() only reaches AwaitingConfirmation with a session present.
        let Some(session) = &self.session else {
            return Err(FlowError::Unauthenticated);
        };

        self.state = FlowState::CreatingSession;
        self.button_label = PROCESSING_LABEL;

        let request = CreateCheckoutRequest {
            app_id: self.app.id.clone(),
            app_name: self.app.name.clone(),
            price: self.app.price_cents,
            user_id: session.user_id.clone(),
            user_email: session.email.clone(),
        };

        match self.client.create_checkout(&request).await {
            Ok(response) => {
                tracing::info!(
                    app_id = %self.app.id,
                    session_id = %response.id,
                    "Checkout session created, redirecting to payment"
                );
                self.state = FlowState::RedirectingToPayment;
                self.checkout_session_id = Some(response.id.clone());
                Ok(response.id)
            }
            Err(e) => {
                tracing::error!(app_id = %self.app.id, error = %e, "Checkout session creation failed");
                self.state = FlowState::Failed;
                self.button_label = self.pre_purchase_label();
                Err(FlowError::Checkout(e))
            }
        }
    }

    /// User returned from payment with a session id: verify it.
    ///
    /// Accepted from `RedirectingToPayment` (same flow instance survived
    /// the redirect) or from `Idle` (a fresh instance picked up the return
    /// URL). On `success: true` the flow ends `Complete`; on
    /// `success: false` it ends `Failed` with the support prompt and no
    /// entitlement.
    ///
    /// # Errors
    ///
    /// [`FlowError::VerificationFailed`] on an unpaid session;
    /// [`FlowError::Verification`] when the call itself fails;
    /// [`FlowError::InvalidTransition`] from any other state.
    pub async fn complete_payment(&mut self, session_id: &str) -> Result<(), FlowError> {
        if !matches!(
            self.state,
            FlowState::Idle | FlowState::RedirectingToPayment
        ) {
            return Err(self.invalid("complete payment"));
        }

        self.state = FlowState::VerifyingPayment;

        match self.client.verify_payment(session_id).await {
            Ok(response) if response.success => {
                tracing::info!(app_id = %self.app.id, session_id, "Payment verified");
                self.state = FlowState::Complete;
                Ok(())
            }
            Ok(_) => {
                tracing::warn!(app_id = %self.app.id, session_id, "Payment verification reported failure");
                self.state = FlowState::Failed;
                Err(FlowError::VerificationFailed)
            }
            Err(e) => {
                tracing::error!(app_id = %self.app.id, session_id, error = %e, "Payment verification call failed");
                self.state = FlowState::Failed;
                Err(FlowError::Verification(e))
            }
        }
    }

    fn invalid(&self, action: &'static str) -> FlowError {
        FlowError::InvalidTransition {
            state: self.state,
            action,
        }
    }
}
