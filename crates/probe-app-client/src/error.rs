//! Client and purchase-flow error types.

use crate::flow::FlowState;

/// Errors that can occur when using the Probe-App client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A concurrent update won the race; safe to resubmit.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Server returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// Error message from the `{"error": ...}` payload.
        message: String,
        /// HTTP status code.
        status: u16,
    },
}

/// Errors that can occur while driving the purchase flow.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    /// Purchase attempted without a signed-in session. No server call
    /// was made; the message is the user-facing prompt.
    #[error("Please sign in to purchase this app.")]
    Unauthenticated,

    /// The requested action is not valid in the current state. Terminal
    /// states are sealed: a fresh purchase starts a new flow.
    #[error("cannot {action} while the flow is {state:?}")]
    InvalidTransition {
        /// The state the flow was in.
        state: FlowState,
        /// The attempted action.
        action: &'static str,
    },

    /// Checkout session creation failed; the flow ends `Failed` with no
    /// automatic retry.
    #[error("checkout failed: {0}")]
    Checkout(#[source] ClientError),

    /// The provider reported the session unpaid. The message is the
    /// user-facing support prompt; no entitlement was granted.
    #[error("Payment verification failed. Please contact support.")]
    VerificationFailed,

    /// The verification call itself failed.
    #[error("payment verification error: {0}")]
    Verification(#[source] ClientError),
}
