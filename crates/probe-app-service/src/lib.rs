//! Probe-App Marketplace HTTP Service.
//!
//! This crate provides the HTTP API for the Probe-App marketplace,
//! including:
//!
//! - Server-rendered app-detail pages with social-preview metadata
//! - Checkout session creation and payment verification (Stripe)
//! - Review submission with the atomic rating aggregate
//! - App, user-profile, and notification lookups
//!
//! # Identity
//!
//! The service does not verify caller identity; user identifiers arrive as
//! request data from the external identity provider and are treated as
//! opaque. The one write that must not be forgeable, the entitlement grant,
//! is derived from the payment provider's own session metadata rather than
//! from the request body.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Some handlers are async only for Axum's sake

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod stripe;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
pub use stripe::{StripeClient, StripeError};
