//! Stripe integration for one-time app purchases.
//!
//! Stripe handles:
//! - Checkout session creation for app purchases
//! - Session retrieval for payment verification

pub mod client;
pub mod types;

pub use client::{CheckoutParams, StripeClient, StripeError};
pub use types::*;
