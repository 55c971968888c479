//! Probe-App client SDK.
//!
//! This crate provides:
//!
//! - [`ProbeAppClient`] - typed wrappers over the marketplace JSON API
//! - [`PurchaseFlow`] - the client-side purchase state machine
//!   (confirmation, checkout redirection, post-payment verification)
//!
//! # Example
//!
//! ```no_run
//! use probe_app_client::{ProbeAppClient, PurchaseApp, PurchaseFlow, UserSession};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ProbeAppClient::new("https://api.probe-app.example");
//!
//! let app = client.get_app("sudoku-pro").await?;
//! let session = UserSession::new("user-1", "carol@example.com");
//!
//! let mut flow = PurchaseFlow::new(
//!     client.clone(),
//!     PurchaseApp::from(&app),
//!     Some(session),
//! );
//!
//! flow.begin()?;
//! let checkout_session_id = flow.confirm().await?;
//! // ... redirect the user to Stripe with `checkout_session_id` ...
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod client;
pub mod error;
pub mod flow;
pub mod types;

pub use client::{ClientOptions, ProbeAppClient};
pub use error::{ClientError, FlowError};
pub use flow::{FlowState, PurchaseAction, PurchaseApp, PurchaseFlow, UserSession};
pub use types::*;
