//! Core types for the Probe-App marketplace.
//!
//! This crate provides the foundational types used throughout the Probe-App
//! services:
//!
//! - **Identifiers**: `AppId`, `UserId`, `ReviewId`, `NotificationId`
//! - **Catalog**: `AppRecord` with the running rating aggregate
//! - **Reviews**: `Review`, `Rating`
//! - **Users**: `UserProfile` with the premium entitlement
//! - **Notifications**: `Notification`
//!
//! # Rating aggregate
//!
//! `average_rating` and `rating_count` must always describe exactly the set
//! of reviews recorded for an app. They are only updated together, through
//! [`AppRecord::apply_rating`], and persisted in the same transaction as the
//! review that produced the rating.
//!
//! # Money
//!
//! Prices are stored as `i64` integer cents (1 cent = smallest unit of USD)
//! to avoid floating point precision issues.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod app;
pub mod error;
pub mod ids;
pub mod notification;
pub mod review;
pub mod user;

pub use app::AppRecord;
pub use error::{DomainError, Result};
pub use ids::{AppId, IdError, NotificationId, ReviewId, UserId};
pub use notification::Notification;
pub use review::{Rating, Review};
pub use user::UserProfile;
