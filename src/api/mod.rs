//! # API Module
//!
//! HTTP endpoints for the local callback server that backs the OAuth
//! authentication flow.
//!
//! ## Endpoints
//!
//! - [`callback`] - Redirect target of the Spotify authorization
//!   server. Completes the PKCE flow by handing the callback query
//!   parameters to the exchanger and recording the typed outcome in the
//!   shared attempt state.
//! - [`health`] - Health check returning application status and
//!   version.
//!
//! Both endpoints are plain async functions wired into an Axum router
//! by [`crate::server`].

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
