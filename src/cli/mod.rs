//! # CLI Module
//!
//! User-facing command implementations. Each command wires the session
//! store and token manager together, delegates to the `spotify` layer,
//! and decides how outcomes are presented. Success and failure
//! reporting lives here, not in the core flow.
//!
//! ## Commands
//!
//! - [`auth`] - OAuth 2.0 PKCE login flow
//! - [`logout`] - Clear the stored credential; idempotent
//! - [`status`] - Authentication state and token expiry
//! - [`profile`] - The authenticated user's profile
//! - [`recent`] - Recently played tracks, as a table or JSON

mod auth;
mod profile;
mod recent;
mod status;

pub use auth::auth;
pub use auth::logout;
pub use profile::profile;
pub use recent::recent;
pub use status::status;
