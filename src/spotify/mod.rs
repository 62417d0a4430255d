//! # Spotify Integration Module
//!
//! Interface to the Spotify Web API: the OAuth 2.0 PKCE authentication
//! flow and the read-only resource queries built on top of it. This is
//! the only layer that talks HTTP; the CLI layer above it decides how
//! results and failures are presented.
//!
//! ## Core Modules
//!
//! - [`auth`] - OAuth 2.0 PKCE flow: verifier/challenge setup, the
//!   authorization redirect, and the code-for-token exchange via the
//!   local callback server.
//! - [`profile`] - The authenticated user's profile (`GET /me`).
//! - [`history`] - Recently played tracks
//!   (`GET /me/player/recently-played`).
//!
//! ## Authentication Strategy
//!
//! The PKCE flow binds the authorization code to a secret only this
//! client knows, so no client secret is stored or transmitted:
//!
//! 1. **Code Verifier Generation**: cryptographically random verifier
//! 2. **Challenge Creation**: SHA-256 challenge derived from the verifier
//! 3. **Authorization Request**: user grants access in the browser
//! 4. **Local Callback**: authorization code arrives at the local server
//! 5. **Token Exchange**: code + verifier exchanged for an access token
//! 6. **Session Storage**: token and expiry persisted for later queries
//!
//! ## Error Handling
//!
//! Login failures are typed ([`crate::error::AuthFailure`]) and carried
//! back to the caller; nothing in the flow is retried. Resource queries
//! return [`crate::error::ApiError`], and a `401` from any query clears
//! the local credential before the error propagates.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::{config, error::ApiError, management::TokenManager};

pub mod auth;
pub mod history;
pub mod profile;

/// Issues an authenticated GET against the Spotify Web API and decodes
/// the JSON response.
///
/// An absent credential fails fast without a network call. A `401`
/// response is the contract signal that the token is no longer valid:
/// the local credential is cleared before the error is returned. All
/// other non-success statuses are reported with their raw error body.
pub(crate) async fn api_get<T: DeserializeOwned>(
    manager: &TokenManager,
    path_and_query: &str,
) -> Result<T, ApiError> {
    let Some(token) = manager.get_access_token() else {
        return Err(ApiError::NotAuthenticated);
    };

    let api_url = format!("{}{}", config::spotify_apiurl(), path_and_query);

    let client = Client::new();
    let response = client.get(&api_url).bearer_auth(token).send().await?;

    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        manager.logout();
        return Err(ApiError::Unauthorized);
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }

    Ok(response.json::<T>().await?)
}
