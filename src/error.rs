//! Typed errors for authentication and API operations.

use thiserror::Error;

/// Terminal, non-retried reasons a login attempt failed to produce a
/// token.
///
/// The first three variants are local validation failures detected
/// before any network call; `Exchange` covers the single token-exchange
/// attempt, uniformly for transport errors and non-success statuses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthFailure {
    /// The provider reported an authorization error via the redirect.
    #[error("authorization denied by Spotify: {0}")]
    AccessDenied(String),

    /// The callback request carried no `code` query parameter.
    #[error("no authorization code found in the callback request")]
    MissingCode,

    /// No code verifier was found in the session store; the flow was
    /// never started in this session or the attempt was abandoned.
    #[error("no code verifier found in the session store")]
    MissingVerifier,

    /// The token exchange request failed.
    #[error("token exchange failed: {0}")]
    Exchange(String),
}

/// Errors from resource queries against the Spotify Web API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No usable access token in the session store.
    #[error("no access token available, run `sporecent auth` first")]
    NotAuthenticated,

    /// The API rejected the token; the local credential has been
    /// cleared by the time this error is observed.
    #[error("authentication expired, run `sporecent auth` again")]
    Unauthorized,

    /// Any other non-success HTTP response, with the raw error body.
    #[error("Spotify API request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// Transport-level failure.
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
}
