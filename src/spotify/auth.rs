use std::{collections::HashMap, sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::Client;

use crate::{
    config,
    error::AuthFailure,
    management::{SessionStore, keys},
    server::start_api_server,
    success,
    types::{AuthContext, AuthOutcome, Token, TokenResponse},
    utils, warning,
};

/// Verifier length used for every login attempt. RFC 7636 permits
/// 43-128 characters.
pub const CODE_VERIFIER_LENGTH: usize = 64;

/// Runs the complete OAuth 2.0 PKCE authentication flow with Spotify.
///
/// 1. **PKCE Setup**: generates a cryptographically secure code verifier
///    and derives the corresponding SHA-256 challenge
/// 2. **Verifier Storage**: persists the verifier to the session store,
///    since the authorization round-trip happens outside this process
/// 3. **Server Start**: launches the local HTTP server that receives
///    the OAuth callback
/// 4. **Browser Launch**: opens the authorization URL; on failure the
///    URL is printed for manual navigation
/// 5. **Outcome Wait**: polls the shared state until the callback
///    handler records success or failure, or the wait times out
///
/// The callback handler performs the actual code-for-token exchange and
/// stores the resulting credential; this function only reports the
/// outcome. On timeout the process exits, which drops the server task
/// and any exchange still in flight, so a late response can never write
/// a credential afterwards.
///
/// # Arguments
///
/// * `ctx` - Shared store and attempt state, also handed to the
///   callback server
pub async fn auth(ctx: Arc<AuthContext>) {
    // generate PKCE verifier and challenge
    let code_verifier = utils::generate_code_verifier(CODE_VERIFIER_LENGTH);
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    // The verifier must outlive the browser round-trip; persist it
    // before navigating away.
    ctx.store.set(keys::CODE_VERIFIER, &code_verifier);

    let auth_url = build_authorization_url(&code_challenge);

    // start API server
    let server_ctx = Arc::clone(&ctx);
    tokio::spawn(async move {
        start_api_server(server_ctx).await;
    });

    // Open the authorization URL in the default browser
    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    // wait for callback to be hit
    match wait_for_outcome(ctx).await {
        Some(AuthOutcome::Success(_)) => success!("Authentication successful!"),
        Some(AuthOutcome::Failure(failure)) => {
            crate::error!("Authentication failed: {}", failure)
        }
        None => crate::error!("Authentication timed out."),
    }
}

/// Builds the authorization URL carrying the code challenge.
///
/// Query keys are fixed by the provider: client id, `response_type=code`,
/// the redirect target, the `S256` challenge method, the challenge
/// itself, and the space-joined scope list.
pub fn build_authorization_url(code_challenge: &str) -> String {
    format!(
        "{spotify_auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&code_challenge_method=S256&code_challenge={code_challenge}&scope={scope}",
        spotify_auth_url = &config::spotify_apiauth_url(),
        client_id = &config::spotify_client_id(),
        redirect_uri = urlencoded(&config::spotify_redirect_uri()),
        code_challenge = code_challenge,
        scope = urlencoded(&config::spotify_scope())
    )
}

/// Minimal URL encoding for parameter values. Only encodes characters
/// that would break query parameter parsing.
fn urlencoded(s: &str) -> String {
    s.replace(':', "%3A").replace('/', "%2F").replace(' ', "%20")
}

/// Validates the callback query parameters without touching the
/// network.
///
/// A provider-reported `error`, or a missing `code`, terminates the
/// attempt right here.
pub fn validate_callback(params: &HashMap<String, String>) -> Result<String, AuthFailure> {
    if let Some(reason) = params.get("error") {
        return Err(AuthFailure::AccessDenied(reason.clone()));
    }
    match params.get("code") {
        Some(code) => Ok(code.clone()),
        None => Err(AuthFailure::MissingCode),
    }
}

/// Completes a login attempt from the callback parameters.
///
/// Fail-fast validation first: provider error, missing code, and
/// missing verifier all return before any network call. Then the single
/// exchange attempt. Only on success are the token and expiry written
/// and the verifier deleted; a failed exchange leaves the verifier in
/// place, so deletion marks exactly the consumed attempts.
pub async fn complete_login(
    params: &HashMap<String, String>,
    store: &dyn SessionStore,
) -> Result<Token, AuthFailure> {
    let code = validate_callback(params)?;

    let verifier = store
        .get(keys::CODE_VERIFIER)
        .ok_or(AuthFailure::MissingVerifier)?;

    let token = exchange_code_pkce(&code, &verifier).await?;

    store.set(keys::ACCESS_TOKEN, &token.access_token);
    store.set(keys::TOKEN_EXPIRY, &token.expires_at.to_string());
    // single-use: a consumed verifier must not be replayable
    store.remove(keys::CODE_VERIFIER);

    Ok(token)
}

/// Exchanges an authorization code for an access token using PKCE.
///
/// One POST to the token endpoint, form-encoded, no retry. The code
/// verifier proves that the client completing the flow is the one that
/// initiated it. The redirect URI must match the authorization-time
/// value exactly or the provider rejects the exchange.
///
/// On success the provider-declared lifetime in seconds is converted to
/// an absolute expiry instant.
pub async fn exchange_code_pkce(code: &str, verifier: &str) -> Result<Token, AuthFailure> {
    let client_id = config::spotify_client_id();
    let redirect_uri = config::spotify_redirect_uri();

    let client = Client::new();
    let response = client
        .post(config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", redirect_uri.as_str()),
        ])
        .send()
        .await
        .map_err(|e| AuthFailure::Exchange(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("<no body>"));
        return Err(AuthFailure::Exchange(format!(
            "token endpoint returned {status}: {body}"
        )));
    }

    let token: TokenResponse = response
        .json()
        .await
        .map_err(|e| AuthFailure::Exchange(format!("invalid token response: {e}")))?;

    Ok(Token {
        access_token: token.access_token,
        expires_at: Utc::now().timestamp_millis() + token.expires_in as i64 * 1000,
    })
}

/// Waits for the callback handler to record an outcome.
///
/// Polls the shared state once per second with a bounded total wait,
/// concurrently with the HTTP server task that populates it. Returns
/// `None` when the wait expires without a callback.
async fn wait_for_outcome(ctx: Arc<AuthContext>) -> Option<AuthOutcome> {
    use std::time::Instant;

    let max_wait = Duration::from_secs(120);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let state = ctx.state.lock().await;
        if let Some(outcome) = &state.outcome {
            return Some(outcome.clone());
        }
        drop(state);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}
