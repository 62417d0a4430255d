use std::collections::HashMap;

use axum::{Json, Router, http::StatusCode, response::IntoResponse, routing::post};
use chrono::Utc;
use serde_json::json;
use sporecent::{
    error::AuthFailure,
    management::{MemoryStore, SessionStore, keys},
    spotify::auth::complete_login,
};

async fn token_ok() -> impl IntoResponse {
    Json(json!({
        "access_token": "at_test",
        "token_type": "Bearer",
        "expires_in": 3600,
        "scope": "user-read-private user-read-recently-played"
    }))
}

async fn token_rejected() -> impl IntoResponse {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": "invalid_grant", "error_description": "Invalid authorization code"})),
    )
}

// Both exchange outcomes run in one test body: the token endpoint URL
// is process-global environment, so the two scenarios must not race.
#[tokio::test]
async fn test_exchange_outcomes_against_token_endpoint() {
    let app = Router::new()
        .route("/ok/api/token", post(token_ok))
        .route("/rejected/api/token", post(token_rejected));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    unsafe {
        std::env::set_var("SPOTIFY_API_AUTH_CLIENT_ID", "test-client-id");
        std::env::set_var(
            "SPOTIFY_API_REDIRECT_URI",
            "http://127.0.0.1:9001/callback",
        );
    }

    let mut params = HashMap::new();
    params.insert("code".to_string(), "auth-code".to_string());

    // A rejected exchange reports failure and leaves the verifier in
    // place; only a successful exchange consumes it.
    unsafe {
        std::env::set_var(
            "SPOTIFY_API_TOKEN_URL",
            format!("http://{addr}/rejected/api/token"),
        );
    }
    let store = MemoryStore::new();
    store.set(keys::CODE_VERIFIER, "verifier-kept");

    let rejected = complete_login(&params, &store).await;
    assert!(matches!(rejected, Err(AuthFailure::Exchange(_))));
    assert_eq!(
        store.get(keys::CODE_VERIFIER).as_deref(),
        Some("verifier-kept")
    );
    assert!(store.get(keys::ACCESS_TOKEN).is_none());
    assert!(store.get(keys::TOKEN_EXPIRY).is_none());

    // A successful exchange stores token and absolute expiry and
    // deletes the verifier.
    unsafe {
        std::env::set_var("SPOTIFY_API_TOKEN_URL", format!("http://{addr}/ok/api/token"));
    }
    let store = MemoryStore::new();
    store.set(keys::CODE_VERIFIER, "verifier-consumed");

    let before = Utc::now().timestamp_millis();
    let token = complete_login(&params, &store).await.unwrap();

    assert_eq!(token.access_token, "at_test");
    assert!(token.expires_at >= before + 3600 * 1000);
    assert_eq!(store.get(keys::ACCESS_TOKEN).as_deref(), Some("at_test"));
    assert_eq!(
        store.get(keys::TOKEN_EXPIRY).as_deref(),
        Some(token.expires_at.to_string().as_str())
    );
    assert!(store.get(keys::CODE_VERIFIER).is_none());
}
