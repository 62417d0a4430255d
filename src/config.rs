//! Configuration management for the listening history CLI.
//!
//! Configuration values come from environment variables, optionally
//! loaded from a `.env` file in the platform-specific local data
//! directory (`sporecent/.env`). Endpoint URLs and the OAuth scope carry
//! defaults targeting the public Spotify API, so only the client id and
//! the callback server settings are required.

use dotenv;
use std::{env, path::PathBuf};

const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_SCOPE: &str = "user-read-private user-read-recently-played";

/// Loads environment variables from a `.env` file in the local data
/// directory.
///
/// Creates the directory structure if it doesn't exist and loads the
/// file at `sporecent/.env` when present. A missing file is not an
/// error; variables may also come from the process environment.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/sporecent/.env`
/// - macOS: `~/Library/Application Support/sporecent/.env`
/// - Windows: `%LOCALAPPDATA%/sporecent/.env`
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the
/// `.env` file exists but cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("sporecent/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Returns the server address for the local OAuth callback server.
///
/// # Panics
///
/// Panics if the `SERVER_ADDRESS` environment variable is not set.
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").expect("SERVER_ADDRESS must be set")
}

/// Returns the Spotify API client ID for authentication.
///
/// The client ID is obtained when registering the application on the
/// Spotify developer dashboard. The PKCE flow needs no client secret.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_CLIENT_ID` environment variable is
/// not set.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_API_AUTH_CLIENT_ID").expect("SPOTIFY_API_AUTH_CLIENT_ID must be set")
}

/// Returns the OAuth redirect URI.
///
/// Must exactly match the redirect URI registered in the Spotify
/// application settings, at authorization time and again at token
/// exchange time.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_REDIRECT_URI` environment variable is not
/// set.
pub fn spotify_redirect_uri() -> String {
    env::var("SPOTIFY_API_REDIRECT_URI").expect("SPOTIFY_API_REDIRECT_URI must be set")
}

/// Returns the space-separated OAuth scope list.
///
/// Defaults to the two read-only scopes this tool needs: profile access
/// and recently played history.
pub fn spotify_scope() -> String {
    env::var("SPOTIFY_API_AUTH_SCOPE").unwrap_or_else(|_| DEFAULT_SCOPE.to_string())
}

/// Returns the Spotify OAuth authorization URL.
pub fn spotify_apiauth_url() -> String {
    env::var("SPOTIFY_API_AUTH_URL").unwrap_or_else(|_| DEFAULT_AUTH_URL.to_string())
}

/// Returns the Spotify OAuth token exchange URL.
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL").unwrap_or_else(|_| DEFAULT_TOKEN_URL.to_string())
}

/// Returns the Spotify Web API base URL.
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}
