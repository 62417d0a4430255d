use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

/// Generates a PKCE code verifier of `length` characters.
///
/// Characters are drawn uniformly from `A-Z a-z 0-9` using the thread
/// CSPRNG. Predictable output here would let an attacker forge the
/// challenge and hijack an authorization code, so a general-purpose
/// PRNG is not an option.
pub fn generate_code_verifier(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Derives the S256 code challenge from a verifier.
///
/// `challenge = BASE64URL(SHA256(verifier))`, with the URL-safe alphabet
/// and no padding. The provider rejects the exchange if the encoding
/// deviates in any way.
pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Clamps a recently-played page size into the API's accepted 1..=50.
pub fn clamp_history_limit(limit: u32) -> u32 {
    limit.clamp(1, 50)
}

/// Parses a `played_at` timestamp, falling back to the current instant
/// when the value is not valid RFC 3339.
pub fn parse_played_at(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

/// Formats a track duration in milliseconds as `m:ss`.
pub fn format_duration_ms(duration_ms: u64) -> String {
    let total_secs = duration_ms / 1000;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}
