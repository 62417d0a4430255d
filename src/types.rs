use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;
use tokio::sync::Mutex;

use crate::{error::AuthFailure, management::SessionStore, utils};

/// An access credential: opaque bearer string plus its absolute expiry
/// as epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub expires_at: i64,
}

/// Raw success body of the token endpoint. Extra fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Seconds until expiry, relative to the response time.
    pub expires_in: u64,
}

/// Outcome of one login attempt, recorded by the callback handler and
/// read by the waiting auth command.
#[derive(Debug, Clone)]
pub enum AuthOutcome {
    Success(Token),
    Failure(AuthFailure),
}

/// Mutable state of the login attempt in flight.
///
/// `handled` is the single-use gate: the callback route flips it on
/// first entry so a re-delivered callback cannot consume the
/// authorization code a second time.
#[derive(Debug, Default)]
pub struct AuthState {
    pub handled: bool,
    pub outcome: Option<AuthOutcome>,
}

/// Shared context between the auth command and the callback server.
pub struct AuthContext {
    pub store: Arc<dyn SessionStore>,
    pub state: Mutex<AuthState>,
}

impl AuthContext {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        AuthContext {
            store,
            state: Mutex::new(AuthState::default()),
        }
    }
}

// --- Raw Spotify Web API response shapes ---

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyUser {
    pub id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub country: Option<String>,
    pub followers: Option<Followers>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Followers {
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecentlyPlayedResponse {
    pub items: Vec<PlayHistoryItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayHistoryItem {
    pub track: SpotifyTrack,
    pub played_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyTrack {
    pub id: String,
    pub name: String,
    pub artists: Vec<TrackArtist>,
    pub album: TrackAlbum,
    pub duration_ms: u64,
    pub preview_url: Option<String>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackArtist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackAlbum {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub images: Vec<Image>,
}

// --- Normalized records exposed to callers ---

/// User profile reshaped from `GET /me` with defaults for fields the
/// API may omit.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: String,
    pub display_name: String,
    pub email: String,
    pub country: String,
    pub followers: u64,
    pub image_url: Option<String>,
    pub spotify_url: String,
    pub kind: String,
}

impl From<SpotifyUser> for UserProfile {
    fn from(user: SpotifyUser) -> Self {
        UserProfile {
            id: user.id,
            display_name: user
                .display_name
                .unwrap_or_else(|| "Unknown User".to_string()),
            email: user.email.unwrap_or_default(),
            country: user.country.unwrap_or_else(|| "Unknown".to_string()),
            followers: user.followers.and_then(|f| f.total).unwrap_or(0),
            image_url: user.images.into_iter().next().map(|i| i.url),
            spotify_url: user.external_urls.spotify.unwrap_or_default(),
            kind: user.kind.unwrap_or_else(|| "user".to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ArtistRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlbumRef {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artists: Vec<ArtistRef>,
    pub album: AlbumRef,
    pub duration_ms: u64,
    pub preview_url: Option<String>,
    pub spotify_url: String,
}

impl From<SpotifyTrack> for Track {
    fn from(track: SpotifyTrack) -> Self {
        Track {
            id: track.id,
            name: track.name,
            artists: track
                .artists
                .into_iter()
                .map(|a| ArtistRef {
                    id: a.id,
                    name: a.name,
                })
                .collect(),
            album: AlbumRef {
                id: track.album.id,
                name: track.album.name,
                image_url: track.album.images.into_iter().next().map(|i| i.url),
            },
            duration_ms: track.duration_ms,
            preview_url: track.preview_url,
            spotify_url: track.external_urls.spotify.unwrap_or_default(),
        }
    }
}

/// One listening-history entry with the track kept as a nested record.
#[derive(Debug, Clone, Serialize)]
pub struct RecentlyPlayedTrack {
    pub track: Track,
    pub played_at: String,
}

/// One listening-history entry flattened for display.
#[derive(Debug, Clone, Serialize)]
pub struct TrackPlay {
    pub id: String,
    pub track_name: String,
    pub artist_names: Vec<String>,
    pub album_name: String,
    pub album_image_url: Option<String>,
    pub played_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub spotify_url: String,
}

impl From<PlayHistoryItem> for TrackPlay {
    fn from(item: PlayHistoryItem) -> Self {
        TrackPlay {
            id: item.track.id,
            track_name: item.track.name,
            artist_names: item.track.artists.into_iter().map(|a| a.name).collect(),
            album_name: item.track.album.name,
            album_image_url: item.track.album.images.into_iter().next().map(|i| i.url),
            played_at: utils::parse_played_at(&item.played_at),
            duration_ms: item.track.duration_ms,
            spotify_url: item.track.external_urls.spotify.unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
pub struct RecentTableRow {
    pub played: String,
    pub track: String,
    pub artists: String,
    pub album: String,
    pub length: String,
}
