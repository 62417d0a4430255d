use sporecent::types::{
    PlayHistoryItem, RecentlyPlayedResponse, SpotifyUser, Track, TrackPlay, UserProfile,
};

fn sample_track_item() -> serde_json::Value {
    serde_json::json!({
        "track": {
            "id": "track-1",
            "name": "Paranoid Android",
            "artists": [
                {"id": "artist-1", "name": "Radiohead", "external_urls": {"spotify": "https://open.spotify.com/artist/artist-1"}}
            ],
            "album": {
                "id": "album-1",
                "name": "OK Computer",
                "images": [
                    {"url": "https://i.scdn.co/image/large", "height": 640, "width": 640},
                    {"url": "https://i.scdn.co/image/small", "height": 64, "width": 64}
                ]
            },
            "duration_ms": 383066,
            "preview_url": null,
            "external_urls": {"spotify": "https://open.spotify.com/track/track-1"}
        },
        "played_at": "2024-05-01T12:30:45.123Z"
    })
}

#[test]
fn test_user_profile_normalization() {
    let raw = serde_json::json!({
        "id": "user-1",
        "display_name": "Thom",
        "email": "thom@example.com",
        "country": "GB",
        "followers": {"href": null, "total": 42},
        "images": [{"url": "https://i.scdn.co/image/avatar", "height": 300, "width": 300}],
        "external_urls": {"spotify": "https://open.spotify.com/user/user-1"},
        "type": "user",
        "product": "premium"
    });

    let user: SpotifyUser = serde_json::from_value(raw).unwrap();
    let profile = UserProfile::from(user);

    assert_eq!(profile.id, "user-1");
    assert_eq!(profile.display_name, "Thom");
    assert_eq!(profile.email, "thom@example.com");
    assert_eq!(profile.country, "GB");
    assert_eq!(profile.followers, 42);
    assert_eq!(
        profile.image_url.as_deref(),
        Some("https://i.scdn.co/image/avatar")
    );
    assert_eq!(profile.spotify_url, "https://open.spotify.com/user/user-1");
    assert_eq!(profile.kind, "user");
}

#[test]
fn test_user_profile_defaults_for_sparse_account() {
    let raw = serde_json::json!({
        "id": "user-2",
        "display_name": null,
        "type": "user"
    });

    let user: SpotifyUser = serde_json::from_value(raw).unwrap();
    let profile = UserProfile::from(user);

    assert_eq!(profile.display_name, "Unknown User");
    assert_eq!(profile.email, "");
    assert_eq!(profile.country, "Unknown");
    assert_eq!(profile.followers, 0);
    assert!(profile.image_url.is_none());
    assert_eq!(profile.spotify_url, "");
}

#[test]
fn test_track_normalization_takes_first_image() {
    let item: PlayHistoryItem = serde_json::from_value(sample_track_item()).unwrap();
    let track = Track::from(item.track);

    assert_eq!(track.id, "track-1");
    assert_eq!(track.name, "Paranoid Android");
    assert_eq!(track.artists.len(), 1);
    assert_eq!(track.artists[0].name, "Radiohead");
    assert_eq!(track.album.name, "OK Computer");
    assert_eq!(
        track.album.image_url.as_deref(),
        Some("https://i.scdn.co/image/large")
    );
    assert_eq!(track.duration_ms, 383066);
    assert!(track.preview_url.is_none());
    assert_eq!(track.spotify_url, "https://open.spotify.com/track/track-1");
}

#[test]
fn test_track_play_flattening() {
    let item: PlayHistoryItem = serde_json::from_value(sample_track_item()).unwrap();
    let play = TrackPlay::from(item);

    assert_eq!(play.id, "track-1");
    assert_eq!(play.track_name, "Paranoid Android");
    assert_eq!(play.artist_names, vec!["Radiohead"]);
    assert_eq!(play.album_name, "OK Computer");
    assert_eq!(
        play.album_image_url.as_deref(),
        Some("https://i.scdn.co/image/large")
    );
    assert_eq!(play.played_at.timestamp(), 1714566645);
    assert_eq!(play.duration_ms, 383066);
}

#[test]
fn test_recently_played_response_parses() {
    let raw = serde_json::json!({
        "items": [sample_track_item(), sample_track_item()],
        "next": "https://api.spotify.com/v1/me/player/recently-played?before=123",
        "limit": 2
    });

    let response: RecentlyPlayedResponse = serde_json::from_value(raw).unwrap();
    assert_eq!(response.items.len(), 2);
    assert_eq!(response.items[0].played_at, "2024-05-01T12:30:45.123Z");
}
