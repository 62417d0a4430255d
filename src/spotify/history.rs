use crate::{
    error::ApiError,
    management::TokenManager,
    spotify,
    types::{RecentlyPlayedResponse, RecentlyPlayedTrack, Track, TrackPlay},
    utils,
};

/// Retrieves the user's recently played tracks with the track kept as a
/// nested record.
///
/// `limit` is clamped into the API's accepted range of 1-50 before the
/// request is issued.
pub async fn get_recently_played(
    manager: &TokenManager,
    limit: u32,
) -> Result<Vec<RecentlyPlayedTrack>, ApiError> {
    let limit = utils::clamp_history_limit(limit);

    let response: RecentlyPlayedResponse = spotify::api_get(
        manager,
        &format!("/me/player/recently-played?limit={limit}"),
    )
    .await?;

    Ok(response
        .items
        .into_iter()
        .map(|item| RecentlyPlayedTrack {
            played_at: item.played_at,
            track: Track::from(item.track),
        })
        .collect())
}

/// Retrieves the user's recently played tracks flattened into one
/// record per play, with `played_at` parsed into a timestamp.
///
/// Same endpoint and clamping as [`get_recently_played`]; this shape is
/// what the table rendering in the CLI consumes.
pub async fn get_track_play_history(
    manager: &TokenManager,
    limit: u32,
) -> Result<Vec<TrackPlay>, ApiError> {
    let limit = utils::clamp_history_limit(limit);

    let response: RecentlyPlayedResponse = spotify::api_get(
        manager,
        &format!("/me/player/recently-played?limit={limit}"),
    )
    .await?;

    Ok(response.items.into_iter().map(TrackPlay::from).collect())
}
