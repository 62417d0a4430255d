use crate::{
    error::ApiError,
    management::TokenManager,
    spotify,
    types::{SpotifyUser, UserProfile},
};

/// Retrieves the authenticated user's profile.
///
/// Fetches `GET /me` and reshapes the response into a [`UserProfile`],
/// filling the defaults for fields the API omits for some accounts
/// (display name, e-mail, country, avatar).
pub async fn get_user_profile(manager: &TokenManager) -> Result<UserProfile, ApiError> {
    let user: SpotifyUser = spotify::api_get(manager, "/me").await?;
    Ok(UserProfile::from(user))
}
