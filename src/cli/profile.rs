use std::{sync::Arc, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    error, info,
    management::{FileStore, SessionStore, TokenManager},
    spotify,
};

pub async fn profile() {
    let store: Arc<dyn SessionStore> = Arc::new(FileStore::open_default());
    let manager = TokenManager::new(store);

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching profile...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    match spotify::profile::get_user_profile(&manager).await {
        Ok(profile) => {
            pb.finish_and_clear();
            info!("Name:      {}", profile.display_name);
            info!("ID:        {}", profile.id);
            if !profile.email.is_empty() {
                info!("E-Mail:    {}", profile.email);
            }
            info!("Country:   {}", profile.country);
            info!("Followers: {}", profile.followers);
            if !profile.spotify_url.is_empty() {
                info!("Profile:   {}", profile.spotify_url);
            }
        }
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to fetch profile: {}", e);
        }
    }
}
