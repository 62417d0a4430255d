use std::{sync::Arc, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    error, info,
    management::{FileStore, SessionStore, TokenManager},
    spotify,
    types::RecentTableRow,
    utils,
};

pub async fn recent(limit: Option<u32>, json: bool) {
    let store: Arc<dyn SessionStore> = Arc::new(FileStore::open_default());
    let manager = TokenManager::new(store);
    let limit = limit.unwrap_or(20);

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching recently played tracks...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    if json {
        match spotify::history::get_recently_played(&manager, limit).await {
            Ok(tracks) => {
                pb.finish_and_clear();
                match serde_json::to_string_pretty(&tracks) {
                    Ok(out) => println!("{}", out),
                    Err(e) => error!("Failed to serialize tracks: {}", e),
                }
            }
            Err(e) => {
                pb.finish_and_clear();
                error!("Failed to fetch recently played tracks: {}", e);
            }
        }
        return;
    }

    match spotify::history::get_track_play_history(&manager, limit).await {
        Ok(plays) => {
            pb.finish_and_clear();

            if plays.is_empty() {
                info!("No recently played tracks.");
                return;
            }

            let table_rows: Vec<RecentTableRow> = plays
                .iter()
                .map(|play| RecentTableRow {
                    played: play.played_at.format("%Y-%m-%d %H:%M").to_string(),
                    track: play.track_name.clone(),
                    artists: play.artist_names.join(", "),
                    album: play.album_name.clone(),
                    length: utils::format_duration_ms(play.duration_ms),
                })
                .collect();

            let table = Table::new(table_rows);
            println!("{}", table);
        }
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to fetch recently played tracks: {}", e);
        }
    }
}
