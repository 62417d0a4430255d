use std::sync::Arc;

use crate::{
    info,
    management::{FileStore, SessionStore, TokenManager},
};

pub async fn status() {
    let store: Arc<dyn SessionStore> = Arc::new(FileStore::open_default());
    let manager = TokenManager::new(store);

    match manager.expires_at() {
        Some(expires_at) => {
            info!("Authenticated.");
            info!(
                "Access token expires at {}.",
                expires_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
        }
        None => info!("Not authenticated. Run sporecent auth to log in."),
    }
}
