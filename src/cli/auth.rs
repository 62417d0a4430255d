use std::sync::Arc;

use crate::{
    management::{FileStore, SessionStore, TokenManager},
    spotify, success,
    types::AuthContext,
};

pub async fn auth() {
    let store: Arc<dyn SessionStore> = Arc::new(FileStore::open_default());
    let ctx = Arc::new(AuthContext::new(store));
    spotify::auth::auth(ctx).await;
}

pub async fn logout() {
    let store: Arc<dyn SessionStore> = Arc::new(FileStore::open_default());
    TokenManager::new(store).logout();
    success!("Logged out.");
}
