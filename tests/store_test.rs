use std::sync::Arc;

use chrono::Utc;
use sporecent::management::{FileStore, MemoryStore, SessionStore, TokenManager, keys};

fn store_with_token(expires_at: i64) -> Arc<dyn SessionStore> {
    let store = MemoryStore::new();
    store.set(keys::ACCESS_TOKEN, "at_test");
    store.set(keys::TOKEN_EXPIRY, &expires_at.to_string());
    Arc::new(store)
}

#[test]
fn test_get_access_token_before_expiry() {
    let expires_at = Utc::now().timestamp_millis() + 3600 * 1000;
    let manager = TokenManager::new(store_with_token(expires_at));

    assert_eq!(manager.get_access_token().as_deref(), Some("at_test"));
    assert!(manager.is_authenticated());
    assert_eq!(
        manager.expires_at().map(|dt| dt.timestamp_millis()),
        Some(expires_at)
    );
}

#[test]
fn test_get_access_token_after_expiry_clears_storage() {
    let store = store_with_token(Utc::now().timestamp_millis() - 1);
    let manager = TokenManager::new(Arc::clone(&store));

    assert!(manager.get_access_token().is_none());
    assert!(!manager.is_authenticated());

    // the expired credential is gone, not just hidden
    assert!(store.get(keys::ACCESS_TOKEN).is_none());
    assert!(store.get(keys::TOKEN_EXPIRY).is_none());
}

#[test]
fn test_get_access_token_with_missing_expiry() {
    let store: Arc<dyn SessionStore> = Arc::new(MemoryStore::new());
    store.set(keys::ACCESS_TOKEN, "at_orphan");
    let manager = TokenManager::new(Arc::clone(&store));

    assert!(manager.get_access_token().is_none());
    assert!(store.get(keys::ACCESS_TOKEN).is_none());
}

#[test]
fn test_get_access_token_with_unreadable_expiry() {
    let store: Arc<dyn SessionStore> = Arc::new(MemoryStore::new());
    store.set(keys::ACCESS_TOKEN, "at_test");
    store.set(keys::TOKEN_EXPIRY, "not-a-number");
    let manager = TokenManager::new(Arc::clone(&store));

    assert!(manager.get_access_token().is_none());
    assert!(store.get(keys::ACCESS_TOKEN).is_none());
    assert!(store.get(keys::TOKEN_EXPIRY).is_none());
}

#[test]
fn test_logout_clears_everything() {
    let store: Arc<dyn SessionStore> = Arc::new(MemoryStore::new());
    store.set(keys::ACCESS_TOKEN, "at_test");
    store.set(
        keys::TOKEN_EXPIRY,
        &(Utc::now().timestamp_millis() + 3600 * 1000).to_string(),
    );
    store.set(keys::CODE_VERIFIER, "leftover-verifier");
    let manager = TokenManager::new(Arc::clone(&store));

    manager.logout();

    assert!(manager.get_access_token().is_none());
    assert!(store.get(keys::CODE_VERIFIER).is_none());

    // idempotent - logging out twice is fine
    manager.logout();
    assert!(!manager.is_authenticated());
}

#[test]
fn test_expires_at_absent_when_not_authenticated() {
    let manager = TokenManager::new(Arc::new(MemoryStore::new()));
    assert!(manager.expires_at().is_none());
}

#[test]
fn test_file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let store = FileStore::open(path.clone());
    store.set(keys::ACCESS_TOKEN, "at_persisted");
    store.set(keys::TOKEN_EXPIRY, "12345");

    // a fresh instance sees the persisted slots
    let reopened = FileStore::open(path.clone());
    assert_eq!(
        reopened.get(keys::ACCESS_TOKEN).as_deref(),
        Some("at_persisted")
    );
    assert_eq!(reopened.get(keys::TOKEN_EXPIRY).as_deref(), Some("12345"));

    reopened.remove(keys::ACCESS_TOKEN);
    let reopened_again = FileStore::open(path);
    assert!(reopened_again.get(keys::ACCESS_TOKEN).is_none());
    assert_eq!(
        reopened_again.get(keys::TOKEN_EXPIRY).as_deref(),
        Some("12345")
    );
}

#[test]
fn test_file_store_starts_empty_on_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path().join("does-not-exist.json"));
    assert!(store.get(keys::ACCESS_TOKEN).is_none());
}

#[test]
fn test_expired_token_cleared_through_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let store = FileStore::open(path.clone());
    store.set(keys::ACCESS_TOKEN, "at_expired");
    store.set(
        keys::TOKEN_EXPIRY,
        &(Utc::now().timestamp_millis() - 1).to_string(),
    );

    let manager = TokenManager::new(Arc::new(FileStore::open(path.clone())));
    assert!(manager.get_access_token().is_none());

    // the clear is persisted, not just in-memory
    let reopened = FileStore::open(path);
    assert!(reopened.get(keys::ACCESS_TOKEN).is_none());
    assert!(reopened.get(keys::TOKEN_EXPIRY).is_none());
}
