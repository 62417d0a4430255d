use std::{
    collections::HashMap,
    fs,
    path::PathBuf,
    sync::Mutex,
};

use crate::warning;

/// Names of the three session slots.
///
/// The verifier slot is only populated between the authorization
/// redirect and the token exchange.
pub mod keys {
    pub const ACCESS_TOKEN: &str = "spotify_access_token";
    pub const TOKEN_EXPIRY: &str = "spotify_token_expiry";
    pub const CODE_VERIFIER: &str = "spotify_code_verifier";
}

/// Short-lived key/value storage for the authentication session.
///
/// The auth flow never touches a concrete backend directly; it receives
/// a store so tests can swap in [`MemoryStore`]. Operations are plain
/// reads and writes with no network access.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-process session store; contents last for the lifetime of the
/// process.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        let state = self.state.lock().unwrap();
        state.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut state = self.state.lock().unwrap();
        state.insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        let mut state = self.state.lock().unwrap();
        state.remove(key);
    }
}

/// Write-through session store backed by a JSON file in the local data
/// directory, so separate CLI invocations share one session. Expiry
/// enforcement in the token manager keeps its contents short-lived.
pub struct FileStore {
    path: PathBuf,
    state: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// Opens the store at `path`, starting empty if the file is missing
    /// or unreadable.
    pub fn open(path: PathBuf) -> Self {
        let state = fs::read_to_string(&path)
            .ok()
            .and_then(|contents| serde_json::from_str(&contents).ok())
            .unwrap_or_default();
        FileStore {
            path,
            state: Mutex::new(state),
        }
    }

    /// Opens the store at its default location under the local data
    /// directory.
    pub fn open_default() -> Self {
        Self::open(Self::session_path())
    }

    fn session_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("sporecent/cache/session.json");
        path
    }

    fn persist(&self, state: &HashMap<String, String>) {
        let json = match serde_json::to_string_pretty(state) {
            Ok(json) => json,
            Err(e) => {
                warning!("Failed to serialize session store: {}", e);
                return;
            }
        };
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warning!("Failed to create session store directory: {}", e);
                return;
            }
        }
        if let Err(e) = fs::write(&self.path, json) {
            warning!("Failed to persist session store: {}", e);
        }
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let state = self.state.lock().unwrap();
        state.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut state = self.state.lock().unwrap();
        state.insert(key.to_string(), value.to_string());
        self.persist(&state);
    }

    fn remove(&self, key: &str) {
        let mut state = self.state.lock().unwrap();
        if state.remove(key).is_some() {
            self.persist(&state);
        }
    }
}
