use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::management::{SessionStore, keys};

/// Access token lifecycle over a [`SessionStore`].
///
/// Reads enforce the expiry invariant: a token is never handed out at
/// or past its expiry instant. Observing a missing, unparseable, or
/// expired credential clears the stored slots before reporting absence,
/// so stale data cannot be returned on a later read either.
pub struct TokenManager {
    store: Arc<dyn SessionStore>,
}

impl TokenManager {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        TokenManager { store }
    }

    /// Returns the stored access token, or `None` after clearing the
    /// credential when the token or expiry slot is missing, the expiry
    /// is unreadable, or the expiry instant has passed.
    pub fn get_access_token(&self) -> Option<String> {
        let token = self.store.get(keys::ACCESS_TOKEN);
        let expiry = self.store.get(keys::TOKEN_EXPIRY);

        let (Some(token), Some(expiry)) = (token, expiry) else {
            self.clear_credential();
            return None;
        };

        let Ok(expires_at) = expiry.parse::<i64>() else {
            self.clear_credential();
            return None;
        };

        if Utc::now().timestamp_millis() >= expires_at {
            self.clear_credential();
            return None;
        }

        Some(token)
    }

    pub fn is_authenticated(&self) -> bool {
        self.get_access_token().is_some()
    }

    /// Expiry instant of the current credential, if one is live.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.get_access_token()?;
        let expiry = self.store.get(keys::TOKEN_EXPIRY)?;
        let millis = expiry.parse::<i64>().ok()?;
        DateTime::from_timestamp_millis(millis)
    }

    /// Clears the token, its expiry, and any leftover code verifier.
    /// Safe to call when already logged out.
    pub fn logout(&self) {
        self.store.remove(keys::ACCESS_TOKEN);
        self.store.remove(keys::TOKEN_EXPIRY);
        self.store.remove(keys::CODE_VERIFIER);
    }

    fn clear_credential(&self) {
        self.store.remove(keys::ACCESS_TOKEN);
        self.store.remove(keys::TOKEN_EXPIRY);
    }
}
