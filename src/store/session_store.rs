use std::sync::Arc;

use tracing::{info, warn};

use super::{MemoryStorage, Storage, StorageError};
use crate::models::{Session, UserProfile};

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const CLIENT_ID_KEY: &str = "clientId";
pub const USER_INFO_KEY: &str = "userInfo";

const SESSION_KEYS: [&str; 3] = [ACCESS_TOKEN_KEY, CLIENT_ID_KEY, USER_INFO_KEY];

/// Single source of truth for "who is logged in".
///
/// The session is kept as three records (token, client id, JSON profile) that are
/// written and removed together. Presence of the token is all that "logged in" means;
/// nothing here checks expiry or asks the backend.
pub struct SessionStore {
    storage: Arc<dyn Storage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        SessionStore { storage }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Persist every session field, replacing whatever was there.
    pub fn save(&self, session: &Session) -> Result<(), StorageError> {
        let profile = serde_json::to_string(&session.profile())?;
        self.storage.set_items(&[
            (ACCESS_TOKEN_KEY, session.access_token.as_str()),
            (CLIENT_ID_KEY, session.client_id.as_str()),
            (USER_INFO_KEY, profile.as_str()),
        ])?;
        info!(
            event_name = "session.saved",
            event_domain = "session",
            user_id = session.user_id,
            "session stored"
        );
        Ok(())
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        let raw = self.storage.get_item(USER_INFO_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(profile) => Some(profile),
            Err(e) => {
                warn!("Ignoring unreadable {} record: {}", USER_INFO_KEY, e);
                None
            }
        }
    }

    pub fn access_token(&self) -> Option<String> {
        self.storage
            .get_item(ACCESS_TOKEN_KEY)
            .filter(|token| !token.is_empty())
    }

    pub fn client_id(&self) -> Option<String> {
        self.storage.get_item(CLIENT_ID_KEY)
    }

    pub fn is_logged_in(&self) -> bool {
        self.access_token().is_some()
    }

    /// Remove every session record. Clearing an absent session is a no-op.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove_items(&SESSION_KEYS)?;
        info!(
            event_name = "session.cleared",
            event_domain = "session",
            "session cleared"
        );
        Ok(())
    }
}
