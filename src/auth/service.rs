use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::http::{ApiClient, ApiError};
use crate::models::{Credentials, Session, UserProfile};
use crate::store::{SessionStore, StorageError};

pub const REGISTER_PATH: &str = "/auth/register";
pub const LOGIN_PATH: &str = "/auth/login";

/// Failure of a register/login call. Pipeline errors pass through untouched.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Register and login: the only operations that create a session.
pub struct AuthService {
    client: Arc<ApiClient>,
    store: Arc<SessionStore>,
}

impl AuthService {
    pub fn new(client: Arc<ApiClient>, store: Arc<SessionStore>) -> Self {
        AuthService { client, store }
    }

    pub async fn register(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        self.authenticate(REGISTER_PATH, credentials).await
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        self.authenticate(LOGIN_PATH, credentials).await
    }

    /// Drop the local session. The backend is not told.
    pub fn logout(&self) -> Result<(), StorageError> {
        self.store.clear()
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.store.current_user()
    }

    pub fn is_logged_in(&self) -> bool {
        self.store.is_logged_in()
    }

    async fn authenticate(
        &self,
        path: &str,
        credentials: &Credentials,
    ) -> Result<Session, AuthError> {
        let session: Session = self.client.post(path, credentials).await?;
        self.store.save(&session)?;
        info!(
            event_name = "auth.succeeded",
            event_domain = "auth",
            path,
            user_id = session.user_id,
            "authenticated as '{}'",
            credentials.identifier
        );
        Ok(session)
    }
}
