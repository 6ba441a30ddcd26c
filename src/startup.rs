//! Application startup.
//!
//! Builds the storage backend, session store and API client from configuration and
//! hands back a ready [`AppState`].

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::config::ConfigV1;
use crate::http::{ApiClient, Notifier};
use crate::state::AppState;
use crate::store::{create_storage, SessionStore, StorageError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to open session storage: {0}")]
    Storage(#[from] StorageError),
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Build the application from configuration.
///
/// # Errors
///
/// Returns an error if the configured storage cannot be opened or the HTTP client
/// cannot be constructed.
pub fn build(config: ConfigV1, notifier: Arc<dyn Notifier>) -> Result<AppState, StartupError> {
    let storage = create_storage(&config.storage)?;
    let store = Arc::new(SessionStore::new(storage));
    build_with_store(config, store, notifier)
}

/// Like [`build`], with a caller-provided session store.
pub fn build_with_store(
    config: ConfigV1,
    store: Arc<SessionStore>,
    notifier: Arc<dyn Notifier>,
) -> Result<AppState, StartupError> {
    let client = Arc::new(ApiClient::new(&config.backend, store.clone(), notifier)?);
    info!("Backend at {}", client.base_url());
    Ok(AppState::new(Arc::new(config), store, client))
}
