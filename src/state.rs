//! Shared application state.
//!
//! One session store, one API client, one auth service and one navigator, wired
//! together once at startup and passed around from there.

use std::sync::Arc;

use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::warn;

use crate::auth::AuthService;
use crate::config::ConfigV1;
use crate::http::{ApiClient, SessionEvent};
use crate::router::{Location, NavigationError, Navigator};
use crate::store::SessionStore;

pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    pub store: Arc<SessionStore>,
    pub client: Arc<ApiClient>,
    pub auth: AuthService,
    pub navigator: Navigator,
    /// Pipeline events not yet applied to the navigator.
    session_events: broadcast::Receiver<SessionEvent>,
}

impl AppState {
    pub fn new(config: Arc<ConfigV1>, store: Arc<SessionStore>, client: Arc<ApiClient>) -> Self {
        let session_events = client.subscribe();
        let auth = AuthService::new(client.clone(), store.clone());
        let navigator = Navigator::new(store.clone(), config.app_title.clone());
        AppState {
            config,
            store,
            client,
            auth,
            navigator,
            session_events,
        }
    }

    /// Apply every pending session event to the navigator. Returns the last location
    /// we were moved to, if any.
    pub fn process_session_events(&mut self) -> Result<Option<Location>, NavigationError> {
        let mut moved = None;
        loop {
            let event = match self.session_events.try_recv() {
                Ok(event) => event,
                // Missed events are all invalidations; acting on one is enough.
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!("Skipped {} session events", skipped);
                    SessionEvent::Invalidated
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            };
            if let Some(location) = self.navigator.on_session_event(event)? {
                moved = Some(location);
            }
        }
        Ok(moved)
    }
}
