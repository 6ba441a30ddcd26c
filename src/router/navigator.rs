use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use super::guard::{Decision, NavigationGuard, REDIRECT_PARAM};
use super::location::Location;
use super::routes::{RouteTable, LOGIN_PATH};
use crate::http::SessionEvent;
use crate::store::SessionStore;

/// More hops than any sane route table needs.
const MAX_REDIRECTS: usize = 8;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("no route matches '{0}'")]
    NotFound(String),
    #[error("too many redirects while navigating to '{0}'")]
    RedirectLoop(String),
}

/// Owns the current location and runs the guard on every transition.
pub struct Navigator {
    routes: RouteTable,
    guard: NavigationGuard,
    store: Arc<SessionStore>,
    title_suffix: String,
    current: Option<Location>,
    title: Option<String>,
}

impl Navigator {
    pub fn new(store: Arc<SessionStore>, title_suffix: impl Into<String>) -> Self {
        Navigator {
            routes: RouteTable::default(),
            guard: NavigationGuard::default(),
            store,
            title_suffix: title_suffix.into(),
            current: None,
            title: None,
        }
    }

    pub fn with_routes(mut self, routes: RouteTable) -> Self {
        self.routes = routes;
        self
    }

    pub fn current(&self) -> Option<&Location> {
        self.current.as_ref()
    }

    /// Page title set by the last completed transition.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Go to `target`, following static and guard redirects, and return where we landed.
    pub fn navigate(&mut self, target: &str) -> Result<Location, NavigationError> {
        let mut location = Location::parse(target);

        for _ in 0..MAX_REDIRECTS {
            let route = *self
                .routes
                .resolve(location.path())
                .ok_or_else(|| NavigationError::NotFound(location.path().to_string()))?;

            if let Some(to) = route.redirect {
                debug!("Route '{}' redirects to '{}'", route.path, to);
                location = Location::parse(to);
                continue;
            }

            match self
                .guard
                .evaluate(&route, &location, self.store.is_logged_in())
            {
                Decision::Proceed => {
                    if let Some(title) = route.title {
                        self.title = Some(format!("{} - {}", title, self.title_suffix));
                    }
                    debug!(
                        event_name = "router.navigated",
                        event_domain = "router",
                        path = location.full_path(),
                        "navigation complete"
                    );
                    self.current = Some(location.clone());
                    return Ok(location);
                }
                Decision::Redirect(to) => {
                    info!(
                        event_name = "router.redirected",
                        event_domain = "router",
                        from = location.full_path(),
                        to = to.as_str(),
                        "navigation guard redirected"
                    );
                    location = Location::parse(&to);
                }
            }
        }

        Err(NavigationError::RedirectLoop(target.to_string()))
    }

    /// React to the request pipeline. Returns the new location, or `None` when nothing moved.
    pub fn on_session_event(
        &mut self,
        event: SessionEvent,
    ) -> Result<Option<Location>, NavigationError> {
        match event {
            SessionEvent::Invalidated => {
                if self.current.as_ref().map(Location::path) == Some(LOGIN_PATH) {
                    return Ok(None);
                }
                self.navigate(LOGIN_PATH).map(Some)
            }
        }
    }

    /// Where to go after a successful login: the path the guard stashed in `redirect`,
    /// or the landing page. Only same-origin paths are honoured.
    pub fn post_login_target(&self) -> String {
        self.current
            .as_ref()
            .and_then(|loc| loc.query_param(REDIRECT_PARAM))
            .filter(|target| is_local_path(target))
            .unwrap_or_else(|| self.guard.landing_path().to_string())
    }
}

/// A single leading `/` followed by anything but another separator. Browsers read `\` as
/// `/` and drop tabs and newlines, so `/\host` and `/<tab>/host` both leave the origin.
fn is_local_path(target: &str) -> bool {
    let mut chars = target.chars();
    chars.next() == Some('/')
        && !matches!(chars.next(), Some('/') | Some('\\'))
        && !target.chars().any(|c| c.is_ascii_control())
}
