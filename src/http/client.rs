use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, error, warn};

use super::{ApiError, Notifier};
use crate::config::ClientConfig;
use crate::models::Envelope;
use crate::store::SessionStore;

const SESSION_EVENT_CAPACITY: usize = 16;

/// Signals the pipeline raises for whoever owns navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The backend rejected our credential; the local session is already gone.
    Invalidated,
}

/// Shape of a non-2xx body. Only the message is ever read.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// HTTP client for the one backend this crate talks to.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<SessionStore>,
    notifier: Arc<dyn Notifier>,
    events: broadcast::Sender<SessionEvent>,
}

impl ApiClient {
    pub fn new(
        config: &ClientConfig,
        store: Arc<SessionStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_in_ms))
            .default_headers(headers)
            .build()?;
        let (events, _) = broadcast::channel(SESSION_EVENT_CAPACITY);
        let base_url = config.base_url();
        debug!(
            "Created API client for {} (timeout {}ms)",
            base_url, config.timeout_in_ms
        );
        Ok(ApiClient {
            http,
            base_url,
            store,
            notifier,
            events,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Listen for session events raised by the response phase.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.http.get(self.url(path))).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.http.post(self.url(path)).json(body)).await
    }

    /// Raw builder for calls `get`/`post` do not cover. Send it with [`ApiClient::send`].
    pub fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.url(path))
    }

    /// Request phase: attach the bearer credential when there is one.
    pub fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.store.access_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Run a request through both phases.
    pub async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        match self.execute(request).await {
            Ok(data) => Ok(data),
            Err(e) => Err(self.fail(e)),
        }
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let request = self
            .authorize(request)
            .build()
            .map_err(|e| ApiError::from_transport(&e))?;
        debug!(
            event_name = "http.request.sent",
            event_domain = "http",
            method = %request.method(),
            url = %request.url(),
            authenticated = request.headers().contains_key(reqwest::header::AUTHORIZATION),
            "sending request"
        );
        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| ApiError::from_transport(&e))?;
        read_response(response).await
    }

    /// Every failure path: tear down the session on 401, log, notify, hand the error back.
    fn fail(&self, err: ApiError) -> ApiError {
        if err.is_unauthorized() {
            self.invalidate_session();
        }
        warn!(
            event_name = "http.request.failed",
            event_domain = "http",
            kind = err.kind(),
            status = err.status(),
            "{}",
            err
        );
        if let ApiError::MalformedResponse { detail, .. } = &err {
            debug!("Malformed response detail: {}", detail);
        }
        self.notifier.error(&err.to_string());
        err
    }

    fn invalidate_session(&self) {
        if let Err(e) = self.store.clear() {
            error!("Failed to clear session after 401: {}", e);
        }
        if self.events.send(SessionEvent::Invalidated).is_err() {
            debug!("Session invalidated with no event subscribers");
        }
    }
}

/// Response phase: unwrap the envelope on 2xx, classify by status otherwise.
async fn read_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();

    if status.is_success() {
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::from_transport(&e))?;
        let envelope: Envelope =
            serde_json::from_slice(&body).map_err(|e| ApiError::malformed(e.to_string()))?;
        return envelope.into_outcome();
    }

    // The status alone decides the error; a truncated or stalled body only loses the message.
    let server_message = match response.bytes().await {
        Ok(body) => serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty()),
        Err(e) => {
            debug!("Could not read {} response body: {}", status, e);
            None
        }
    };
    Err(ApiError::from_status(status, server_message))
}
