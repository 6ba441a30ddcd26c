#![allow(dead_code)]

use std::sync::Arc;

use distri_client::config::{load_from, ConfigV1};
use distri_client::http::MemoryNotifier;
use distri_client::models::Session;
use distri_client::startup::build_with_store;
use distri_client::state::AppState;
use distri_client::store::SessionStore;
use figment::{
    providers::{Format, Yaml},
    Figment,
};
use serde_json::{json, Value};

/// Config pointing at a mock server URL such as `http://127.0.0.1:1234`.
pub fn test_config(server_url: &str) -> ConfigV1 {
    let url = reqwest::Url::parse(server_url).expect("mock server url");
    let yaml = format!(
        r#"
version: "1.0.0"
backend:
  host: "{}"
  port: {}
  base_path: /api
  timeout_in_ms: 2000
storage:
  type: memory
logging:
  level: debug
  format: json
"#,
        url.host_str().expect("host"),
        url.port().expect("port"),
    );
    load_from(Figment::new().merge(Yaml::string(&yaml))).expect("test config should load")
}

pub fn build_app(server_url: &str) -> (AppState, Arc<SessionStore>, Arc<MemoryNotifier>) {
    let store = Arc::new(SessionStore::in_memory());
    let notifier = Arc::new(MemoryNotifier::new());
    let state = build_with_store(test_config(server_url), store.clone(), notifier.clone())
        .expect("app should build");
    (state, store, notifier)
}

pub fn auth_payload(user_id: i64) -> Value {
    json!({
        "userId": user_id,
        "accessToken": format!("token-{}", user_id),
        "clientId": format!("client-{}", user_id),
        "nickname": format!("user{}", user_id),
        "avatar": format!("https://cdn.example.com/{}.png", user_id),
    })
}

pub fn success_body(data: Value) -> String {
    json!({ "success": true, "message": "ok", "data": data }).to_string()
}

pub fn sample_session(user_id: i64) -> Session {
    serde_json::from_value(auth_payload(user_id)).expect("sample session")
}
