use std::path::Path;

use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::storage::StorageConfig;

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "./config.yaml";

/// Prefix for environment overrides, e.g. `DISTRI_BACKEND__HOST`.
pub const ENV_PREFIX: &str = "DISTRI_";

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0: where the backend lives, where the session is kept,
/// and how we log.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ConfigV1 {
    pub backend: ClientConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Suffix appended to every page title, as in "Login - DistriChat".
    #[serde(default = "default_app_title")]
    pub app_title: String,
}

/// Connection settings for the single backend this client talks to.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ClientConfig {
    #[serde(default = "default_scheme")]
    pub scheme: String,
    pub host: String,
    pub port: u16,
    #[serde(default = "default_base_path")]
    pub base_path: String,
    #[serde(default = "default_timeout_in_ms")]
    pub timeout_in_ms: u64,
}

impl ClientConfig {
    /// Full base URL every request path is appended to.
    pub fn base_url(&self) -> String {
        format!(
            "{}://{}:{}{}",
            self.scheme,
            self.host,
            self.port,
            self.base_path.trim_end_matches('/')
        )
    }
}

fn default_scheme() -> String {
    "http".to_string()
}

fn default_base_path() -> String {
    "/api".to_string()
}

fn default_timeout_in_ms() -> u64 {
    10_000
}

fn default_app_title() -> String {
    "DistriChat".to_string()
}

/// Load config from a YAML file, with `DISTRI_*` environment variables layered on top.
pub fn load_config(path: impl AsRef<Path>) -> Result<ConfigV1, figment::Error> {
    let figment = Figment::new()
        .merge(Yaml::file(path.as_ref()))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));
    load_from(figment)
}

/// Extract a versioned config from an already assembled figment.
pub fn load_from(figment: Figment) -> Result<ConfigV1, figment::Error> {
    match figment.extract::<Config>()? {
        Config::ConfigV1(c) => Ok(c),
    }
}

/// Render the JSON schema for the configuration.
pub fn schema_json() -> Result<String, serde_json::Error> {
    let schema = schema_for!(Config);
    serde_json::to_string_pretty(&schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{StorageConfig, DEFAULT_SESSION_PATH};
    use std::path::PathBuf;

    const MINIMAL: &str = r#"
version: "1.0.0"
backend:
  host: localhost
  port: 38080
"#;

    #[test]
    fn minimal_config_fills_defaults() {
        let config = load_from(Figment::new().merge(Yaml::string(MINIMAL))).unwrap();
        assert_eq!(config.backend.base_url(), "http://localhost:38080/api");
        assert_eq!(config.backend.timeout_in_ms, 10_000);
        assert_eq!(config.app_title, "DistriChat");
        assert_eq!(
            config.storage,
            StorageConfig::File {
                path: PathBuf::from(DEFAULT_SESSION_PATH)
            }
        );
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn unknown_version_is_rejected() {
        let yaml = MINIMAL.replace("1.0.0", "9.9.9");
        assert!(load_from(Figment::new().merge(Yaml::string(&yaml))).is_err());
    }

    #[test]
    fn file_storage_is_tagged_by_type() {
        let yaml = format!("{MINIMAL}storage:\n  type: file\n  path: /tmp/session.json\n");
        let config = load_from(Figment::new().merge(Yaml::string(&yaml))).unwrap();
        match config.storage {
            StorageConfig::File { path } => assert_eq!(path.to_str(), Some("/tmp/session.json")),
            other => panic!("unexpected storage config: {:?}", other),
        }
    }

    #[test]
    fn file_storage_without_path_uses_default_location() {
        let yaml = format!("{MINIMAL}storage:\n  type: file\n");
        let config = load_from(Figment::new().merge(Yaml::string(&yaml))).unwrap();
        assert_eq!(config.storage, StorageConfig::default());

        let yaml = format!("{MINIMAL}storage:\n  type: memory\n");
        let config = load_from(Figment::new().merge(Yaml::string(&yaml))).unwrap();
        assert_eq!(config.storage, StorageConfig::Memory);
    }

    #[test]
    fn trailing_slash_in_base_path_is_ignored() {
        let yaml = format!("{MINIMAL}  base_path: /api/\n  scheme: https\n");
        let config = load_from(Figment::new().merge(Yaml::string(&yaml))).unwrap();
        assert_eq!(config.backend.base_url(), "https://localhost:38080/api");
    }

    #[test]
    fn schema_mentions_backend() {
        let schema = schema_json().unwrap();
        assert!(schema.contains("backend"));
    }
}
