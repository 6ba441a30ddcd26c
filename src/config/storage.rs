use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Used when the config omits `storage`, or names a file backend without a path.
pub const DEFAULT_SESSION_PATH: &str = ".distri/session.json";

fn default_session_path() -> PathBuf {
    PathBuf::from(DEFAULT_SESSION_PATH)
}

/// Where the session records live. We differentiate backends via a "type" tag in the YAML.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(tag = "type")]
pub enum StorageConfig {
    /// A JSON file on disk; survives restarts.
    #[serde(rename = "file")]
    File {
        #[serde(default = "default_session_path")]
        path: PathBuf,
    },
    /// Process-local; the session is lost on exit.
    #[serde(rename = "memory")]
    Memory,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig::File {
            path: default_session_path(),
        }
    }
}
