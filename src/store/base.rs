use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use super::{file_storage::FileStorage, memory_storage::MemoryStorage};
use crate::config::StorageConfig;

/// Failures of the medium backing the session records.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access session file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session file {} is not valid JSON: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize session record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A string key-value store with the semantics of browser local storage.
///
/// Each call is atomic on its own. Multi-key calls are atomic for backends that can
/// manage it and fall back to one write per key otherwise.
pub trait Storage: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;

    fn set_items(&self, items: &[(&str, &str)]) -> Result<(), StorageError> {
        for (key, value) in items {
            self.set_item(key, value)?;
        }
        Ok(())
    }

    fn remove_items(&self, keys: &[&str]) -> Result<(), StorageError> {
        for key in keys {
            self.remove_item(key)?;
        }
        Ok(())
    }
}

/// Creates a concrete storage implementation based on the StorageConfig.
pub fn create_storage(config: &StorageConfig) -> Result<Arc<dyn Storage>, StorageError> {
    match config {
        StorageConfig::File { path } => {
            let storage = FileStorage::open(path)?;
            info!("Using file session storage at {}", path.display());
            Ok(Arc::new(storage))
        }
        StorageConfig::Memory => {
            info!("Using in-memory session storage; the session will not survive a restart.");
            Ok(Arc::new(MemoryStorage::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_config_creates_empty_storage() {
        let storage = create_storage(&StorageConfig::Memory).unwrap();
        assert_eq!(storage.get_item("accessToken"), None);
    }

    #[test]
    fn file_config_creates_file_storage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let storage = create_storage(&StorageConfig::File { path: path.clone() }).unwrap();
        storage.set_item("k", "v").unwrap();
        assert!(path.exists());
    }
}
