//! In-process storage backend.

use super::{KeyValueStore, StorageError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Map-backed [`KeyValueStore`]. Clones share the same map, so a test can keep one clone and
/// inspect what a provider wrote through another.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with `key = value`.
    pub fn with_item(key: impl Into<String>, value: impl Into<String>) -> Self {
        let map = HashMap::from([(key.into(), value.into())]);
        Self {
            inner: Arc::new(Mutex::new(map)),
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.inner.lock().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.inner.lock().await.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clones_share_state() {
        let storage = MemoryStorage::with_item("k", "v1");
        let other = storage.clone();

        assert_eq!(other.get_item("k").await.unwrap().as_deref(), Some("v1"));
        other.set_item("k", "v2".into()).await.unwrap();
        assert_eq!(storage.get_item("k").await.unwrap().as_deref(), Some("v2"));
        assert_eq!(other.get_item("missing").await.unwrap(), None);
    }
}
