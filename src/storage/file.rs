//! Directory-backed storage: one file per key.

use super::{KeyValueStore, StorageError};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// [`KeyValueStore`] that keeps each key in its own file under `root`.
///
/// Keys are mapped to file names by replacing every character outside `[A-Za-z0-9_-]` with `_`
/// and appending `.json`. Writes go to a temporary sibling first and are renamed into place, so
/// a reader never observes a half-written value.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Opens (and creates, if needed) the storage directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|source| StorageError::Io {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The file holding `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(format!("{name}.json"))
    }
}

#[async_trait]
impl KeyValueStore for FileStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value.as_bytes())
            .await
            .map_err(|source| StorageError::Io {
                path: tmp.clone(),
                source,
            })?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|source| StorageError::Io {
                path: path.clone(),
                source,
            })?;
        debug!(path = %path.display(), bytes = value.len(), "Stored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_to_file_name() {
        let storage = FileStorage {
            root: PathBuf::from("/data"),
        };
        assert_eq!(
            storage.path_for("@GoMarketplace:cartProducts"),
            PathBuf::from("/data/_GoMarketplace_cartProducts.json")
        );
    }

    #[tokio::test]
    async fn test_set_then_get_latest() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path().join("nested")).unwrap();

        assert_eq!(storage.get_item("cart").await.unwrap(), None);

        storage.set_item("cart", "[1]".into()).await.unwrap();
        storage.set_item("cart", "[2]".into()).await.unwrap();
        assert_eq!(storage.get_item("cart").await.unwrap().as_deref(), Some("[2]"));
        assert!(!storage.path_for("cart").with_extension("json.tmp").exists());
        assert_eq!(storage.get_item("other").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_reopen_sees_previous_values() {
        let dir = tempfile::tempdir().unwrap();
        FileStorage::open(dir.path())
            .unwrap()
            .set_item("cart", "[]".into())
            .await
            .unwrap();

        let reopened = FileStorage::open(dir.path()).unwrap();
        assert_eq!(reopened.get_item("cart").await.unwrap().as_deref(), Some("[]"));
    }
}
