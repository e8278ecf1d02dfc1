//! # Key-Value Storage
//!
//! The cart persists into an opaque get/set-by-key service. [`KeyValueStore`] is that seam:
//! the persistence writer only ever talks to this trait, so the concrete engine (device
//! storage, a file directory, an in-memory map in tests) is chosen by whoever starts the
//! [`CartProvider`](crate::lifecycle::CartProvider).
//!
//! Values are opaque strings. Encoding them is the caller's job (see [`codec`]).

pub mod codec;
pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by storage backends and the blob codec.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed value under key '{key}': {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode value for key '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Async string storage addressed by key.
#[async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
    /// Reads the value stored under `key`, or `None` if nothing is stored there.
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set_item(&self, key: &str, value: String) -> Result<(), StorageError>;
}
