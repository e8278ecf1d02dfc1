//! # Configuration
//!
//! Settings for a [`CartProvider`](crate::lifecycle::CartProvider), read from
//! `<config dir>/cart-store/config.toml`. Every field is optional:
//!
//! ```toml
//! storage_key = "@GoMarketplace:cartProducts"
//! buffer_size = 32
//! write_debounce_ms = 50
//!
//! [storage]
//! backend = "file"          # or "memory"
//! dir = "/var/lib/cart"     # defaults to <data dir>/cart-store
//! ```

use crate::cart_actor::DEFAULT_BUFFER_SIZE;
use crate::storage::{FileStorage, KeyValueStore, MemoryStorage, StorageError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Key the storefront app has always used for the cart blob.
pub const DEFAULT_STORAGE_KEY: &str = "@GoMarketplace:cartProducts";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", path.display())]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// Storage key holding the serialized cart.
    pub storage_key: String,
    /// Capacity of the actor's request queue.
    pub buffer_size: usize,
    /// How long the writer waits after a change before storing the latest cart.
    pub write_debounce_ms: u64,
    pub storage: StorageConfig,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            buffer_size: DEFAULT_BUFFER_SIZE,
            write_debounce_ms: 50,
            storage: StorageConfig::default(),
        }
    }
}

/// Which [`KeyValueStore`] backs the cart.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StorageConfig {
    /// Process memory; the cart is lost on exit.
    #[default]
    Memory,
    /// One file per key under `dir`.
    File {
        #[serde(default)]
        dir: Option<PathBuf>,
    },
}

impl CartConfig {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/cart-store/config.toml` on Linux, or the platform equivalent via
    /// `dirs::config_dir()`. Falls back to the current directory if there is none.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("cart-store").join("config.toml")
    }

    /// Default directory of the file backend.
    pub fn default_data_dir() -> PathBuf {
        let data_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        data_dir.join("cart-store")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `CartConfig::default()`.
    /// - Otherwise parses it as TOML and validates it.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: CartConfig = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Checks:
    /// - The storage key is not blank
    /// - The request queue has room for at least one request
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "storage_key must not be empty".to_string(),
            });
        }

        if self.buffer_size == 0 {
            return Err(ConfigError::ValidationError {
                message: "buffer_size must be at least 1".to_string(),
            });
        }

        Ok(())
    }

    pub fn write_debounce(&self) -> Duration {
        Duration::from_millis(self.write_debounce_ms)
    }

    /// Opens the configured storage backend.
    pub fn open_storage(&self) -> Result<Arc<dyn KeyValueStore>, StorageError> {
        match &self.storage {
            StorageConfig::Memory => Ok(Arc::new(MemoryStorage::new())),
            StorageConfig::File { dir } => {
                let dir = dir.clone().unwrap_or_else(Self::default_data_dir);
                Ok(Arc::new(FileStorage::open(dir)?))
            }
        }
    }
}
