//! # Cart Persistence
//!
//! Keeps the persisted cart in step with the actor. One [`CartPersistence`] task runs per
//! provider and does two things, in order:
//!
//! 1. **Load**: read the blob under the configured key and hydrate the actor with it. The
//!    provider does not wait for this; the cart is usable (and empty) until the load resolves.
//! 2. **Write**: follow the actor's snapshot channel and store every new collection.
//!
//! ## Ordering
//!
//! Writes are last-write-wins. There is exactly one writer per key and it always reads the
//! *latest* snapshot after waking up, so a burst of mutations collapses into a single write of
//! the final state and an older collection can never land after a newer one. The optional
//! debounce widens the collapsing window.
//!
//! ## Failure
//!
//! Storage failures never reach cart callers. A failed or malformed load is logged and the
//! cart starts empty; a failed write is logged and retried with the next change.

use crate::framework::{ResourceClient, Snapshot};
use crate::model::CartItem;
use crate::storage::codec::{decode_blob, encode_blob};
use crate::storage::{KeyValueStore, StorageError};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Loader and single writer for one storage key.
pub struct CartPersistence {
    store: Arc<dyn KeyValueStore>,
    key: String,
    debounce: Duration,
}

impl CartPersistence {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>, debounce: Duration) -> Self {
        Self {
            store,
            key: key.into(),
            debounce,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the persisted cart. `Ok(None)` means nothing was ever stored.
    ///
    /// Lines the cart could never hold (empty id, bad price, quantity 0) are skipped with a
    /// warning.
    pub async fn load(&self) -> Result<Option<Vec<CartItem>>, StorageError> {
        let Some(blob) = self.store.get_item(&self.key).await? else {
            return Ok(None);
        };
        let items: Vec<CartItem> = decode_blob(&self.key, &blob)?;
        let valid = items
            .into_iter()
            .filter(|item| match item.validate() {
                Ok(()) => true,
                Err(e) => {
                    warn!(key = %self.key, id = %item.id, error = %e, "Skipping persisted line");
                    false
                }
            })
            .collect();
        Ok(Some(valid))
    }

    /// Stores `items` under the key, replacing the previous blob.
    pub async fn save(&self, items: &[CartItem]) -> Result<(), StorageError> {
        let blob = encode_blob(&self.key, items)?;
        self.store.set_item(&self.key, blob).await
    }

    /// Hydrates the actor behind `client`, then writes every snapshot seen on `updates` until
    /// the actor stops.
    ///
    /// `updates` must be subscribed before the actor handles its first request, otherwise early
    /// mutations may never be written. `loaded` flips to `true` once the load has been applied.
    /// If the actor is gone before hydration the task ends without writing anything.
    pub async fn run(
        self,
        client: ResourceClient<CartItem>,
        mut updates: watch::Receiver<Snapshot<CartItem>>,
        loaded: watch::Sender<bool>,
    ) {
        let mut last_written = 0;

        match self.load().await {
            Ok(Some(persisted)) => {
                debug!(key = %self.key, items = persisted.len(), "Loaded persisted cart");
                if let Err(e) = client.hydrate(persisted.clone()).await {
                    info!(key = %self.key, error = %e, "Cart closed before hydration, not writing");
                    return;
                }
                // Nothing to write back if no mutation raced the load.
                let current = updates.borrow();
                if *current.items == persisted {
                    last_written = current.revision;
                }
            }
            Ok(None) => debug!(key = %self.key, "No persisted cart"),
            Err(e) => warn!(key = %self.key, error = %e, "Could not load persisted cart, starting empty"),
        }
        loaded.send_replace(true);

        // The writer only needs the snapshots; holding a sender would keep the actor alive.
        drop(client);

        loop {
            let open = updates.changed().await.is_ok();
            if open && !self.debounce.is_zero() {
                tokio::time::sleep(self.debounce).await;
            }

            let snapshot = updates.borrow_and_update().clone();
            if snapshot.revision > last_written {
                match self.save(&snapshot.items).await {
                    Ok(()) => {
                        debug!(key = %self.key, revision = snapshot.revision, items = snapshot.len(), "Persisted cart");
                        last_written = snapshot.revision;
                    }
                    Err(e) => {
                        warn!(key = %self.key, revision = snapshot.revision, error = %e, "Failed to persist cart")
                    }
                }
            }

            if !open {
                break;
            }
        }

        info!(key = %self.key, revision = last_written, "Writer stopped");
    }
}
