use crate::cart_actor::{self, CartError};
use crate::clients::CartClient;
use crate::config::{CartConfig, ConfigError};
use crate::framework::ResourceClient;
use crate::model::CartItem;
use crate::persistence::CartPersistence;
use crate::storage::KeyValueStore;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Owns a running cart: the cart actor and its persistence task.
///
/// `CartProvider` is responsible for:
/// - **Lifecycle Management**: Starting the actor and the writer, and stopping both
/// - **Scoping**: Every [`CartClient`] handed out by [`cart`](Self::cart) works only while the
///   provider is running; afterwards it fails with [`CartError::NoProvider`]
/// - **Hydration**: Loading the persisted cart in the background on start
///
/// Dropping a provider without [`shutdown`](Self::shutdown) also ends the scope: the actor is
/// aborted and the writer stores the last cart on its own, but nobody waits for it.
///
/// # Example
///
/// ```ignore
/// let config = CartConfig::load()?;
/// let provider = CartProvider::start(&config, config.open_storage()?)?;
///
/// let cart = provider.cart();
/// cart.add_to_cart(CartItemDraft::new("a", "Shirt", "u", 10.0)).await?;
///
/// // Stops the actor and waits for the final write
/// provider.shutdown().await?;
/// ```
pub struct CartProvider {
    client: ResourceClient<CartItem>,

    /// Flips to `true` once the persisted cart has been applied.
    loaded: watch::Receiver<bool>,

    /// Task handles, taken by `shutdown`. Whatever is left is aborted on drop.
    actor: Option<JoinHandle<()>>,
    writer: Option<JoinHandle<()>>,
}

impl CartProvider {
    /// Spawns the cart actor and its persistence task on the current Tokio runtime.
    ///
    /// Returns immediately. The cart starts empty and picks up the persisted collection once
    /// the background load resolves (see [`wait_loaded`](Self::wait_loaded)).
    ///
    /// Fails without spawning anything if `config` does not validate.
    pub fn start(config: &CartConfig, store: Arc<dyn KeyValueStore>) -> Result<Self, ConfigError> {
        config.validate()?;
        let (actor, client) = cart_actor::new(config.buffer_size);

        // Subscribe before the actor runs so the writer sees every mutation.
        let updates = client.subscribe();
        let (loaded_tx, loaded) = watch::channel(false);
        let persistence = CartPersistence::new(
            store,
            config.storage_key.clone(),
            config.write_debounce(),
        );

        let actor_handle = tokio::spawn(actor.run());
        let writer_handle = tokio::spawn(persistence.run(client.clone(), updates, loaded_tx));

        info!(key = %config.storage_key, "Cart provider started");

        Ok(Self {
            client,
            loaded,
            actor: Some(actor_handle),
            writer: Some(writer_handle),
        })
    }

    /// A handle to the cart. Cheap to clone and share across tasks.
    pub fn cart(&self) -> CartClient {
        CartClient::new(self.client.clone())
    }

    /// Waits until the persisted cart has been applied, or the load was abandoned.
    pub async fn wait_loaded(&self) {
        let mut loaded = self.loaded.clone();
        let _ = loaded.wait_for(|done| *done).await;
    }

    /// Gracefully shuts the cart down.
    ///
    /// 1. Stops the actor; clients handed out earlier now fail with `NoProvider`
    /// 2. Waits for the writer to store the final cart
    /// 3. Returns an error if either task panicked
    pub async fn shutdown(mut self) -> Result<(), CartError> {
        info!("Shutting down cart...");

        if let Err(e) = self.client.stop().await {
            warn!(error = %e, "Cart actor already stopped");
        }

        for handle in [self.actor.take(), self.writer.take()].into_iter().flatten() {
            if let Err(e) = handle.await {
                error!("Cart task failed: {:?}", e);
                return Err(CartError::ActorCommunicationError(format!(
                    "Cart task failed: {:?}",
                    e
                )));
            }
        }

        info!("Cart shutdown complete.");
        Ok(())
    }
}

impl Drop for CartProvider {
    fn drop(&mut self) {
        // The writer ends by itself once the actor's snapshot channel closes.
        if let Some(actor) = self.actor.take() {
            debug!("Cart provider dropped without shutdown, aborting actor");
            actor.abort();
        }
    }
}
