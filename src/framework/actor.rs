//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the component that owns an ordered collection of
//! entities. It implements the "Server" side of the Actor Model, processing messages
//! sequentially and ensuring exclusive access to the collection.

use crate::framework::client::ResourceClient;
use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use crate::framework::message::ResourceRequest;
use crate::framework::snapshot::Snapshot;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// The generic actor that manages an ordered collection of entities.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the state (`store`), the receiver end
/// of the request channel and the sender end of the snapshot channel.
///
/// **Concurrency Model**:
/// The actor processes its messages *sequentially* in a loop, so the `store` needs no `Mutex`.
/// Readers never touch the store directly: they see the last [`Snapshot`] the actor published.
///
/// # Operations
///
/// * **Upsert**: finds the item with `T::id_of(params)`; merges via `on_upsert` if present,
///   otherwise builds it with `from_create_params` and appends it. Order of existing items is
///   never changed.
/// * **Action**: runs `handle_action` on the matching item, then drops every item that is no
///   longer retained.
/// * **Hydrate**: persisted items form the base; items already in memory are folded into the
///   persisted item with the same id (`merge_local`) and are appended otherwise.
///
/// Every successful mutation bumps the revision and publishes a new snapshot *before* replying,
/// so a caller that awaited the reply always reads its own write.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: Vec<T>,
    state: watch::Sender<Snapshot<T>>,
    revision: u64,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (state, updates) = watch::channel(Snapshot::empty());
        let actor = Self {
            receiver,
            store: Vec::new(),
            state,
            revision: 0,
        };
        let client = ResourceClient::new(sender, updates);
        (actor, client)
    }

    /// Runs the actor's event loop until the channel closes or a `Stop` request arrives.
    pub async fn run(mut self) {
        // Extract just the type name (e.g., "CartItem" instead of "cart_store::model::cart_item::CartItem")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Upsert { params, respond_to } => {
                    debug!(entity_type, ?params, "Upsert");
                    let result = self.upsert(params);
                    match &result {
                        Ok(item) => {
                            info!(entity_type, id = %item.id(), size = self.store.len(), "Upserted")
                        }
                        Err(e) => warn!(entity_type, error = %e, "Upsert failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.iter().find(|item| item.id() == &id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "List");
                    let _ = respond_to.send(Ok(self.store.clone()));
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let result = self.action(&id, action);
                    match &result {
                        Ok(_) => info!(entity_type, %id, size = self.store.len(), "Action ok"),
                        Err(FrameworkError::NotFound(_)) => debug!(entity_type, %id, "Not found"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Hydrate { items, respond_to } => {
                    let loaded = items.len();
                    self.hydrate(items);
                    info!(entity_type, loaded, size = self.store.len(), "Hydrated");
                    let _ = respond_to.send(Ok(self.store.len()));
                }
                ResourceRequest::Stop { respond_to } => {
                    info!(entity_type, "Stop requested");
                    let _ = respond_to.send(Ok(()));
                    break;
                }
            }
        }

        info!(entity_type, size = self.store.len(), revision = self.revision, "Shutdown");
    }

    fn upsert(&mut self, params: T::Create) -> Result<T, FrameworkError> {
        let id = T::id_of(&params).clone();
        let item = match self.store.iter_mut().find(|item| item.id() == &id) {
            Some(existing) => {
                existing
                    .on_upsert(params)
                    .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;
                existing.clone()
            }
            None => {
                let item = T::from_create_params(params)
                    .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;
                self.store.push(item.clone());
                item
            }
        };
        self.publish();
        Ok(item)
    }

    fn action(&mut self, id: &T::Id, action: T::Action) -> Result<T::ActionResult, FrameworkError> {
        let item = self
            .store
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        let result = item
            .handle_action(action)
            .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;
        self.store.retain(T::is_retained);
        self.publish();
        Ok(result)
    }

    fn hydrate(&mut self, items: Vec<T>) {
        let mut merged: Vec<T> = Vec::with_capacity(items.len() + self.store.len());
        for item in items {
            if item.is_retained() && !merged.iter().any(|kept| kept.id() == item.id()) {
                merged.push(item);
            }
        }
        for local in self.store.drain(..) {
            match merged.iter_mut().find(|kept| kept.id() == local.id()) {
                Some(slot) => slot.merge_local(local),
                None => merged.push(local),
            }
        }
        self.store = merged;
        self.publish();
    }

    fn publish(&mut self) {
        self.revision += 1;
        self.state.send_replace(Snapshot {
            revision: self.revision,
            items: Arc::new(self.store.clone()),
        });
    }
}
