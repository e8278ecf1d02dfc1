//! # Generic Client
//!
//! This module defines the generic client for communicating with actors.

use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use crate::framework::message::ResourceRequest;
use crate::framework::snapshot::Snapshot;
use tokio::sync::{mpsc, oneshot, watch};

/// ## ResourceClient
///
/// The `ResourceClient<T>` provides a type-safe, async API for interacting with a
/// `ResourceActor<T>`. Requests travel over a Tokio mpsc channel and replies come back on
/// oneshot channels. Reads of the current collection do not go through the actor at all: they
/// borrow the latest [`Snapshot`] from the actor's watch channel.
///
/// * **Cloneable** – holds only a sender and a watch receiver, so cloning is inexpensive.
/// * **Scoped** – once the actor has stopped, every method fails with
///   [`FrameworkError::ActorClosed`], including the synchronous snapshot read.
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
    updates: watch::Receiver<Snapshot<T>>,
}

// Manual impl: deriving would require `T: Clone` on the request payloads as well.
impl<T: ActorEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            updates: self.updates.clone(),
        }
    }
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(
        sender: mpsc::Sender<ResourceRequest<T>>,
        updates: watch::Receiver<Snapshot<T>>,
    ) -> Self {
        Self { sender, updates }
    }

    pub async fn upsert(&self, params: T::Create) -> Result<T, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Upsert { params, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Get { id, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::List { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Action {
                id,
                action,
                respond_to,
            })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Merge a previously persisted collection into the actor's store.
    ///
    /// Returns the collection size after the merge.
    pub async fn hydrate(&self, items: Vec<T>) -> Result<usize, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Hydrate { items, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Ask the actor to leave its loop. Other clones see `ActorClosed` afterwards.
    pub async fn stop(&self) -> Result<(), FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Stop { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> Result<Snapshot<T>, FrameworkError> {
        if self.sender.is_closed() {
            return Err(FrameworkError::ActorClosed);
        }
        Ok(self.updates.borrow().clone())
    }

    /// A receiver that is notified on every publish after this call.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot<T>> {
        let mut updates = self.updates.clone();
        updates.mark_unchanged();
        updates
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}
