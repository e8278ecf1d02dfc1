//! # Generic Messages
//!
//! This module defines the generic message types used for communication between
//! the `ResourceClient` and `ResourceActor`.

use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// # The Collection Pattern
/// The actor manages one ordered collection of [`ActorEntity`] items. The variants map onto
/// the operations any such collection needs:
///
/// - **Upsert**: Insert a new item, or merge the payload into the item with the same id.
/// - **Get / List**: Read one item by id, or the whole collection in order.
/// - **Action**: Run a custom [`ActorEntity::Action`] on one item. Items that are no longer
///   [retained](ActorEntity::is_retained) afterwards are removed.
/// - **Hydrate**: Merge a previously persisted collection into the live one.
/// - **Stop**: End the actor loop. Requests queued behind it are dropped.
///
/// Because the enum is generic over `T: ActorEntity`, a `CartItem` actor can only ever receive
/// `CartItemDraft` payloads and `CartAction`s.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Upsert {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    Hydrate {
        items: Vec<T>,
        respond_to: Response<usize>,
    },
    Stop {
        respond_to: Response<()>,
    },
}
