//! # ActorEntity Trait
//!
//! The `ActorEntity` trait defines the contract that every collection item must implement to be
//! managed by the generic `ResourceActor`. It specifies associated types for IDs, upsert payloads,
//! actions and errors, and provides the hooks the actor calls while it mutates its ordered store
//! (`from_create_params`, `on_upsert`, `handle_action`, `is_retained`).
//!
//! # Architecture Note
//! The actor owns an *ordered* collection keyed by [`ActorEntity::Id`]. Unlike a generated-ID
//! store, the identity of a new item comes from its payload ([`ActorEntity::id_of`]), which is
//! what makes "insert or merge" (upsert) expressible as a single request.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::is_retained`] defaults to `true`. Override it when an action can drive an
//!   item into a state where it must leave the collection (e.g. quantity reaching zero).
//! - [`ActorEntity::merge_local`] defaults to replacing the persisted item. Override it when
//!   changes made before hydration are deltas rather than full state.

use std::fmt::{Debug, Display};

/// Trait that any collection item must implement to be managed by `ResourceActor`.
///
/// We use "Associated Types" to enforce type safety: a `CartItem` collection accepts only
/// `CartItemDraft` payloads and `CartAction`s, and the compiler rejects anything else.
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity within the collection.
    type Id: Eq + Clone + Send + Sync + Display + Debug;

    /// The payload of an upsert request (DTO - Data Transfer Object).
    type Create: Send + Sync + Debug;

    /// Enum representing entity-specific operations (e.g., `Increment`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The error type for this entity.
    ///
    /// One error enum per entity rather than per action keeps clients simple: they match on a
    /// single type regardless of which request failed.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The identifier of this entity.
    fn id(&self) -> &Self::Id;

    /// The identifier an upsert payload targets.
    fn id_of(params: &Self::Create) -> &Self::Id;

    /// Construct a new entity from an upsert payload whose id is not in the collection yet.
    fn from_create_params(params: Self::Create) -> Result<Self, Self::Error>;

    /// Merge an upsert payload into the existing entity with the same id.
    ///
    /// Implementations must leave `self` untouched when they return an error.
    fn on_upsert(&mut self, params: Self::Create) -> Result<(), Self::Error>;

    /// Handle a custom entity-specific action.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;

    /// Whether the entity stays in the collection. Checked after every action and on hydration.
    fn is_retained(&self) -> bool {
        true
    }

    /// Fold the in-memory copy of this entity into the persisted one during hydration.
    ///
    /// `self` is the persisted entity; `local` was built in memory, on top of an empty
    /// collection, before the persisted one arrived. The default keeps `local`.
    fn merge_local(&mut self, local: Self) {
        *self = local;
    }
}
