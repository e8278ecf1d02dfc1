//! Generic actor framework for ordered collections.
//!
//! This module provides the building blocks for running a collection of entities behind a
//! single actor: upsert, lookup, custom actions, hydration from persisted state, and snapshot
//! publication for readers and subscribers.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that item types implement to be managed by an actor
//! - [`ResourceActor`] - Generic actor that owns the ordered collection
//! - [`ResourceClient`] - Type-safe, cloneable handle for sending requests
//! - [`ActorClient`] - Trait giving typed clients default `get` / `list`
//! - [`Snapshot`] - Read-only view published after every mutation
//! - [`FrameworkError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning full actors.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod snapshot;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
pub use snapshot::Snapshot;
