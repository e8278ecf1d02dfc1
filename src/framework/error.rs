//! # Framework Errors
//!
//! Common error types used throughout the actor framework. Typed clients map these into their
//! own domain errors (see [`ActorClient::map_error`](crate::framework::ActorClient::map_error)).

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}
