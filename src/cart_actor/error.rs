//! Error types for the Cart actor.

use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// The cart handle was used without an active provider (never started, or shut down).
    #[error("cart must be used within a CartProvider")]
    NoProvider,

    /// The item was rejected before it reached the cart.
    #[error("Invalid cart item: {0}")]
    InvalidItem(String),

    /// The quantity of the item cannot grow any further.
    #[error("Quantity overflow for item {0}")]
    QuantityOverflow(String),

    /// The requested item is not in the cart.
    #[error("Cart item not found: {0}")]
    NotFound(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for CartError {
    fn from(msg: String) -> Self {
        CartError::ActorCommunicationError(msg)
    }
}
