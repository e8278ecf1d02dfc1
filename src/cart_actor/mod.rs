//! # Cart Actor
//!
//! This module implements the shopping-cart resource actor.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`CartItem`]
//! - [`error`] - [`CartError`] type for type-safe error handling
//! - [`actions`] - [`CartAction`] for quantity changes
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use cart_store::cart_actor;
//! use cart_store::clients::CartClient;
//! use cart_store::model::CartItemDraft;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = cart_actor::new(cart_actor::DEFAULT_BUFFER_SIZE);
//!     let cart = CartClient::new(generic_client);
//!     tokio::spawn(actor.run());
//!
//!     cart.add_to_cart(CartItemDraft::new("a", "Shirt", "u", 10.0)).await?;
//!     assert_eq!(cart.increment("a").await?, Some(2));
//!     Ok(())
//! }
//! ```
//!
//! Without persistence this is an in-memory cart; [`CartProvider`](crate::lifecycle::CartProvider)
//! adds hydration and the storage writer.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::framework::{ResourceActor, ResourceClient};
use crate::model::CartItem;

/// Request queue capacity used when the configuration does not override it.
pub const DEFAULT_BUFFER_SIZE: usize = 32;

/// Creates a new Cart actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<CartItem>, ResourceClient<CartItem>) {
    ResourceActor::new(buffer_size)
}
