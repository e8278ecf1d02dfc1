//! Pure data structures (DTOs); [`CartItem`] implements the [`ActorEntity`](crate::framework::ActorEntity) trait.

pub mod cart_item;

pub use cart_item::*;
