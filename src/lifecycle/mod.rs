//! Starting, scoping and stopping the cart.

pub mod cart_provider;
pub mod tracing;

pub use cart_provider::CartProvider;
