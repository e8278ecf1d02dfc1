//! Custom actions for the Cart actor.
//!
//! These actions change the quantity of a single [`CartItem`](crate::model::CartItem).
//! They are handled by [`ActorEntity::handle_action`](crate::framework::ActorEntity::handle_action);
//! the action result is the item's quantity afterwards.

/// Quantity operations on one cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAction {
    /// Adds one unit.
    ///
    /// # Errors
    /// Fails with [`CartError::QuantityOverflow`](super::CartError::QuantityOverflow) at `u32::MAX`.
    Increment,
    /// Removes one unit. A line that reaches zero leaves the cart.
    Decrement,
}
