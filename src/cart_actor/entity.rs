//! ActorEntity trait implementation for the CartItem model.
//!
//! This module contains the [`ActorEntity`] implementation that lets [`CartItem`] be managed by
//! the generic [`ResourceActor`](crate::framework::ResourceActor):
//!
//! - **Upsert** (`add_to_cart`): a new id enters with quantity 1; a known id takes the draft's
//!   fields and keeps its quantity plus one.
//! - **Actions**: [`CartAction::Increment`] and [`CartAction::Decrement`].
//! - **Retention**: a line with quantity 0 is dropped by the actor.
//! - **Hydration**: units added before the persisted cart loaded are added to its quantities.

use super::actions::CartAction;
use super::error::CartError;
use crate::framework::ActorEntity;
use crate::model::{CartItem, CartItemDraft, ProductId};

impl ActorEntity for CartItem {
    type Id = ProductId;
    type Create = CartItemDraft;
    type Action = CartAction;
    type ActionResult = u32;
    type Error = CartError;

    fn id(&self) -> &ProductId {
        &self.id
    }

    fn id_of(params: &CartItemDraft) -> &ProductId {
        &params.id
    }

    fn from_create_params(params: CartItemDraft) -> Result<Self, CartError> {
        params.validate()?;
        Ok(CartItem::from_draft(params, 1))
    }

    /// Refreshes every field from the draft and bumps the quantity.
    fn on_upsert(&mut self, params: CartItemDraft) -> Result<(), CartError> {
        params.validate()?;
        let quantity = self.next_quantity()?;
        *self = CartItem::from_draft(params, quantity);
        Ok(())
    }

    fn handle_action(&mut self, action: CartAction) -> Result<u32, CartError> {
        self.quantity = match action {
            CartAction::Increment => self.next_quantity()?,
            CartAction::Decrement => self.quantity.saturating_sub(1),
        };
        Ok(self.quantity)
    }

    fn is_retained(&self) -> bool {
        self.quantity > 0
    }

    /// Units added before the persisted cart arrived come on top of the persisted ones. The
    /// fields are the in-memory ones, as a later `add_to_cart` would have set them.
    fn merge_local(&mut self, local: Self) {
        let quantity = self.quantity.saturating_add(local.quantity);
        *self = CartItem { quantity, ..local };
    }
}

impl CartItem {
    fn next_quantity(&self) -> Result<u32, CartError> {
        self.quantity
            .checked_add(1)
            .ok_or_else(|| CartError::QuantityOverflow(self.id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shirt() -> CartItemDraft {
        CartItemDraft::new("a", "Shirt", "u", 10.0)
    }

    #[test]
    fn test_upsert_refreshes_fields_and_keeps_quantity() {
        let mut item = CartItem::from_create_params(shirt()).unwrap();
        assert_eq!(item.quantity, 1);

        item.on_upsert(CartItemDraft::new("a", "Blue Shirt", "u2", 12.0))
            .unwrap();
        assert_eq!(item, CartItem::new("a", "Blue Shirt", "u2", 12.0, 2));
    }

    #[test]
    fn test_invalid_upsert_leaves_item_untouched() {
        let mut item = CartItem::new("a", "Shirt", "u", 10.0, 3);
        let err = item
            .on_upsert(CartItemDraft::new("a", "Shirt", "u", -5.0))
            .unwrap_err();
        assert!(matches!(err, CartError::InvalidItem(_)));
        assert_eq!(item, CartItem::new("a", "Shirt", "u", 10.0, 3));
    }

    #[test]
    fn test_quantity_actions() {
        let mut item = CartItem::from_create_params(shirt()).unwrap();
        assert_eq!(item.handle_action(CartAction::Increment).unwrap(), 2);
        assert_eq!(item.handle_action(CartAction::Decrement).unwrap(), 1);
        assert!(item.is_retained());
        assert_eq!(item.handle_action(CartAction::Decrement).unwrap(), 0);
        assert!(!item.is_retained());
    }

    #[test]
    fn test_local_units_add_to_persisted_units() {
        let mut persisted = CartItem::new("a", "Shirt", "u", 10.0, 3);
        persisted.merge_local(CartItem::new("a", "Shirt (sale)", "u2", 8.0, 1));
        assert_eq!(persisted, CartItem::new("a", "Shirt (sale)", "u2", 8.0, 4));

        let mut full = CartItem::new("a", "Shirt", "u", 10.0, u32::MAX);
        full.merge_local(CartItem::new("a", "Shirt", "u", 10.0, 2));
        assert_eq!(full.quantity, u32::MAX);
    }

    #[test]
    fn test_quantity_overflow() {
        let mut item = CartItem::new("a", "Shirt", "u", 10.0, u32::MAX);
        assert_eq!(
            item.handle_action(CartAction::Increment),
            Err(CartError::QuantityOverflow("a".to_string()))
        );
        assert_eq!(item.quantity, u32::MAX);
        assert!(item.on_upsert(shirt()).is_err());
    }
}
