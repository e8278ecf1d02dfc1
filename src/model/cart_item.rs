use serde::{Deserialize, Serialize};

use std::fmt::Display;

use crate::cart_actor::CartError;

/// Type-safe identifier for catalogue products.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Represents one line of the shopping cart.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](crate::framework::ResourceActor).
///
/// See [`impl ActorEntity for CartItem`](#impl-ActorEntity-for-CartItem) for details on:
/// - Upsert payloads ([`CartItemDraft`])
/// - Custom actions ([`CartAction`](crate::cart_actor::CartAction))
///
/// `quantity` is at least 1 for every item held by the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub title: String,
    pub image_url: String,
    pub price: f64,
    pub quantity: u32,
}

impl CartItem {
    /// Creates a new CartItem instance.
    ///
    /// # Arguments
    /// * `id` - Catalogue identifier of the product
    /// * `title` - Display title
    /// * `image_url` - Image reference
    /// * `price` - Unit price
    /// * `quantity` - Units in the cart
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price: f64,
        quantity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image_url: image_url.into(),
            price,
            quantity,
        }
    }

    pub(crate) fn from_draft(draft: CartItemDraft, quantity: u32) -> Self {
        Self {
            id: draft.id,
            title: draft.title,
            image_url: draft.image_url,
            price: draft.price,
            quantity,
        }
    }

    /// Checks a line that did not come through `add_to_cart`, e.g. one read back from storage.
    pub fn validate(&self) -> Result<(), CartError> {
        validate_fields(&self.id, self.price)?;
        if self.quantity == 0 {
            return Err(CartError::InvalidItem(format!("{} has quantity 0", self.id)));
        }
        Ok(())
    }

    /// Price of this line (unit price times quantity).
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// A cart item without quantity: the payload of `add_to_cart`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItemDraft {
    pub id: ProductId,
    pub title: String,
    pub image_url: String,
    pub price: f64,
}

impl CartItemDraft {
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image_url: image_url.into(),
            price,
        }
    }

    /// Rejects drafts the cart must never hold: an empty id, or a price that is negative or
    /// not a finite number.
    pub fn validate(&self) -> Result<(), CartError> {
        validate_fields(&self.id, self.price)
    }
}

fn validate_fields(id: &ProductId, price: f64) -> Result<(), CartError> {
    if id.as_str().trim().is_empty() {
        return Err(CartError::InvalidItem("empty product id".to_string()));
    }
    if !price.is_finite() || price < 0.0 {
        return Err(CartError::InvalidItem(format!(
            "price {price} for {id} is not a non-negative number"
        )));
    }
    Ok(())
}

/// Aggregates shown next to the cart: units and total value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CartTotals {
    pub item_count: u32,
    pub value: f64,
}

impl CartTotals {
    pub fn of(items: &[CartItem]) -> Self {
        items.iter().fold(Self::default(), |acc, item| Self {
            item_count: acc.item_count.saturating_add(item.quantity),
            value: acc.value + item.subtotal(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_validation() {
        assert!(CartItemDraft::new("a", "Shirt", "u", 10.0).validate().is_ok());
        assert!(CartItemDraft::new("a", "Free sample", "u", 0.0).validate().is_ok());

        for bad in [
            CartItemDraft::new("  ", "Shirt", "u", 10.0),
            CartItemDraft::new("a", "Shirt", "u", -1.0),
            CartItemDraft::new("a", "Shirt", "u", f64::NAN),
            CartItemDraft::new("a", "Shirt", "u", f64::INFINITY),
        ] {
            assert!(
                matches!(bad.validate(), Err(CartError::InvalidItem(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_stored_item_validation() {
        assert!(CartItem::new("a", "Shirt", "u", 10.0, 2).validate().is_ok());
        assert!(CartItem::new("", "Shirt", "u", 10.0, 2).validate().is_err());
        assert!(CartItem::new("a", "Shirt", "u", -0.5, 2).validate().is_err());
        assert!(CartItem::new("a", "Shirt", "u", 10.0, 0).validate().is_err());
    }

    #[test]
    fn test_totals() {
        let items = vec![
            CartItem::new("a", "Shirt", "u", 10.0, 2),
            CartItem::new("b", "Mug", "v", 2.5, 3),
        ];
        let totals = CartTotals::of(&items);
        assert_eq!(totals.item_count, 5);
        assert_eq!(totals.value, 27.5);
        assert_eq!(CartTotals::of(&[]), CartTotals::default());
    }

    #[test]
    fn test_serialized_shape() {
        let item = CartItem::new("a", "Shirt", "u", 10.0, 1);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "a",
                "title": "Shirt",
                "image_url": "u",
                "price": 10.0,
                "quantity": 1
            })
        );
    }
}
