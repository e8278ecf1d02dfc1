use cart_store::cart_actor::CartError;
use cart_store::clients::CartClient;
use cart_store::config::{CartConfig, ConfigError};
use cart_store::lifecycle::CartProvider;
use cart_store::model::{CartItem, CartItemDraft};
use cart_store::storage::MemoryStorage;
use std::sync::Arc;

fn start() -> CartProvider {
    CartProvider::start(&CartConfig::default(), Arc::new(MemoryStorage::new())).unwrap()
}

fn draft(id: &str) -> CartItemDraft {
    CartItemDraft::new(id, "Shirt", "u", 10.0)
}

fn quantities(cart: &CartClient) -> Vec<(String, u32)> {
    cart.products()
        .expect("cart is running")
        .iter()
        .map(|item| (item.id.to_string(), item.quantity))
        .collect()
}

/// The storefront sequence: add, add again, then take both units away.
#[tokio::test]
async fn test_add_twice_then_decrement_to_empty() {
    let provider = start();
    let cart = provider.cart();
    assert!(cart.products().unwrap().is_empty());

    cart.add_to_cart(draft("a")).await.unwrap();
    assert_eq!(
        *cart.products().unwrap(),
        vec![CartItem::new("a", "Shirt", "u", 10.0, 1)]
    );

    cart.add_to_cart(draft("a")).await.unwrap();
    assert_eq!(quantities(&cart), vec![("a".into(), 2)]);

    assert_eq!(cart.decrement("a").await.unwrap(), Some(1));
    assert_eq!(quantities(&cart), vec![("a".into(), 1)]);

    assert_eq!(cart.decrement("a").await.unwrap(), Some(0));
    assert!(cart.products().unwrap().is_empty());

    provider.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_distinct_adds_keep_order_with_quantity_one() {
    let provider = start();
    let cart = provider.cart();

    for id in ["c", "a", "b", "d"] {
        cart.add_to_cart(draft(id)).await.unwrap();
    }

    assert_eq!(
        quantities(&cart),
        vec![
            ("c".into(), 1),
            ("a".into(), 1),
            ("b".into(), 1),
            ("d".into(), 1)
        ]
    );
    provider.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_second_add_takes_new_fields_and_keeps_position() {
    let provider = start();
    let cart = provider.cart();

    cart.add_to_cart(draft("a")).await.unwrap();
    cart.add_to_cart(draft("b")).await.unwrap();
    let updated = cart
        .add_to_cart(CartItemDraft::new("a", "Shirt (sale)", "u2", 7.5))
        .await
        .unwrap();

    assert_eq!(updated, CartItem::new("a", "Shirt (sale)", "u2", 7.5, 2));
    assert_eq!(cart.products().unwrap()[0], updated);
    assert_eq!(cart.products().unwrap().len(), 2);

    provider.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_increment_then_decrement_restores_quantity() {
    let provider = start();
    let cart = provider.cart();

    cart.add_to_cart(draft("a")).await.unwrap();
    cart.add_to_cart(draft("b")).await.unwrap();

    assert_eq!(cart.increment("a").await.unwrap(), Some(2));
    assert_eq!(cart.decrement("a").await.unwrap(), Some(1));
    assert_eq!(quantities(&cart), vec![("a".into(), 1), ("b".into(), 1)]);

    assert_eq!(cart.decrement("a").await.unwrap(), Some(0));
    assert_eq!(quantities(&cart), vec![("b".into(), 1)]);

    provider.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unknown_id_leaves_cart_unchanged() {
    let provider = start();
    let cart = provider.cart();
    cart.add_to_cart(draft("a")).await.unwrap();
    let before = cart.products().unwrap();

    assert_eq!(cart.increment("ghost").await.unwrap(), None);
    assert_eq!(cart.decrement("ghost").await.unwrap(), None);

    assert_eq!(cart.products().unwrap(), before);
    provider.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_invalid_item_is_rejected() {
    let provider = start();
    let cart = provider.cart();

    let err = cart
        .add_to_cart(CartItemDraft::new("a", "Shirt", "u", -3.0))
        .await
        .unwrap_err();
    assert!(matches!(err, CartError::InvalidItem(_)));
    assert!(cart.products().unwrap().is_empty());

    provider.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_listeners_see_every_change() {
    let provider = start();
    let cart = provider.cart();
    let mut subscription = cart.subscribe().unwrap();

    cart.add_to_cart(draft("a")).await.unwrap();
    let seen = subscription.changed().await.unwrap();
    assert_eq!(seen.len(), 1);

    cart.decrement("a").await.unwrap();
    let seen = subscription.changed().await.unwrap();
    assert!(seen.is_empty());
    assert_eq!(subscription.current(), seen);

    provider.shutdown().await.unwrap();
    assert!(subscription.changed().await.is_none());
}

#[tokio::test]
async fn test_totals() {
    let provider = start();
    let cart = provider.cart();

    cart.add_to_cart(draft("a")).await.unwrap();
    cart.add_to_cart(draft("a")).await.unwrap();
    cart.add_to_cart(CartItemDraft::new("b", "Mug", "v", 2.5))
        .await
        .unwrap();

    let totals = cart.totals().unwrap();
    assert_eq!(totals.item_count, 3);
    assert_eq!(totals.value, 22.5);

    provider.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_cart_outside_provider_fails() {
    let provider = start();
    let cart = provider.cart();
    provider.shutdown().await.unwrap();

    let err = cart.add_to_cart(draft("a")).await.unwrap_err();
    assert_eq!(err, CartError::NoProvider);
    assert_eq!(err.to_string(), "cart must be used within a CartProvider");
    assert_eq!(cart.products(), Err(CartError::NoProvider));
    assert_eq!(cart.increment("a").await, Err(CartError::NoProvider));
    assert_eq!(cart.decrement("a").await, Err(CartError::NoProvider));
    assert!(cart.listen(|_| {}).is_err());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_clients() {
    let provider = start();
    let mut tasks = Vec::new();

    for _ in 0..8 {
        let cart = provider.cart();
        tasks.push(tokio::spawn(async move {
            for _ in 0..25 {
                cart.add_to_cart(draft("a")).await.unwrap();
            }
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    assert_eq!(quantities(&provider.cart()), vec![("a".into(), 200)]);
    provider.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_zero_buffer_is_rejected() {
    let config = CartConfig {
        buffer_size: 0,
        ..CartConfig::default()
    };

    let result = CartProvider::start(&config, Arc::new(MemoryStorage::new()));
    assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
}

#[tokio::test]
async fn test_dropping_provider_ends_scope() {
    let provider = start();
    let cart = provider.cart();
    cart.add_to_cart(draft("a")).await.unwrap();

    drop(provider);

    assert_eq!(cart.add_to_cart(draft("a")).await, Err(CartError::NoProvider));
    assert_eq!(cart.products(), Err(CartError::NoProvider));
}
