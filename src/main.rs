//! # Cart Store demo
//!
//! Runs a short scripted session against the configured storage: adds a product twice, adds a
//! second one, takes one unit away and prints the totals. With the `file` backend the cart is
//! still there on the next run.

use cart_store::config::CartConfig;
use cart_store::lifecycle::tracing::setup_tracing;
use cart_store::lifecycle::CartProvider;
use cart_store::model::{CartItemDraft, CartTotals};
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = CartConfig::load().map_err(|e| e.to_string())?;
    let storage = config.open_storage().map_err(|e| e.to_string())?;
    info!(config = ?config.storage, "Starting cart");

    let provider = CartProvider::start(&config, storage).map_err(|e| e.to_string())?;
    let cart = provider.cart();

    // Re-render stand-in: print every new cart.
    let listener = cart
        .listen(|items| {
            let totals = CartTotals::of(items);
            info!(lines = items.len(), units = totals.item_count, value = totals.value, "Cart changed");
        })
        .map_err(|e| e.to_string())?;

    provider.wait_loaded().await;
    info!(restored = cart.products().map_err(|e| e.to_string())?.len(), "Persisted cart loaded");

    let shirt = CartItemDraft::new("shirt-01", "Camiseta", "https://img/shirt-01.png", 89.9);
    let mug = CartItemDraft::new("mug-02", "Caneca", "https://img/mug-02.png", 25.0);

    let span = tracing::info_span!("shopping");
    async {
        cart.add_to_cart(shirt.clone()).await?;
        cart.add_to_cart(shirt).await?;
        cart.add_to_cart(mug).await?;
        cart.decrement("mug-02").await?;
        cart.increment("shirt-01").await
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    let totals = cart.totals().map_err(|e| e.to_string())?;
    for item in cart.products().map_err(|e| e.to_string())?.iter() {
        info!(id = %item.id, title = %item.title, quantity = item.quantity, subtotal = item.subtotal(), "Line");
    }
    info!(units = totals.item_count, value = totals.value, "Totals");

    provider.shutdown().await.map_err(|e| e.to_string())?;
    listener.await.map_err(|e| e.to_string())?;

    Ok(())
}
