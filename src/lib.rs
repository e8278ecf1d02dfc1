//! # Cart Store
//!
//! > **A shopping cart that lives in an actor and survives restarts.**
//!
//! This crate holds the cart of a mobile storefront: an ordered list of line items with
//! add / increment / decrement operations, change notifications for the UI, and persistence
//! into a key-value store under a single namespaced key.
//!
//! ## 🏗️ Design
//!
//! The collection is owned by one Tokio task (a [`ResourceActor`](framework::ResourceActor))
//! that processes requests sequentially, so no lock ever guards the cart. After every mutation
//! the actor publishes an immutable [`Snapshot`](framework::Snapshot); UI code reads it
//! synchronously and subscribers are woken through a watch channel.
//!
//! Persistence follows the same channel. A single writer task per provider stores the latest
//! snapshot, which makes writes last-write-wins even under bursts of changes.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic actor, its client and the [`ActorEntity`](framework::ActorEntity) trait.
//! - **Role**: Separates the *business logic* (the cart item) from the *plumbing* (channels,
//!   message loop, snapshots, error handling).
//!
//! ### 2. The Cart ([`model`], [`cart_actor`])
//! [`CartItem`](model::CartItem) and its upsert / quantity rules.
//!
//! ### 3. The Interface ([`clients`])
//! [`CartClient`](clients::CartClient): `products`, `add_to_cart`, `increment`, `decrement`,
//! `subscribe`, `listen` and `totals`.
//!
//! ### 4. Persistence ([`storage`], [`persistence`])
//! The [`KeyValueStore`](storage::KeyValueStore) seam with memory and file backends, and the
//! loader / writer task.
//!
//! ### 5. The Orchestrator ([`lifecycle`], [`config`])
//! [`CartProvider`](lifecycle::CartProvider) starts, scopes and shuts down a cart configured by
//! [`CartConfig`](config::CartConfig). See [`lifecycle::tracing`] for logging.
//!
//! ## 🚀 Quick Start
//!
//! ```rust
//! use cart_store::config::CartConfig;
//! use cart_store::lifecycle::CartProvider;
//! use cart_store::model::CartItemDraft;
//! use cart_store::storage::MemoryStorage;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = CartProvider::start(&CartConfig::default(), Arc::new(MemoryStorage::new()))?;
//!     let cart = provider.cart();
//!
//!     cart.add_to_cart(CartItemDraft::new("shirt-01", "Shirt", "https://img/shirt.png", 10.0)).await?;
//!     cart.add_to_cart(CartItemDraft::new("shirt-01", "Shirt", "https://img/shirt.png", 10.0)).await?;
//!     assert_eq!(cart.products()?[0].quantity, 2);
//!
//!     provider.shutdown().await?;
//!     Ok(())
//! }
//! ```

pub mod cart_actor;
pub mod clients;
pub mod config;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod persistence;
pub mod storage;
