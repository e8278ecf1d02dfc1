//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//! Log levels are taken from the `RUST_LOG` environment variable.
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: startup, stop requests and final collection size
//! - **Cart Operations**: upserts, quantity actions and hydration, with the product id
//! - **Persistence**: loads, writes (revision and item count) and storage failures
//!
//! ## Usage Examples
//!
//! ```bash
//! # Compact logs
//! RUST_LOG=info cargo run
//!
//! # Show request payloads and every write
//! RUST_LOG=debug cargo run
//!
//! # Only the persistence layer
//! RUST_LOG=cart_store::persistence=debug cargo run
//! ```
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO Actor started entity_type="CartItem"
//! INFO Cart provider started key=@GoMarketplace:cartProducts
//! INFO Upserted entity_type="CartItem" id=shirt-01 size=1
//! INFO Action ok entity_type="CartItem" id=shirt-01 size=1
//! ```
//!
//! **With `RUST_LOG=debug`**, client spans show up inline:
//!
//! ```text
//! DEBUG add_to_cart{id=shirt-01}: Sending request
//! DEBUG Upsert entity_type="CartItem" params=CartItemDraft { id: ProductId("shirt-01"), .. }
//! DEBUG Persisted cart key=@GoMarketplace:cartProducts revision=2 items=1
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type and key fields identify the source
        .compact()
        .init();
}
