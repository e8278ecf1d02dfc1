//! # Cart Client
//!
//! Provides the consumer-facing API of the cart: the current products, `add_to_cart`,
//! `increment` and `decrement`, plus change subscriptions. It wraps a
//! `ResourceClient<CartItem>` handed out by a [`CartProvider`](crate::lifecycle::CartProvider).
use crate::cart_actor::{CartAction, CartError};
use crate::framework::{ActorClient, FrameworkError, ResourceClient, Snapshot};
use crate::model::{CartItem, CartItemDraft, CartTotals, ProductId};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, instrument};

/// Client for interacting with the Cart actor.
///
/// Every method fails with [`CartError::NoProvider`] once the provider that owns the actor has
/// shut down.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<CartItem>,
}

impl CartClient {
    pub fn new(inner: ResourceClient<CartItem>) -> Self {
        Self { inner }
    }

    /// The cart as of the last completed operation.
    pub fn products(&self) -> Result<Arc<Vec<CartItem>>, CartError> {
        self.inner
            .snapshot()
            .map(|snapshot| snapshot.items)
            .map_err(Self::map_error)
    }

    /// Unit count and total value of the current cart.
    pub fn totals(&self) -> Result<CartTotals, CartError> {
        Ok(CartTotals::of(&self.products()?))
    }

    /// Adds one unit of `item`.
    ///
    /// A product already in the cart keeps its position and quantity plus one; its title, image
    /// and price are refreshed from `item`. Otherwise the product is appended with quantity 1.
    #[instrument(skip(self, item), fields(id = %item.id))]
    pub async fn add_to_cart(&self, item: CartItemDraft) -> Result<CartItem, CartError> {
        debug!("Sending request");
        self.inner.upsert(item).await.map_err(Self::map_error)
    }

    /// Adds one unit of the product `id`.
    ///
    /// Returns the new quantity, or `None` if the product is not in the cart.
    #[instrument(skip(self, id), fields(id))]
    pub async fn increment(&self, id: impl Into<ProductId>) -> Result<Option<u32>, CartError> {
        let id = id.into();
        tracing::Span::current().record("id", tracing::field::display(&id));
        self.quantity_action(id, CartAction::Increment).await
    }

    /// Removes one unit of the product `id`.
    ///
    /// Returns the remaining quantity (`Some(0)` when the line left the cart), or `None` if the
    /// product is not in the cart.
    #[instrument(skip(self, id), fields(id))]
    pub async fn decrement(&self, id: impl Into<ProductId>) -> Result<Option<u32>, CartError> {
        let id = id.into();
        tracing::Span::current().record("id", tracing::field::display(&id));
        self.quantity_action(id, CartAction::Decrement).await
    }

    async fn quantity_action(
        &self,
        id: ProductId,
        action: CartAction,
    ) -> Result<Option<u32>, CartError> {
        debug!(?action, "Sending request");
        match self.inner.perform_action(id, action).await {
            Ok(quantity) => Ok(Some(quantity)),
            Err(FrameworkError::NotFound(_)) => {
                debug!("Not in cart, nothing to do");
                Ok(None)
            }
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Subscribes to cart changes made after this call.
    pub fn subscribe(&self) -> Result<CartSubscription, CartError> {
        if self.inner.is_closed() {
            return Err(CartError::NoProvider);
        }
        Ok(CartSubscription {
            updates: self.inner.subscribe(),
        })
    }

    /// Calls `on_change` with the new cart after every change, until the provider shuts down.
    ///
    /// The returned task ends on its own once the provider is gone; abort it to unsubscribe
    /// earlier.
    pub fn listen<F>(&self, mut on_change: F) -> Result<JoinHandle<()>, CartError>
    where
        F: FnMut(&[CartItem]) + Send + 'static,
    {
        let mut subscription = self.subscribe()?;
        Ok(tokio::spawn(async move {
            while let Some(items) = subscription.changed().await {
                on_change(&items);
            }
        }))
    }
}

#[async_trait]
impl ActorClient<CartItem> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &ResourceClient<CartItem> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::ActorClosed | FrameworkError::ActorDropped => CartError::NoProvider,
            FrameworkError::NotFound(id) => CartError::NotFound(id),
            FrameworkError::EntityError(source) => match source.downcast::<CartError>() {
                Ok(cart_error) => *cart_error,
                Err(other) => CartError::ActorCommunicationError(other.to_string()),
            },
        }
    }
}

/// Stream of cart snapshots. Only the latest state is delivered; bursts of changes between two
/// polls collapse into one notification.
pub struct CartSubscription {
    updates: watch::Receiver<Snapshot<CartItem>>,
}

impl CartSubscription {
    /// The most recent cart, without waiting.
    pub fn current(&self) -> Arc<Vec<CartItem>> {
        Arc::clone(&self.updates.borrow().items)
    }

    /// Waits for the next change. Returns `None` once the provider has shut down.
    pub async fn changed(&mut self) -> Option<Arc<Vec<CartItem>>> {
        self.updates.changed().await.ok()?;
        Some(Arc::clone(&self.updates.borrow_and_update().items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_action, expect_upsert, MockClient};

    fn shirt() -> CartItemDraft {
        CartItemDraft::new("a", "Shirt", "u", 10.0)
    }

    #[tokio::test]
    async fn test_add_to_cart_sends_draft() {
        let (client, mut receiver) = create_mock_client::<CartItem>(10);
        let cart = CartClient::new(client);

        let add_task = tokio::spawn(async move { cart.add_to_cart(shirt()).await });

        let (draft, responder) = expect_upsert(&mut receiver)
            .await
            .expect("Expected Upsert request");
        assert_eq!(draft, shirt());
        responder
            .send(Ok(CartItem::new("a", "Shirt", "u", 10.0, 1)))
            .unwrap();

        let item = add_task.await.unwrap().unwrap();
        assert_eq!(item.quantity, 1);
    }

    #[tokio::test]
    async fn test_decrement_sends_action() {
        let (client, mut receiver) = create_mock_client::<CartItem>(10);
        let cart = CartClient::new(client);

        let task = tokio::spawn(async move { cart.decrement("a").await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, ProductId::from("a"));
        assert_eq!(action, CartAction::Decrement);
        responder.send(Ok(0)).unwrap();

        assert_eq!(task.await.unwrap(), Ok(Some(0)));
    }

    #[tokio::test]
    async fn test_missing_item_is_a_no_op() {
        let mut mock = MockClient::<CartItem>::new();
        mock.expect_action("ghost".into())
            .return_err(FrameworkError::NotFound("ghost".into()));
        mock.expect_action("ghost".into())
            .return_err(FrameworkError::NotFound("ghost".into()));

        let cart = CartClient::new(mock.client());
        assert_eq!(cart.increment("ghost").await, Ok(None));
        assert_eq!(cart.decrement("ghost").await, Ok(None));

        mock.verify();
    }

    #[tokio::test]
    async fn test_entity_errors_keep_their_type() {
        let mut mock = MockClient::<CartItem>::new();
        mock.expect_upsert()
            .return_err(FrameworkError::EntityError(Box::new(CartError::InvalidItem(
                "empty product id".into(),
            ))));

        let cart = CartClient::new(mock.client());
        let err = cart
            .add_to_cart(CartItemDraft::new("", "Shirt", "u", 10.0))
            .await
            .unwrap_err();
        assert_eq!(err, CartError::InvalidItem("empty product id".into()));

        mock.verify();
    }

    #[tokio::test]
    async fn test_get_and_list_come_from_actor_client() {
        let mut mock = MockClient::<CartItem>::new();
        let item = CartItem::new("a", "Shirt", "u", 10.0, 2);
        mock.expect_get("a".into()).return_ok(Some(item.clone()));
        mock.expect_list().return_ok(vec![item.clone()]);

        let cart = CartClient::new(mock.client());
        assert_eq!(cart.get("a".into()).await.unwrap(), Some(item.clone()));
        assert_eq!(cart.list().await.unwrap(), vec![item]);

        mock.verify();
    }

    #[tokio::test]
    async fn test_listen_receives_published_snapshots() {
        let mut mock = MockClient::<CartItem>::new();
        let cart = CartClient::new(mock.client());

        let (seen_tx, mut seen_rx) = tokio::sync::mpsc::unbounded_channel();
        let _listener = cart
            .listen(move |items| {
                let _ = seen_tx.send(items.len());
            })
            .unwrap();

        mock.publish(vec![CartItem::new("a", "Shirt", "u", 10.0, 1)]);
        assert_eq!(seen_rx.recv().await, Some(1));
        assert_eq!(cart.products().unwrap().len(), 1);
        assert_eq!(cart.totals().unwrap().value, 10.0);
    }

    #[tokio::test]
    async fn test_closed_actor_means_no_provider() {
        let (client, receiver) = create_mock_client::<CartItem>(10);
        drop(receiver);
        let cart = CartClient::new(client);

        assert_eq!(cart.products(), Err(CartError::NoProvider));
        assert_eq!(cart.add_to_cart(shirt()).await, Err(CartError::NoProvider));
        assert_eq!(cart.increment("a").await, Err(CartError::NoProvider));
        assert!(matches!(cart.subscribe(), Err(CartError::NoProvider)));
    }
}
