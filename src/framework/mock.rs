//! # Mock Framework
//!
//! Utilities for testing typed clients in isolation, without spawning a real actor.
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **Determinism** | 100% deterministic | Subject to scheduler |
//! | **State** | No real state (expectations) | Real collection |
//! | **Error Injection** | Easy (`return_err`) | Hard (requires specific state) |
//!
//! Use [`MockClient`] for the fluent expectation API, or [`create_mock_client`] together with
//! [`expect_upsert`] / [`expect_action`] when a test needs to inspect the raw request payload.
//!
//! ```rust,ignore
//! let mut mock = MockClient::<CartItem>::new();
//! mock.expect_action(ProductId::from("a")).return_ok(2);
//!
//! let cart = CartClient::new(mock.client());
//! assert_eq!(cart.increment("a").await?, Some(2));
//! mock.verify();
//! ```

use crate::framework::{ActorEntity, FrameworkError, ResourceClient, ResourceRequest, Snapshot};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot, watch};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// Represents an expected request to the mock client, with the response to send back.
enum Expectation<T: ActorEntity> {
    Upsert {
        response: Result<T, FrameworkError>,
    },
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

impl<T: ActorEntity> Expectation<T> {
    fn kind(&self) -> &'static str {
        match self {
            Expectation::Upsert { .. } => "Upsert",
            Expectation::Get { .. } => "Get",
            Expectation::List { .. } => "List",
            Expectation::Action { .. } => "Action",
        }
    }
}

fn request_kind<T: ActorEntity>(request: &ResourceRequest<T>) -> &'static str {
    match request {
        ResourceRequest::Upsert { .. } => "Upsert",
        ResourceRequest::Get { .. } => "Get",
        ResourceRequest::List { .. } => "List",
        ResourceRequest::Action { .. } => "Action",
        ResourceRequest::Hydrate { .. } => "Hydrate",
        ResourceRequest::Stop { .. } => "Stop",
    }
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking for fluent testing.
///
/// Requests are matched against expectations in FIFO order. A request whose kind or id does not
/// match the next expectation panics the background task, which surfaces as `ActorDropped` in
/// the client. Call [`MockClient::verify`] at the end of a test to catch requests that never
/// arrived.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Expectations<T>,
    state: watch::Sender<Snapshot<T>>,
    revision: u64,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let (state, updates) = watch::channel(Snapshot::empty());
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let pending = Arc::clone(&expectations);

        // Plays the actor: answers each request with the next expectation.
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = pending.lock().expect("mock expectations poisoned").pop_front();

                match (request, expectation) {
                    (
                        ResourceRequest::Upsert { respond_to, .. },
                        Some(Expectation::Upsert { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Get { id, respond_to },
                        Some(Expectation::Get {
                            id: expected,
                            response,
                        }),
                    ) => {
                        assert_eq!(id, expected, "Get called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::List { respond_to }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action {
                            id: expected,
                            response,
                        }),
                    ) => {
                        assert_eq!(id, expected, "Action called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (request, expected) => panic!(
                        "Mock received {} but expected {}",
                        request_kind(&request),
                        expected.as_ref().map_or("nothing", Expectation::kind)
                    ),
                }
            }
        });

        Self {
            client: ResourceClient::new(sender, updates),
            expectations,
            state,
            revision: 0,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Publishes a snapshot to every subscriber, as the real actor does after a mutation.
    pub fn publish(&mut self, items: Vec<T>) {
        self.revision += 1;
        self.state.send_replace(Snapshot {
            revision: self.revision,
            items: Arc::new(items),
        });
    }

    /// Expects an `upsert` operation.
    pub fn expect_upsert(&mut self) -> UpsertExpectationBuilder<T> {
        UpsertExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `get` operation.
    pub fn expect_get(&mut self, id: T::Id) -> GetExpectationBuilder<T> {
        GetExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `list` operation.
    pub fn expect_list(&mut self) -> ListExpectationBuilder<T> {
        ListExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects an `action` operation.
    pub fn expect_action(&mut self, id: T::Id) -> ActionExpectationBuilder<T> {
        ActionExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Panics if any expectation is still pending.
    pub fn verify(&self) {
        let remaining = self
            .expectations
            .lock()
            .expect("mock expectations poisoned")
            .len();
        assert_eq!(remaining, 0, "{remaining} expectation(s) were never met");
    }
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn push<T: ActorEntity>(expectations: &Expectations<T>, expectation: Expectation<T>) {
    expectations
        .lock()
        .expect("mock expectations poisoned")
        .push_back(expectation);
}

/// Builder for `upsert` expectations.
pub struct UpsertExpectationBuilder<T: ActorEntity> {
    expectations: Expectations<T>,
}

impl<T: ActorEntity> UpsertExpectationBuilder<T> {
    /// Answers the upsert with `item`.
    pub fn return_ok(self, item: T) {
        push(&self.expectations, Expectation::Upsert { response: Ok(item) });
    }

    /// Answers the upsert with `error`.
    pub fn return_err(self, error: FrameworkError) {
        push(&self.expectations, Expectation::Upsert { response: Err(error) });
    }
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    expectations: Expectations<T>,
}

impl<T: ActorEntity> GetExpectationBuilder<T> {
    pub fn return_ok(self, value: Option<T>) {
        let id = self.id;
        push(&self.expectations, Expectation::Get { id, response: Ok(value) });
    }

    pub fn return_err(self, error: FrameworkError) {
        let id = self.id;
        push(&self.expectations, Expectation::Get { id, response: Err(error) });
    }
}

/// Builder for `list` expectations.
pub struct ListExpectationBuilder<T: ActorEntity> {
    expectations: Expectations<T>,
}

impl<T: ActorEntity> ListExpectationBuilder<T> {
    pub fn return_ok(self, items: Vec<T>) {
        push(&self.expectations, Expectation::List { response: Ok(items) });
    }
}

/// Builder for `action` expectations.
pub struct ActionExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    expectations: Expectations<T>,
}

impl<T: ActorEntity> ActionExpectationBuilder<T> {
    /// Answers the action with `result`, e.g. the new quantity.
    pub fn return_ok(self, result: T::ActionResult) {
        let id = self.id;
        push(&self.expectations, Expectation::Action { id, response: Ok(result) });
    }

    /// Answers the action with `error`. Use `FrameworkError::NotFound` to simulate a missing id.
    pub fn return_err(self, error: FrameworkError) {
        let id = self.id;
        push(&self.expectations, Expectation::Action { id, response: Err(error) });
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// Creates a client wired to a receiver the test controls.
///
/// The test plays the actor: it pulls requests off `receiver` with the `expect_*` helpers,
/// asserts on their payloads and answers through the returned responder.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (_state, updates) = watch::channel(Snapshot::empty());
    (ResourceClient::new(sender, updates), receiver)
}

/// Helper to verify that the next message is an Upsert request
pub async fn expect_upsert<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Upsert { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}
