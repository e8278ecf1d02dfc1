//! # Published Snapshots
//!
//! After every mutation the actor publishes an immutable [`Snapshot`] of its collection on a
//! `tokio::sync::watch` channel. Readers get a cheap `Arc` clone; subscribers are woken with the
//! latest value only, so a slow subscriber skips intermediate states instead of queueing them.

use std::sync::Arc;

/// Read-only view of an actor's collection at a given revision.
#[derive(Debug)]
pub struct Snapshot<T> {
    /// Incremented on every publish. Revision 0 is the empty state before any mutation.
    pub revision: u64,
    pub items: Arc<Vec<T>>,
}

impl<T> Snapshot<T> {
    pub fn empty() -> Self {
        Self {
            revision: 0,
            items: Arc::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// Manual impl: cloning a snapshot only clones the `Arc`, so `T: Clone` is not required.
impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            revision: self.revision,
            items: Arc::clone(&self.items),
        }
    }
}
