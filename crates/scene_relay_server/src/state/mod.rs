//! # Relay State
//!
//! The two stores the relay wraps, owned by an explicit context object
//! instead of process globals.
//!
//! ## Design
//!
//! - [`SnapshotStore`]: replaced wholesale on push, read wholesale on poll
//! - [`KickQueue`]: de-duplicated append, drained (read-and-clear) on poll
//! - [`RelayState`]: cheap to clone, handed to every request handler
//!
//! Each store has its own lock. There is no atomicity across a read on one
//! store and a write on the other, and none is needed: there is one producer
//! and one operator.

mod kick_queue;
mod snapshot;

pub use kick_queue::KickQueue;
pub use snapshot::SnapshotStore;

use std::sync::Arc;

use scene_relay_shared::KickAck;
use serde_json::Value;

/// Shared relay state.
///
/// This is the RPC surface of the relay; the HTTP layer only maps routes
/// onto these four operations.
#[derive(Clone, Debug)]
pub struct RelayState {
    snapshot: Arc<SnapshotStore>,
    kicks: Arc<KickQueue>,
}

impl RelayState {
    /// Creates empty stores.
    #[must_use]
    pub fn new(kick_queue_warn_len: usize) -> Self {
        Self {
            snapshot: Arc::new(SnapshotStore::new()),
            kicks: Arc::new(KickQueue::new(kick_queue_warn_len)),
        }
    }

    /// Stores a snapshot. No schema check: whatever was pushed is kept.
    pub fn push_snapshot(&self, snapshot: Value) {
        self.snapshot.replace(snapshot);
    }

    /// Returns the last pushed snapshot (initially `[]`).
    #[must_use]
    pub fn get_snapshot(&self) -> Arc<Value> {
        self.snapshot.read()
    }

    /// Queues a kick for `id`.
    pub fn request_kick(&self, id: &str) -> KickAck {
        if self.kicks.enqueue(id) {
            tracing::info!("Kick requested for: {}", id);
        } else {
            tracing::debug!("Kick for {} already pending", id);
        }
        KickAck { success: true }
    }

    /// Returns and clears the pending kicks.
    #[must_use]
    pub fn get_kick_queue(&self) -> Vec<String> {
        self.kicks.drain()
    }
}

impl Default for RelayState {
    fn default() -> Self {
        Self::new(crate::ServerConfig::default().kick_queue_warn_len)
    }
}
