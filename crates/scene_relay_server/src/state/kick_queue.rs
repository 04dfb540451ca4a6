//! Pending kick requests.

use parking_lot::Mutex;

/// Set-like queue of ids awaiting the external consumer.
///
/// An id is queued at most once between drains; insertion order is kept.
/// The queue is unbounded. If the consumer stops draining it grows by one
/// entry per distinct id, and a warning is logged when it reaches
/// `warn_len`.
#[derive(Debug)]
pub struct KickQueue {
    pending: Mutex<Vec<String>>,
    warn_len: usize,
}

impl KickQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new(warn_len: usize) -> Self {
        Self {
            pending: Mutex::new(Vec::new()),
            warn_len,
        }
    }

    /// Appends `id` unless it is already pending.
    ///
    /// Returns true if the id was added.
    pub fn enqueue(&self, id: &str) -> bool {
        let mut pending = self.pending.lock();
        if pending.iter().any(|queued| queued == id) {
            return false;
        }
        pending.push(id.to_owned());

        if pending.len() == self.warn_len {
            tracing::warn!(
                "Kick queue reached {} entries without a drain; is the consumer polling?",
                pending.len()
            );
        }
        true
    }

    /// Returns everything queued and leaves the queue empty.
    #[must_use]
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.pending.lock())
    }

    /// Number of pending ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    /// True if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }
}
