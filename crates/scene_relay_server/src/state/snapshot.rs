//! Latest-snapshot holder.

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

/// Holds the most recently pushed snapshot.
///
/// Last write wins: no merge, no versioning. Readers get a shared handle to
/// the whole document, so a read is never torn by a concurrent push.
#[derive(Debug)]
pub struct SnapshotStore {
    current: Mutex<Arc<Value>>,
}

impl SnapshotStore {
    /// Creates a store holding the empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: Mutex::new(Arc::new(Value::Array(Vec::new()))),
        }
    }

    /// Overwrites the stored snapshot unconditionally.
    pub fn replace(&self, snapshot: Value) {
        let count = snapshot.as_array().map(Vec::len);
        *self.current.lock() = Arc::new(snapshot);
        match count {
            Some(count) => tracing::debug!("Snapshot replaced: {} parts", count),
            None => tracing::debug!("Snapshot replaced with a non-array document"),
        }
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn read(&self) -> Arc<Value> {
        Arc::clone(&self.current.lock())
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_starts_empty() {
        let store = SnapshotStore::new();
        assert_eq!(*store.read(), json!([]));
    }

    #[test]
    fn test_last_write_wins() {
        let store = SnapshotStore::new();
        store.replace(json!([{ "id": "a" }, { "id": "b" }]));
        store.replace(json!([{ "id": "c" }]));
        assert_eq!(*store.read(), json!([{ "id": "c" }]));
    }

    #[test]
    fn test_reader_keeps_old_snapshot() {
        let store = SnapshotStore::new();
        store.replace(json!([{ "id": "old" }]));
        let held = store.read();
        store.replace(json!([]));
        assert_eq!(*held, json!([{ "id": "old" }]));
        assert_eq!(*store.read(), json!([]));
    }

    #[test]
    fn test_no_validation() {
        let store = SnapshotStore::new();
        store.replace(json!({ "not": "an array" }));
        assert_eq!(*store.read(), json!({ "not": "an array" }));
    }
}
