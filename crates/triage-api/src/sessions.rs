//! Registry of live streaming conversations.
//!
//! Each WebSocket connection registers an outbound channel handle and is
//! assigned a numeric conversation id from a single monotonically increasing
//! counter. Ids start at 1 and are never reused within a process lifetime,
//! even after unregister.

use std::collections::HashMap;

use tokio::sync::mpsc;
use tracing::debug;

struct Inner {
    next_id: u64,
    connections: HashMap<u64, mpsc::Sender<String>>,
}

/// Mutex-guarded id→handle map. All mutation goes through `register` and
/// `unregister`; `send` only clones a handle under the lock.
pub struct SessionRegistry {
    inner: std::sync::Mutex<Inner>,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            inner: std::sync::Mutex::new(Inner {
                next_id: 0,
                connections: HashMap::new(),
            }),
        }
    }

    /// Register a connection's outbound handle and assign it the next id.
    pub fn register(&self, handle: mpsc::Sender<String>) -> u64 {
        let mut inner = self.lock();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.connections.insert(id, handle);
        debug!(conversation_id = id, "session registered");
        id
    }

    /// Remove a connection. Unknown ids are ignored; the id is not recycled.
    pub fn unregister(&self, id: u64) {
        let removed = self.lock().connections.remove(&id).is_some();
        if removed {
            debug!(conversation_id = id, "session unregistered");
        }
    }

    /// Send a payload to one connection.
    ///
    /// An unknown id, or a handle whose receiver has already gone away, is a
    /// no-op: delivery is not confirmed to the caller. A send racing an
    /// in-flight unregister therefore degrades to the same no-op.
    pub async fn send(&self, id: u64, payload: impl Into<String>) {
        let handle = self.lock().connections.get(&id).cloned();
        if let Some(handle) = handle {
            if handle.send(payload.into()).await.is_err() {
                debug!(conversation_id = id, "send to closed session dropped");
            }
        }
    }

    /// Number of live connections.
    pub fn len(&self) -> usize {
        self.lock().connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // The map and counter are valid after any partial mutation, so a
        // poisoned lock is recovered rather than propagated.
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
