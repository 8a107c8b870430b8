//! DurableQueue — persisted FIFO queue of pending outbound pings.
//!
//! The whole queue is one JSON array under one KV key. Every mutation is a
//! load-mutate-persist cycle under an internal mutex, so two callers can
//! never interleave and lose each other's updates. An absent or corrupt
//! document loads as an empty queue; persist failures surface as errors.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use kurrent_core::constants::QUEUE_KEY;
use kurrent_core::errors::{KurrentResult, StoreError};
use kurrent_core::KvStore;

/// One queued outbound ping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueuedEvent {
    /// Unique id, assigned at enqueue time: epoch millis + random suffix.
    pub id: String,
    /// Client-clock enqueue timestamp (epoch millis). Set once.
    pub created_at: i64,
    /// The ping body. Opaque to the queue.
    pub payload: Value,
    /// Failed delivery attempts so far.
    #[serde(default)]
    pub tries: u32,
}

/// Persisted FIFO queue backed by a [`KvStore`].
pub struct DurableQueue {
    store: Arc<dyn KvStore>,
    // Serializes every load-mutate-persist cycle (single-writer discipline).
    lock: Mutex<()>,
}

impl DurableQueue {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
        }
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        // A poisoned guard still holds the lock; the queue document itself
        // is re-read on every cycle, so continuing is safe.
        self.lock.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Load the persisted document. Absent key or parse failure → empty.
    fn load(&self) -> Vec<QueuedEvent> {
        let Some(raw) = self.store.get(QUEUE_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                warn!("queue document unparsable, treating as empty: {e}");
                Vec::new()
            }
        }
    }

    fn persist(&self, items: &[QueuedEvent]) -> Result<(), StoreError> {
        let doc = serde_json::to_string(items).map_err(|e| StoreError::WriteFailed {
            key: QUEUE_KEY.to_string(),
            reason: e.to_string(),
        })?;
        self.store.set(QUEUE_KEY, &doc)
    }

    /// Append a new event and persist it. The event is durable before this
    /// returns.
    #[instrument(skip(self, payload))]
    pub fn enqueue(&self, payload: Value) -> KurrentResult<QueuedEvent> {
        let _g = self.guard();

        let now = Utc::now().timestamp_millis();
        let event = QueuedEvent {
            id: next_event_id(now),
            created_at: now,
            payload,
            tries: 0,
        };

        let mut items = self.load();
        items.push(event.clone());
        self.persist(&items)?;

        debug!(id = %event.id, depth = items.len(), "ping enqueued");
        Ok(event)
    }

    /// Non-destructive read of up to `limit` oldest events, in order.
    pub fn peek_batch(&self, limit: usize) -> Vec<QueuedEvent> {
        let _g = self.guard();
        let mut items = self.load();
        items.truncate(limit);
        items
    }

    /// Remove every event whose id is in `ids`, in one rewrite. Ids not
    /// present are ignored, so a repeated drop is a no-op.
    #[instrument(skip(self, ids))]
    pub fn drop_ids(&self, ids: &[String]) -> KurrentResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let _g = self.guard();
        let items = self.load();
        let kept: Vec<QueuedEvent> = items
            .into_iter()
            .filter(|e| !ids.iter().any(|id| id == &e.id))
            .collect();
        self.persist(&kept)?;
        debug!(dropped = ids.len(), remaining = kept.len(), "events dropped");
        Ok(())
    }

    /// Increment the try counter of one event. No-op if the id is absent
    /// (idempotent against a racing drop).
    #[instrument(skip(self))]
    pub fn bump_try(&self, id: &str) -> KurrentResult<()> {
        let _g = self.guard();
        let mut items = self.load();
        match items.iter_mut().find(|e| e.id == id) {
            Some(event) => {
                event.tries += 1;
                let tries = event.tries;
                self.persist(&items)?;
                debug!(id, tries, "try counter bumped");
            }
            None => debug!(id, "bump_try on absent id, ignoring"),
        }
        Ok(())
    }

    /// Current queue depth.
    pub fn len(&self) -> usize {
        let _g = self.guard();
        self.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop the persisted document entirely.
    #[instrument(skip(self))]
    pub fn clear(&self) -> KurrentResult<()> {
        let _g = self.guard();
        self.store.delete(QUEUE_KEY)?;
        Ok(())
    }
}

/// Collision-free-in-practice event id: creation millis plus a random
/// suffix.
fn next_event_id(now_ms: i64) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{now_ms}_{}", &suffix[..12])
}

#[cfg(test)]
mod tests {
    use super::next_event_id;

    #[test]
    fn event_ids_embed_timestamp_and_differ() {
        let a = next_event_id(1_700_000_000_000);
        let b = next_event_id(1_700_000_000_000);
        assert!(a.starts_with("1700000000000_"));
        assert_ne!(a, b);
    }
}
