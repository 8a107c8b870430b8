//! Emitter — builds ping payloads and persists them to the durable queue.
//!
//! Side-effect ordering is the contract here: the payload is durably
//! enqueued before any network attempt, so a ping survives a process exit
//! between enqueue and flush.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::instrument;

use kurrent_core::errors::KurrentResult;
use kurrent_core::models::{AppInfo, PingFields, PingPayload};

use crate::identity::NodeIdentity;
use crate::queue::{DurableQueue, QueuedEvent};

/// Builds and durably enqueues pings.
pub struct Emitter {
    identity: Arc<NodeIdentity>,
    queue: Arc<DurableQueue>,
    app: AppInfo,
    /// Per-process session marker, shared by every ping this process emits.
    session_id: String,
    /// Per-process sequence counter; the first ping carries seq 1.
    seq: AtomicU64,
}

impl Emitter {
    pub fn new(identity: Arc<NodeIdentity>, queue: Arc<DurableQueue>) -> Self {
        Self {
            identity,
            queue,
            app: AppInfo::default(),
            session_id: uuid::Uuid::new_v4().to_string(),
            seq: AtomicU64::new(0),
        }
    }

    /// Compose a payload from `fields` and persist it.
    ///
    /// Returns the queued event once it is durable. Identity or persistence
    /// failures come back as errors; nothing touches the network here.
    #[instrument(skip(self, fields))]
    pub fn enqueue_ping(&self, fields: &PingFields) -> KurrentResult<QueuedEvent> {
        let node_key = self.identity.node_key()?;
        let seq = self.seq.fetch_add(1, Ordering::Relaxed) + 1;

        let payload = PingPayload::compose(
            node_key,
            self.session_id.clone(),
            seq,
            Utc::now().timestamp_millis(),
            self.app.clone(),
            fields,
        );

        self.queue.enqueue(serde_json::to_value(&payload)?)
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}
