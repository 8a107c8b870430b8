//! FlushEngine — drains a bounded prefix of the durable queue to the
//! ingest endpoint.
//!
//! Delivery follows strict queue order and stops on the first failure: once
//! the backend is rejecting or unreachable, the rest of the batch just waits
//! for the next cycle instead of hammering it. Whole flush cycles are
//! serialized through an async mutex, so two overlapping triggers (timer and
//! foreground, say) can never interleave their queue rewrites.

use std::sync::Arc;

use tracing::{debug, info, warn};

use kurrent_core::errors::KurrentResult;

use crate::queue::DurableQueue;
use crate::transport::{DeliveryOutcome, PingTransport};

/// How a flush cycle ended.
#[derive(Debug, Clone, PartialEq)]
pub enum FlushOutcome {
    /// Every attempted item was delivered.
    Drained,
    /// Delivery stopped at the first failure; the outcome explains why.
    Stalled(DeliveryOutcome),
}

/// Result of one flush cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct FlushReport {
    /// Items delivered and removed this cycle.
    pub sent: usize,
    /// Queue depth after the cycle.
    pub remaining: usize,
    pub outcome: FlushOutcome,
}

impl FlushReport {
    pub fn is_drained(&self) -> bool {
        matches!(self.outcome, FlushOutcome::Drained)
    }

    /// The failure that stalled the cycle, if any.
    pub fn last_error(&self) -> Option<&DeliveryOutcome> {
        match &self.outcome {
            FlushOutcome::Drained => None,
            FlushOutcome::Stalled(e) => Some(e),
        }
    }
}

/// Drains the durable queue through a [`PingTransport`].
pub struct FlushEngine<C> {
    transport: Arc<C>,
    queue: Arc<DurableQueue>,
    // Serializes entire flush cycles, not just single queue ops.
    gate: tokio::sync::Mutex<()>,
}

impl<C: PingTransport> FlushEngine<C> {
    pub fn new(transport: Arc<C>, queue: Arc<DurableQueue>) -> Self {
        Self {
            transport,
            queue,
            gate: tokio::sync::Mutex::new(()),
        }
    }

    /// Attempt delivery of up to `batch_size` oldest queued pings.
    ///
    /// On the first failed delivery: that item's try counter is bumped, the
    /// already-delivered prefix is removed, everything else stays queued in
    /// order, and the report carries the failure. A concurrent call waits
    /// for the in-flight cycle to finish before starting its own.
    pub async fn flush(&self, batch_size: usize) -> KurrentResult<FlushReport> {
        let _cycle = self.gate.lock().await;

        let batch = self.queue.peek_batch(batch_size);
        if batch.is_empty() {
            return Ok(FlushReport {
                sent: 0,
                remaining: 0,
                outcome: FlushOutcome::Drained,
            });
        }

        debug!(batch = batch.len(), "flush cycle started");
        let mut delivered: Vec<String> = Vec::with_capacity(batch.len());

        for event in &batch {
            let outcome = self.transport.deliver(&event.payload).await;
            if outcome.ok {
                delivered.push(event.id.clone());
                continue;
            }

            // Stop on first failure; later items wait for the next cycle.
            warn!(
                id = %event.id,
                status = outcome.status,
                sent = delivered.len(),
                "flush stalled"
            );
            self.queue.bump_try(&event.id)?;
            self.queue.drop_ids(&delivered)?;
            return Ok(FlushReport {
                sent: delivered.len(),
                remaining: self.queue.len(),
                outcome: FlushOutcome::Stalled(outcome),
            });
        }

        self.queue.drop_ids(&delivered)?;
        let remaining = self.queue.len();
        info!(sent = delivered.len(), remaining, "flush cycle drained");
        Ok(FlushReport {
            sent: delivered.len(),
            remaining,
            outcome: FlushOutcome::Drained,
        })
    }
}
