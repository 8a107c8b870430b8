//! TelemetryEngine — wires the emitter, flush engine, and status poller
//! over one store and one transport.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use kurrent_core::errors::KurrentResult;
use kurrent_core::models::PingFields;
use kurrent_core::{KvStore, StatusBundle, TelemetryConfig, TrendPoint};

use crate::emitter::Emitter;
use crate::flush::{FlushEngine, FlushReport};
use crate::identity::NodeIdentity;
use crate::queue::DurableQueue;
use crate::status::{RefreshOutcome, StatusPoller};
use crate::transport::{HttpClient, PingTransport, StatusTransport};

/// Receipt for one emitted ping.
///
/// `Ok` means the ping is durably queued; the immediate flush attempt is
/// reported alongside but never fails the emit — not for a stalled
/// delivery, and not for a bookkeeping error either (the ping may already
/// be on the wire, so failing the emit would invite a duplicate re-send).
#[derive(Debug)]
pub struct EmitReceipt {
    pub queued_id: String,
    pub flush: KurrentResult<FlushReport>,
}

/// The telemetry client engine.
pub struct TelemetryEngine<C> {
    config: TelemetryConfig,
    identity: Arc<NodeIdentity>,
    queue: Arc<DurableQueue>,
    emitter: Emitter,
    flusher: FlushEngine<C>,
    poller: StatusPoller<C>,
}

impl TelemetryEngine<HttpClient> {
    /// Build an engine over the real HTTP transport.
    pub fn new(config: TelemetryConfig, store: Arc<dyn KvStore>) -> KurrentResult<Self> {
        let transport = Arc::new(HttpClient::new(config.transport.clone())?);
        Ok(Self::with_transport(config, store, transport))
    }
}

impl<C> TelemetryEngine<C>
where
    C: PingTransport + StatusTransport,
{
    /// Build an engine over any transport. This is the test seam.
    pub fn with_transport(
        config: TelemetryConfig,
        store: Arc<dyn KvStore>,
        transport: Arc<C>,
    ) -> Self {
        let identity = Arc::new(NodeIdentity::new(store.clone()));
        let queue = Arc::new(DurableQueue::new(store));
        let emitter = Emitter::new(identity.clone(), queue.clone());
        let flusher = FlushEngine::new(transport.clone(), queue.clone());
        let poller = StatusPoller::new(transport, identity.clone(), config.poller.trend_window);

        Self {
            config,
            identity,
            queue,
            emitter,
            flusher,
            poller,
        }
    }

    /// Emit one ping: compose, durably enqueue, then attempt one bounded
    /// flush. Enqueue success alone decides the result.
    pub async fn send_ping(&self, fields: &PingFields) -> KurrentResult<EmitReceipt> {
        let queued = self.emitter.enqueue_ping(fields)?;
        let flush = self.flusher.flush(self.config.emitter.flush_batch_size).await;
        if let Err(e) = &flush {
            warn!(queued_id = %queued.id, "immediate flush failed after enqueue: {e}");
        }
        Ok(EmitReceipt {
            queued_id: queued.id,
            flush,
        })
    }

    /// One flush cycle with the standard batch size.
    pub async fn flush(&self) -> KurrentResult<FlushReport> {
        self.flusher.flush(self.config.emitter.flush_batch_size).await
    }

    /// One flush cycle with the larger foreground batch, for app-resume
    /// catch-up.
    pub async fn flush_foreground(&self) -> KurrentResult<FlushReport> {
        self.flusher
            .flush(self.config.emitter.foreground_flush_batch_size)
            .await
    }

    /// One status refresh (reentrancy-guarded; see [`StatusPoller`]).
    pub async fn refresh_status(&self) -> KurrentResult<RefreshOutcome> {
        self.poller.refresh().await
    }

    /// Fixed-delay periodic flush loop. Spawn it; it never returns.
    pub async fn run_flush_loop(&self) {
        let interval = Duration::from_secs(self.config.emitter.flush_interval_secs);
        info!(interval_secs = self.config.emitter.flush_interval_secs, "flush loop started");
        loop {
            if let Err(e) = self.flush().await {
                warn!("periodic flush failed: {e}");
            }
            tokio::time::sleep(interval).await;
        }
    }

    /// Fixed-delay status polling loop. Spawn it; it never returns.
    pub async fn run_poll_loop(&self) {
        let interval = Duration::from_secs(self.config.poller.poll_interval_secs);
        info!(interval_secs = self.config.poller.poll_interval_secs, "poll loop started");
        self.poller.run(interval).await;
    }

    pub fn node_key(&self) -> KurrentResult<String> {
        self.identity.node_key()
    }

    pub fn session_id(&self) -> &str {
        self.emitter.session_id()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Last successfully fetched status bundle.
    pub fn status(&self) -> Option<StatusBundle> {
        self.poller.status()
    }

    /// Current trend window, oldest-first.
    pub fn trend(&self) -> Vec<TrendPoint> {
        self.poller.trend()
    }

    /// Error from the most recent refresh, cleared by the next success.
    pub fn last_status_error(&self) -> Option<String> {
        self.poller.last_error()
    }
}
