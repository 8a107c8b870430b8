//! StatusPoller — periodic status fetch with a reentrancy guard and the
//! rolling trend window.
//!
//! `refresh` never overlaps itself: a call arriving while one is in flight
//! is dropped, not queued — the next tick tries again. A failed refresh
//! leaves the last good bundle cached and records the error.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use kurrent_core::errors::KurrentResult;
use kurrent_core::{StatusBundle, TrendPoint};

use crate::identity::NodeIdentity;
use crate::status::trend::TrendBuffer;
use crate::transport::StatusTransport;

/// What a `refresh` call did.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// Fetched and cached a fresh bundle.
    Updated(StatusBundle),
    /// Another refresh was already in flight; this call did nothing.
    Skipped,
}

/// Periodically fetches the status bundle and maintains the trend window.
pub struct StatusPoller<C> {
    transport: Arc<C>,
    identity: Arc<NodeIdentity>,
    in_flight: AtomicBool,
    cached: Mutex<Option<StatusBundle>>,
    trend: Mutex<TrendBuffer>,
    last_refreshed_at: Mutex<Option<DateTime<Utc>>>,
    last_error: Mutex<Option<String>>,
}

impl<C: StatusTransport> StatusPoller<C> {
    pub fn new(transport: Arc<C>, identity: Arc<NodeIdentity>, trend_window: usize) -> Self {
        Self {
            transport,
            identity,
            in_flight: AtomicBool::new(false),
            cached: Mutex::new(None),
            trend: Mutex::new(TrendBuffer::new(trend_window)),
            last_refreshed_at: Mutex::new(None),
            last_error: Mutex::new(None),
        }
    }

    /// Fetch the status bundle once.
    ///
    /// On success the bundle is cached and, when both the trust state and a
    /// latest deviation are present, one trend point is upserted. On any
    /// failure the previous bundle stays cached and the error is recorded.
    pub async fn refresh(&self) -> KurrentResult<RefreshOutcome> {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            debug!("refresh already in flight, dropping this call");
            return Ok(RefreshOutcome::Skipped);
        }

        let result = self.refresh_inner().await;
        self.in_flight.store(false, Ordering::Release);
        result
    }

    async fn refresh_inner(&self) -> KurrentResult<RefreshOutcome> {
        let node_key = self.identity.node_key()?;

        match self.transport.fetch_status(&node_key).await {
            Ok(bundle) => {
                self.absorb(&bundle);
                Ok(RefreshOutcome::Updated(bundle))
            }
            Err(e) => {
                warn!("status refresh failed: {e}");
                lock_ignoring_poison(&self.last_error).replace(e.to_string());
                Err(e)
            }
        }
    }

    /// Cache the bundle and fold it into the trend window.
    fn absorb(&self, bundle: &StatusBundle) {
        lock_ignoring_poison(&self.cached).replace(bundle.clone());
        lock_ignoring_poison(&self.last_refreshed_at).replace(Utc::now());
        lock_ignoring_poison(&self.last_error).take();

        let Some(node) = bundle.node.as_ref() else {
            return;
        };
        // A trend point needs both records; otherwise this refresh
        // contributes nothing to the window.
        let (Some(trust), Some(dev)) = (node.trust_state.as_ref(), node.node_deviation_latest.as_ref())
        else {
            return;
        };

        let bucket = dev
            .time_bucket
            .clone()
            .or_else(|| trust.last_bucket.clone())
            .unwrap_or_default();
        let point = TrendPoint {
            bucket,
            dev_total: dev.dev_total,
            tau: trust.tau,
        };
        debug!(bucket = %point.bucket, "trend point upserted");
        lock_ignoring_poison(&self.trend).upsert(point);
    }

    /// Fixed-delay polling loop: refresh, then wait `interval`, forever.
    /// Delay-based on purpose — the next tick is measured from the end of
    /// the previous refresh, not aligned to the wall clock.
    pub async fn run(&self, interval: Duration) {
        loop {
            let _ = self.refresh().await;
            tokio::time::sleep(interval).await;
        }
    }

    /// Last successfully fetched bundle, if any.
    pub fn status(&self) -> Option<StatusBundle> {
        lock_ignoring_poison(&self.cached).clone()
    }

    /// Current trend window, oldest-first.
    pub fn trend(&self) -> Vec<TrendPoint> {
        lock_ignoring_poison(&self.trend).points()
    }

    pub fn last_refreshed_at(&self) -> Option<DateTime<Utc>> {
        *lock_ignoring_poison(&self.last_refreshed_at)
    }

    /// Error from the most recent refresh, cleared by the next success.
    pub fn last_error(&self) -> Option<String> {
        lock_ignoring_poison(&self.last_error).clone()
    }
}

fn lock_ignoring_poison<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|p| p.into_inner())
}
