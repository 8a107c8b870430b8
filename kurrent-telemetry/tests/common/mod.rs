//! Shared test doubles: a scriptable transport and misbehaving stores.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::Value;

use kurrent_core::errors::{KurrentError, KurrentResult, StoreError, TransportError};
use kurrent_core::{KvStore, StatusBundle};
use kurrent_store::MemoryKvStore;
use kurrent_telemetry::{DeliveryOutcome, PingTransport, StatusTransport};

/// Scripted response for one status fetch.
pub enum StatusScript {
    Bundle(StatusBundle),
    Http { status: u16, body: String },
    Network(String),
}

/// Transport double: records every delivered payload and plays back
/// scripted outcomes. An empty delivery script means "accept everything".
#[derive(Default)]
pub struct MockTransport {
    pub delivered: Mutex<Vec<Value>>,
    delivery_script: Mutex<VecDeque<DeliveryOutcome>>,
    status_script: Mutex<VecDeque<StatusScript>>,
    pub status_calls: AtomicUsize,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue the outcome for the next delivery attempt.
    pub fn script_delivery(&self, outcome: DeliveryOutcome) {
        self.delivery_script.lock().unwrap().push_back(outcome);
    }

    /// Queue the response for the next status fetch.
    pub fn script_status(&self, script: StatusScript) {
        self.status_script.lock().unwrap().push_back(script);
    }

    pub fn delivered_count(&self) -> usize {
        self.delivered.lock().unwrap().len()
    }
}

impl PingTransport for MockTransport {
    async fn deliver(&self, payload: &Value) -> DeliveryOutcome {
        self.delivered.lock().unwrap().push(payload.clone());
        self.delivery_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| DeliveryOutcome::http(200, "ok".to_string()))
    }
}

impl StatusTransport for MockTransport {
    async fn fetch_status(&self, _node_key: &str) -> KurrentResult<StatusBundle> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        match self.status_script.lock().unwrap().pop_front() {
            Some(StatusScript::Bundle(bundle)) => Ok(bundle),
            Some(StatusScript::Http { status, body }) => {
                Err(KurrentError::Transport(TransportError::Http { status, body }))
            }
            Some(StatusScript::Network(reason)) => {
                Err(KurrentError::Transport(TransportError::Network { reason }))
            }
            None => Ok(StatusBundle::default()),
        }
    }
}

/// Store that fails writes to one key (after an optional grace budget of
/// successful writes) and forwards everything else.
pub struct WriteFailStore {
    inner: MemoryKvStore,
    fail_key: String,
    writes_before_failing: AtomicUsize,
}

impl WriteFailStore {
    pub fn failing_on(fail_key: &str) -> Self {
        Self::failing_after(fail_key, 0)
    }

    /// Let the first `allowed_writes` writes to `fail_key` through, then
    /// fail every later one.
    pub fn failing_after(fail_key: &str, allowed_writes: usize) -> Self {
        Self {
            inner: MemoryKvStore::new(),
            fail_key: fail_key.to_string(),
            writes_before_failing: AtomicUsize::new(allowed_writes),
        }
    }
}

impl KvStore for WriteFailStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if key == self.fail_key {
            let budget = &self.writes_before_failing;
            if budget
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_err()
            {
                return Err(StoreError::WriteFailed {
                    key: key.to_string(),
                    reason: "simulated backend failure".to_string(),
                });
            }
        }
        self.inner.set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.inner.delete(key)
    }
}
