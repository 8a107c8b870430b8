//! Per-install node identity, lazily created and persisted.

use std::sync::{Arc, Mutex, OnceLock};

use tracing::info;

use kurrent_core::constants::INSTALL_ID_KEY;
use kurrent_core::errors::{KurrentError, KurrentResult};
use kurrent_core::KvStore;

/// Stable per-install identifier used to key all telemetry for a device.
pub struct NodeIdentity {
    store: Arc<dyn KvStore>,
    cached: OnceLock<String>,
    // Serializes the create-and-persist step so two first calls can never
    // race a fresh id into the store and cache a different one.
    create_lock: Mutex<()>,
}

impl NodeIdentity {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self {
            store,
            cached: OnceLock::new(),
            create_lock: Mutex::new(()),
        }
    }

    /// The node key, created and persisted on first use.
    pub fn node_key(&self) -> KurrentResult<String> {
        if let Some(key) = self.cached.get() {
            return Ok(key.clone());
        }

        let _g = self
            .create_lock
            .lock()
            .unwrap_or_else(|p| p.into_inner());

        // A concurrent caller may have resolved the key while this one
        // waited on the lock.
        if let Some(key) = self.cached.get() {
            return Ok(key.clone());
        }

        let key = match self.store.get(INSTALL_ID_KEY) {
            Some(existing) => existing,
            None => {
                let fresh = uuid::Uuid::new_v4().to_string();
                self.store
                    .set(INSTALL_ID_KEY, &fresh)
                    .map_err(|e| KurrentError::Identity {
                        reason: format!("could not persist install id: {e}"),
                    })?;
                info!(node_key = %fresh, "created install identity");
                fresh
            }
        };

        Ok(self.cached.get_or_init(|| key).clone())
    }
}
