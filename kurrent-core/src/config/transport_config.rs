use serde::{Deserialize, Serialize};

use super::defaults;

/// Backend endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Ingest endpoint for ping delivery (POST).
    pub ingest_url: String,
    /// Status endpoint for the aggregated node bundle (GET).
    pub status_url: String,
    /// Pilot API key sent on every request.
    pub pilot_key: String,
    /// Per-request timeout (seconds).
    pub request_timeout_secs: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            ingest_url: String::new(),
            status_url: String::new(),
            pilot_key: String::new(),
            request_timeout_secs: defaults::DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}
