//! Network seam: transport traits plus the reqwest-backed client.

pub mod protocol;

pub use protocol::DeliveryOutcome;

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::{debug, warn};

use kurrent_core::config::TransportConfig;
use kurrent_core::constants::PILOT_KEY_HEADER;
use kurrent_core::errors::{KurrentError, KurrentResult, TransportError};
use kurrent_core::StatusBundle;

/// Delivers one ping payload to the ingest endpoint.
pub trait PingTransport: Send + Sync {
    fn deliver(&self, payload: &Value) -> impl std::future::Future<Output = DeliveryOutcome> + Send;
}

/// Fetches the aggregated status bundle for a node.
pub trait StatusTransport: Send + Sync {
    fn fetch_status(
        &self,
        node_key: &str,
    ) -> impl std::future::Future<Output = KurrentResult<StatusBundle>> + Send;
}

/// Reqwest-backed client for both backend endpoints.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    config: TransportConfig,
}

impl HttpClient {
    pub fn new(config: TransportConfig) -> KurrentResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| TransportError::Network {
                reason: format!("could not build http client: {e}"),
            })?;
        Ok(Self { http, config })
    }
}

impl PingTransport for HttpClient {
    async fn deliver(&self, payload: &Value) -> DeliveryOutcome {
        let response = self
            .http
            .post(&self.config.ingest_url)
            .header(PILOT_KEY_HEADER, &self.config.pilot_key)
            .header(CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .await;

        match response {
            Ok(res) => {
                let status = res.status().as_u16();
                let body = res.text().await.unwrap_or_default();
                let outcome = DeliveryOutcome::http(status, body);
                if outcome.ok {
                    debug!(status, "ping delivered");
                } else {
                    warn!(status, "ingest rejected ping");
                }
                outcome
            }
            Err(e) => {
                warn!("ping delivery failed before reaching the backend: {e}");
                DeliveryOutcome::transport_failure(e.to_string())
            }
        }
    }
}

impl StatusTransport for HttpClient {
    async fn fetch_status(&self, node_key: &str) -> KurrentResult<StatusBundle> {
        let response = self
            .http
            .get(&self.config.status_url)
            .query(&[("node_key", node_key)])
            .header(PILOT_KEY_HEADER, &self.config.pilot_key)
            .send()
            .await
            .map_err(|e| TransportError::Network {
                reason: e.to_string(),
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network {
                reason: e.to_string(),
            })?;

        if !status.is_success() {
            return Err(KurrentError::Transport(TransportError::Http {
                status: status.as_u16(),
                body,
            }));
        }

        serde_json::from_str(&body).map_err(|e| {
            KurrentError::Transport(TransportError::MalformedBody {
                reason: e.to_string(),
            })
        })
    }
}
