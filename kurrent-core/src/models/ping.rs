//! Ping wire payload and the constrained caller overlay.
//!
//! The payload is a typed document: identity, sequence number, client
//! timestamp, and `meta` are always computed by the client and can never be
//! replaced through the overlay. Instrumentation fields and any free-form
//! extra keys are caller-overridable, with caller values winning over
//! defaults.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::constants::PING_SCHEMA_VERSION;

/// Keys computed by the client. Overlay entries naming them are dropped.
const RESERVED_KEYS: [&str; 5] = ["node_key", "session_id", "t_client", "seq", "meta"];

/// Noise classification reported with each ping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoiseClass {
    Low,
    #[default]
    Medium,
    High,
}

/// Static app metadata stamped into every ping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppInfo {
    pub version: String,
    pub platform: String,
}

impl Default for AppInfo {
    fn default() -> Self {
        Self {
            version: crate::constants::VERSION.to_string(),
            platform: std::env::consts::OS.to_string(),
        }
    }
}

/// Measurement vector: operating mode plus an intent scalar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementVector {
    pub mode: String,
    pub intent: f64,
}

impl Default for MeasurementVector {
    fn default() -> Self {
        Self {
            mode: "pilot".to_string(),
            intent: 0.5,
        }
    }
}

/// Ping metadata envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingMeta {
    pub schema: u32,
}

/// One structured measurement event, as sent to the ingest endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingPayload {
    pub node_key: String,
    pub session_id: String,
    pub t_client: i64,
    pub seq: u64,
    pub app: AppInfo,
    pub vector: MeasurementVector,
    pub stability_score: f64,
    pub confidence: f64,
    pub noise_class: NoiseClass,
    pub meta: PingMeta,
    /// Free-form caller keys, flattened into the wire object.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Caller-supplied overlay for [`PingPayload::compose`].
///
/// Every field is optional; unset fields fall back to the documented
/// defaults. `extra` entries land at the top level of the wire object.
#[derive(Debug, Clone, Default)]
pub struct PingFields {
    pub mode: Option<String>,
    pub intent: Option<f64>,
    pub stability_score: Option<f64>,
    pub confidence: Option<f64>,
    pub noise_class: Option<NoiseClass>,
    pub extra: Map<String, Value>,
}

impl PingFields {
    pub fn with_stability_score(mut self, v: f64) -> Self {
        self.stability_score = Some(v);
        self
    }

    pub fn with_confidence(mut self, v: f64) -> Self {
        self.confidence = Some(v);
        self
    }

    pub fn with_noise_class(mut self, v: NoiseClass) -> Self {
        self.noise_class = Some(v);
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

impl PingPayload {
    /// Build a payload from the computed parts plus a caller overlay.
    ///
    /// Defaults: `vector {mode: "pilot", intent: 0.5}`, `stability_score`
    /// 0.5, `confidence` 0.5, `noise_class` medium. Overlay extras are
    /// applied last, so an extra naming a typed field (e.g. a full `vector`
    /// object) replaces it wholesale. Reserved keys are dropped with a
    /// warning.
    pub fn compose(
        node_key: String,
        session_id: String,
        seq: u64,
        t_client: i64,
        app: AppInfo,
        fields: &PingFields,
    ) -> Self {
        let mut payload = Self {
            node_key,
            session_id,
            t_client,
            seq,
            app,
            vector: MeasurementVector {
                mode: fields.mode.clone().unwrap_or_else(|| "pilot".to_string()),
                intent: fields.intent.unwrap_or(0.5),
            },
            stability_score: fields.stability_score.unwrap_or(0.5),
            confidence: fields.confidence.unwrap_or(0.5),
            noise_class: fields.noise_class.unwrap_or_default(),
            meta: PingMeta {
                schema: PING_SCHEMA_VERSION,
            },
            extra: Map::new(),
        };

        for (key, value) in &fields.extra {
            if RESERVED_KEYS.contains(&key.as_str()) {
                warn!(key, "dropping reserved key from ping overlay");
                continue;
            }
            payload.apply_extra(key, value.clone());
        }

        payload
    }

    /// Route an overlay entry: typed fields are replaced through their
    /// types, anything else lands in `extra`.
    fn apply_extra(&mut self, key: &str, value: Value) {
        match key {
            "vector" => match serde_json::from_value(value) {
                Ok(v) => self.vector = v,
                Err(e) => warn!(key, "ignoring malformed vector override: {e}"),
            },
            "app" => match serde_json::from_value(value) {
                Ok(v) => self.app = v,
                Err(e) => warn!(key, "ignoring malformed app override: {e}"),
            },
            "noise_class" => match serde_json::from_value(value) {
                Ok(v) => self.noise_class = v,
                Err(e) => warn!(key, "ignoring malformed noise_class override: {e}"),
            },
            "stability_score" => match value.as_f64() {
                Some(v) => self.stability_score = v,
                None => warn!(key, "ignoring non-numeric stability_score override"),
            },
            "confidence" => match value.as_f64() {
                Some(v) => self.confidence = v,
                None => warn!(key, "ignoring non-numeric confidence override"),
            },
            _ => {
                self.extra.insert(key.to_string(), value);
            }
        }
    }
}
