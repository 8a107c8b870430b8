//! Aggregated status bundle returned by the status endpoint.
//!
//! Parsing is tolerant: every record is optional, every scalar defaulted,
//! unknown fields ignored. A bundle missing one record is still a valid
//! bundle — the poller decides what to do with the gaps.

use serde::{Deserialize, Serialize};

/// Backend-computed trust aggregate for a node as of a time bucket.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrustState {
    pub tau: f64,
    pub k_bar: f64,
    pub last_bucket: Option<String>,
}

/// Backend-computed deviation aggregate for one time bucket.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviationRecord {
    pub dev_total: f64,
    pub time_bucket: Option<String>,
    pub n_samples: Option<u64>,
}

/// Reference statistics the node is compared against.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceStats {
    pub ref_stability: f64,
    pub ref_confidence: f64,
    pub dispersion: f64,
}

/// Per-node section of the status bundle.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeStatus {
    pub trust_state: Option<TrustState>,
    pub node_deviation_latest: Option<DeviationRecord>,
    pub node_deviation_latest_stable: Option<DeviationRecord>,
    pub node_deviation_series: Vec<DeviationRecord>,
    pub reference_for_node: Option<ReferenceStats>,
}

impl NodeStatus {
    /// Latest deviation record, falling back to the stable variant when the
    /// live one is absent.
    pub fn latest_deviation(&self) -> Option<&DeviationRecord> {
        self.node_deviation_latest
            .as_ref()
            .or(self.node_deviation_latest_stable.as_ref())
    }
}

/// Full status bundle.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusBundle {
    pub node: Option<NodeStatus>,
}
