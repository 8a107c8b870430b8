use serde::{Deserialize, Serialize};

use super::defaults;

/// Status poller configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollerConfig {
    /// Fixed delay between status polls (seconds), measured from the end of
    /// the previous refresh.
    pub poll_interval_secs: u64,
    /// Maximum distinct time buckets retained in the trend window.
    pub trend_window: usize,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: defaults::DEFAULT_POLL_INTERVAL_SECS,
            trend_window: defaults::DEFAULT_TREND_WINDOW,
        }
    }
}
