use serde::{Deserialize, Serialize};

use super::defaults;

/// Emitter and flush-loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// Batch size for the immediate flush after enqueue and the periodic loop.
    pub flush_batch_size: usize,
    /// Larger batch used when the app returns to the foreground.
    pub foreground_flush_batch_size: usize,
    /// Interval between periodic flush cycles (seconds).
    pub flush_interval_secs: u64,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            flush_batch_size: defaults::DEFAULT_FLUSH_BATCH_SIZE,
            foreground_flush_batch_size: defaults::DEFAULT_FOREGROUND_FLUSH_BATCH_SIZE,
            flush_interval_secs: defaults::DEFAULT_FLUSH_INTERVAL_SECS,
        }
    }
}
