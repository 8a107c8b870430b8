//! Client configuration, loadable from TOML.
//!
//! Every section is `#[serde(default)]` so a partial file only overrides
//! what it names.

pub mod defaults;

mod emitter_config;
mod poller_config;
mod transport_config;

pub use emitter_config::EmitterConfig;
pub use poller_config::PollerConfig;
pub use transport_config::TransportConfig;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{KurrentError, KurrentResult};

/// Top-level client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub transport: TransportConfig,
    pub emitter: EmitterConfig,
    pub poller: PollerConfig,
}

impl TelemetryConfig {
    /// Parse a config from a TOML string.
    pub fn from_toml_str(s: &str) -> KurrentResult<Self> {
        toml::from_str(s).map_err(|e| KurrentError::Config {
            reason: e.to_string(),
        })
    }

    /// Load a config from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> KurrentResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|e| KurrentError::Config {
            reason: format!("read {}: {e}", path.as_ref().display()),
        })?;
        Self::from_toml_str(&raw)
    }
}
