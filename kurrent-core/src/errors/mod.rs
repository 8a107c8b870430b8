//! Error taxonomy for the telemetry client.
//!
//! Storage and transport failures each get their own enum; `KurrentError`
//! aggregates them for the public API. Every public operation returns a
//! `KurrentResult` — the client never panics across its boundary.

mod store_error;
mod transport_error;

pub use store_error::StoreError;
pub use transport_error::TransportError;

/// Top-level error for all public operations.
#[derive(Debug, thiserror::Error)]
pub enum KurrentError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("identity error: {reason}")]
    Identity { reason: String },

    #[error("serialization error: {reason}")]
    Serialization { reason: String },

    #[error("config error: {reason}")]
    Config { reason: String },
}

impl From<serde_json::Error> for KurrentError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization {
            reason: e.to_string(),
        }
    }
}

/// Result alias used across the workspace.
pub type KurrentResult<T> = Result<T, KurrentError>;
