//! # kurrent-core
//!
//! Foundation crate for the Kurrent node telemetry client.
//! Defines the wire models, errors, config, constants, and the storage trait.
//! The other crates in the workspace depend on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::TelemetryConfig;
pub use errors::{KurrentError, KurrentResult};
pub use models::{NoiseClass, PingFields, PingPayload, StatusBundle, TrendPoint};
pub use traits::KvStore;
