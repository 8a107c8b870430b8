//! Wire and domain models.

mod ping;
mod status;
mod trend;

pub use ping::{AppInfo, MeasurementVector, NoiseClass, PingFields, PingMeta, PingPayload};
pub use status::{DeviationRecord, NodeStatus, ReferenceStats, StatusBundle, TrustState};
pub use trend::TrendPoint;
