use serde::{Deserialize, Serialize};

/// One point in the rolling trend window: deviation magnitude and trust
/// scalar for a backend-assigned time bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub bucket: String,
    pub dev_total: f64,
    pub tau: f64,
}
