//! Value-style delivery results carried through flush reports.

use serde::{Deserialize, Serialize};

/// Status code recorded when a request never reached the backend.
pub const TRANSPORT_FAILURE_STATUS: i32 = -1;

/// Outcome of one ingest delivery attempt.
///
/// A failed attempt is data, not an error: flush reports carry the last
/// outcome so callers can see what the backend (or the network) said.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryOutcome {
    /// Whether the backend acknowledged the ping (any 2xx).
    pub ok: bool,
    /// HTTP status, or -1 when the transport itself failed.
    pub status: i32,
    /// Response body (or error description). Opaque, logged only.
    pub body: String,
}

impl DeliveryOutcome {
    /// Outcome of an HTTP exchange that produced a status code.
    pub fn http(status: u16, body: String) -> Self {
        Self {
            ok: (200..300).contains(&status),
            status: i32::from(status),
            body,
        }
    }

    /// Outcome of a request that never got an HTTP response.
    pub fn transport_failure(reason: impl Into<String>) -> Self {
        Self {
            ok: false,
            status: TRANSPORT_FAILURE_STATUS,
            body: reason.into(),
        }
    }
}
