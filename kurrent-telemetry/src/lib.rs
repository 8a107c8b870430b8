//! # kurrent-telemetry
//!
//! Device-resident telemetry client: pings are durably queued before any
//! network attempt, flushed in bounded FIFO batches with stop-on-first-
//! failure semantics, and a companion poller keeps a bounded trend window
//! over the backend's status bundle.

pub mod emitter;
pub mod engine;
pub mod flush;
pub mod identity;
pub mod queue;
pub mod status;
pub mod transport;

pub use emitter::Emitter;
pub use engine::{EmitReceipt, TelemetryEngine};
pub use flush::{FlushEngine, FlushOutcome, FlushReport};
pub use identity::NodeIdentity;
pub use queue::{DurableQueue, QueuedEvent};
pub use status::{RefreshOutcome, StatusPoller, TrendBuffer};
pub use transport::{DeliveryOutcome, HttpClient, PingTransport, StatusTransport};
