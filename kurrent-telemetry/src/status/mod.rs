//! Status polling and trend aggregation.

mod poller;
mod trend;

pub use poller::{RefreshOutcome, StatusPoller};
pub use trend::TrendBuffer;
