//! Default values for every config section.

/// Batch size for the immediate flush after an enqueue and for the
/// periodic flush loop.
pub const DEFAULT_FLUSH_BATCH_SIZE: usize = 10;

/// Batch size for the foreground (app-resume) flush.
pub const DEFAULT_FOREGROUND_FLUSH_BATCH_SIZE: usize = 25;

/// Interval between periodic flush cycles (seconds).
pub const DEFAULT_FLUSH_INTERVAL_SECS: u64 = 5;

/// Interval between status polls (seconds). Fixed-delay: measured from the
/// end of the previous refresh, not wall-clock aligned.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;

/// How many distinct time buckets the rolling trend window retains.
pub const DEFAULT_TREND_WINDOW: usize = 24;

/// Per-request timeout for backend calls (seconds).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
