/// Client version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Storage key for the persisted outbound queue document.
pub const QUEUE_KEY: &str = "kurrent_ping_queue_v1";

/// Storage key for the per-install node identity.
pub const INSTALL_ID_KEY: &str = "kurrent_install_id_v1";

/// Schema version stamped into every ping under `meta.schema`.
pub const PING_SCHEMA_VERSION: u32 = 1;

/// Header carrying the pilot API key on every backend request.
pub const PILOT_KEY_HEADER: &str = "x-pilot-key";
