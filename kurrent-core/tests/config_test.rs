//! Config loading and default behavior.

use kurrent_core::config::{defaults, TelemetryConfig};

/// An empty document yields the full default config.
#[test]
fn empty_toml_gives_defaults() {
    let cfg = TelemetryConfig::from_toml_str("").expect("parse empty config");

    assert_eq!(cfg.emitter.flush_batch_size, defaults::DEFAULT_FLUSH_BATCH_SIZE);
    assert_eq!(
        cfg.emitter.foreground_flush_batch_size,
        defaults::DEFAULT_FOREGROUND_FLUSH_BATCH_SIZE
    );
    assert_eq!(cfg.poller.poll_interval_secs, defaults::DEFAULT_POLL_INTERVAL_SECS);
    assert_eq!(cfg.poller.trend_window, defaults::DEFAULT_TREND_WINDOW);
    assert_eq!(
        cfg.transport.request_timeout_secs,
        defaults::DEFAULT_REQUEST_TIMEOUT_SECS
    );
    assert!(cfg.transport.ingest_url.is_empty());
}

/// A partial file overrides only the keys it names.
#[test]
fn partial_toml_overrides_named_keys_only() {
    let cfg = TelemetryConfig::from_toml_str(
        r#"
        [transport]
        ingest_url = "https://ingest.example/v1/ping"
        status_url = "https://ingest.example/v1/status"
        pilot_key = "pk_test"

        [poller]
        trend_window = 48
        "#,
    )
    .expect("parse partial config");

    assert_eq!(cfg.transport.ingest_url, "https://ingest.example/v1/ping");
    assert_eq!(cfg.transport.pilot_key, "pk_test");
    assert_eq!(cfg.poller.trend_window, 48);
    // Untouched sections keep their defaults.
    assert_eq!(cfg.poller.poll_interval_secs, defaults::DEFAULT_POLL_INTERVAL_SECS);
    assert_eq!(cfg.emitter.flush_batch_size, defaults::DEFAULT_FLUSH_BATCH_SIZE);
}

/// Malformed TOML is a config error, not a panic.
#[test]
fn malformed_toml_is_an_error() {
    let err = TelemetryConfig::from_toml_str("[transport\ningest_url = 3").unwrap_err();
    assert!(err.to_string().contains("config error"));
}
