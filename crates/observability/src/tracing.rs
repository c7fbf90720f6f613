//! Tracing/logging initialization.
//!
//! stdout is reserved for the single response line a caller parses, so logs
//! only ever go to stderr, and are off unless a filter is configured.

use tracing_subscriber::EnvFilter;

/// Env var consulted first for the log filter (then `RUST_LOG`).
pub const LOG_ENV: &str = "STOCKCAST_LOG";

/// Filter used when neither env var is set.
pub const DEFAULT_FILTER: &str = "off";

/// Resolve the filter directive string from the environment.
pub fn filter_directives() -> String {
    std::env::var(LOG_ENV)
        .or_else(|_| std::env::var(EnvFilter::DEFAULT_ENV))
        .unwrap_or_else(|_| DEFAULT_FILTER.to_string())
}

/// Initialize JSON tracing to stderr.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init_stderr() {
    let filter = EnvFilter::try_new(filter_directives())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // JSON logs + timestamps on stderr, configurable via STOCKCAST_LOG / RUST_LOG.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
