use std::io;
use tracing_subscriber::{fmt, EnvFilter};

fn filter_or(fallback: &str) -> EnvFilter {
    // RUST_LOG wins when set
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Compact human-readable logs on stdout.
///
/// Defaults to `info` for the app and the HTTP layers; override with
/// `RUST_LOG`. Safe to call more than once.
pub fn init_logging_default() {
    let _ = fmt()
        .with_env_filter(filter_or("info,tower_http=info,axum=info"))
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

/// Structured JSON logs on stdout for machine consumption.
///
/// Defaults to `info` with `server` at debug; override with `RUST_LOG`,
/// e.g. `RUST_LOG=info,service::auth=trace`.
pub fn init_logging_json() {
    let _ = fmt()
        .with_env_filter(filter_or("info,server=debug"))
        .with_target(false)
        .json()
        .with_writer(io::stdout)
        .try_init();
}
