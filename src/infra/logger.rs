// src/infra/logger.rs — Structured logging with tracing

use tracing_subscriber::{fmt, EnvFilter};

/// `OUTBOARD_LOG` wins over `RUST_LOG`; both fall back to `level`.
/// Logs go to stderr so the dashboard owns stdout.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_env("OUTBOARD_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
