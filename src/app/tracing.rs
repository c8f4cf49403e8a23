use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber.
///
/// `level` is the default directive; `RUST_LOG` still takes precedence.
/// Uses JSON format when `RUST_LOG_FORMAT=json` (default for production).
pub fn init_tracing(level: Level) {
    let use_json = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(true); // Default to JSON for production

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    if use_json {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(true),
            )
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }
}
