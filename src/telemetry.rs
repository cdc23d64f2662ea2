//! Telemetry logic.
//! Structured logging through `tracing`.

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// Filtering follows `RUST_LOG` when set.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("credstore=info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
