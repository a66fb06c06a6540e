//! Diagnostic tracing for the harness itself.
//!
//! Two kinds of output exist and must not be confused: tracing here is for
//! debugging the harness (opt-in via `RUST_LOG`, goes to stderr, never
//! persisted), while captured tool output lands as files under
//! `.harness/logs/` regardless of any tracing configuration.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the stderr tracing subscriber.
///
/// Filter comes from `RUST_LOG` and falls back to `warn`, so a plain
/// `bookbuild build` stays quiet. Turn on per-command diagnostics with e.g.
/// `RUST_LOG=bookbuild=debug bookbuild test-chapter 4`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .init();
}
