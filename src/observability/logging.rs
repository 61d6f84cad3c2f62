//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once, at process start
//! - Respect `RUST_LOG` when set, fall back to a sensible default

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
///
/// Call once from the binary entry point before any other subsystem runs.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warden=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
