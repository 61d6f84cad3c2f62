//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured tracing events)
//!
//! Consumers:
//!     → stdout, filtered via RUST_LOG / EnvFilter
//! ```
//!
//! # Design Decisions
//! - Structured fields (app, address, error) on every lifecycle event
//! - Log level configurable via environment, sane default otherwise

pub mod logging;

pub use logging::init_logging;
