//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Unconfigured → configure() → Configured
//!     Configured → register(app) → datastore ready (repeatable per app)
//!     datastore ready → compose(app) → composed handle (routes attach here)
//!     run() → Running (blocks for process life)
//!
//! Shutdown (shutdown.rs):
//!     ctrl-c → serve loops drain → run() resolves
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, datastores next, listeners last
//! - Out-of-order transitions are errors, never panics
//! - One application's failure never blocks the others' registration

pub mod shutdown;
pub mod startup;

pub use startup::{Lifecycle, LifecycleError, Stage};
