//! HTTP service composition.
//!
//! # Data Flow
//! ```text
//! compose(app, manager)
//!     → net::resolve_address (env convention)
//!     → service.rs (bind listener, empty router)
//!     → ComposedService { service handle, shared manager }
//!
//! caller registers routes on the handle
//!     → ComposedService::serve (blocks until shutdown or fatal error)
//! ```
//!
//! # Design Decisions
//! - Binding happens at composition time so a taken port fails compose,
//!   not the later blocking serve call
//! - Routers are state-typed to `Arc<Manager>`: every handler can reach the
//!   config tree and registry without globals
//! - Route dispatch itself belongs to axum; this layer only binds and pairs

pub mod compose;
pub mod service;

pub use compose::{compose, run, ComposeError, ComposedService, FatalServiceError};
pub use service::ServiceHandle;
