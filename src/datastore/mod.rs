//! Datastore subsystem.
//!
//! # Data Flow
//! ```text
//! ConfigTree section [app]
//!     → descriptor.rs (resolve the fixed property set into a descriptor)
//!     → engine.rs (StorageEngine::connect → opaque ConnectionHandle)
//!     → registry.rs (one descriptor stored per application name)
//! ```
//!
//! # Design Decisions
//! - The storage engine is a trait seam: this crate assembles descriptors
//!   and requests connections, it never runs migrations or queries
//! - A missing property leaves its field unset instead of aborting the
//!   build; which fields actually resolved stays observable
//! - Connection outcome propagates as a typed error, never a success flag

pub mod descriptor;
pub mod engine;
pub mod registry;

pub use descriptor::{build_descriptor, BuildError, DatastoreDescriptor};
pub use engine::{ConnectionError, ConnectionHandle, SqliteEngine, StorageEngine};
pub use registry::{AppNotRegistered, Registry};
