//! warden — bootstrapping orchestrator for multi-tenant services.
//!
//! Given a TOML configuration source, warden resolves, per named
//! application, a datastore connection descriptor and a network-bound
//! service endpoint, then transitions the process into a long-running
//! serving state.
//!
//! # Architecture Overview
//!
//! ```text
//!   config file ──▶ config (ConfigTree + property resolver)
//!                        │
//!                        ▼
//!   manager (ConfigTree + Registry) ──▶ datastore (descriptor builder
//!                        │                         + StorageEngine seam)
//!                        ▼
//!   net (env-derived host:port) ──▶ http (bind + compose with manager)
//!                        │
//!                        ▼
//!   lifecycle (configure → register → compose → run, blocks serving)
//! ```
//!
//! Persistence, migrations and request routing stay behind seams: the
//! [`datastore::StorageEngine`] trait and axum's router. This crate only
//! orchestrates them.

pub mod config;
pub mod datastore;
pub mod http;
pub mod lifecycle;
pub mod manager;
pub mod net;
pub mod observability;

pub use config::{ConfigError, ConfigTree, PropertyNotFound};
pub use datastore::{
    AppNotRegistered, BuildError, ConnectionError, ConnectionHandle, DatastoreDescriptor,
    Registry, SqliteEngine, StorageEngine,
};
pub use http::{compose, run, ComposeError, ComposedService, FatalServiceError, ServiceHandle};
pub use lifecycle::{Lifecycle, LifecycleError, Stage};
pub use manager::Manager;
pub use net::{resolve_address, ListenAddress};
