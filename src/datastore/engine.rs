//! Storage engine seam and the default SQLite implementation.
//!
//! # Responsibilities
//! - Define the `connect(descriptor) -> ConnectionHandle` contract the
//!   orchestrator requires from a storage engine
//! - Keep the handle opaque: callers hold it, collaborators downcast it
//!
//! # Design Decisions
//! - Engines are trait objects so a manager can be wired to a fake in tests
//! - The bundled engine covers SQLite only; other drivers are rejected with
//!   a typed error rather than attempted with a guessed DSN

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

use crate::datastore::descriptor::DatastoreDescriptor;

/// Connection establishment errors.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// The descriptor has no `dbdriver` field.
    #[error("no datastore driver configured for '{app}'")]
    MissingDriver { app: String },

    /// The engine does not speak the configured driver.
    #[error("unsupported datastore driver '{driver}' for '{app}'")]
    UnsupportedDriver { app: String, driver: String },

    /// The driver needs a `dbpath` and none was configured.
    #[error("driver '{driver}' requires a dbpath for '{app}'")]
    MissingPath { app: String, driver: String },

    /// The driver accepted the descriptor but establishment failed.
    #[error("failed to establish datastore connection for '{app}'")]
    Establish {
        app: String,
        #[source]
        source: sqlx::Error,
    },

    /// Engine-specific failure (used by out-of-crate engines).
    #[error("datastore engine failure for '{app}'")]
    Engine {
        app: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Opaque handle to an established datastore connection.
///
/// The orchestrator never inspects the handle; application code downcasts it
/// back to the engine's concrete pool type.
#[derive(Clone)]
pub struct ConnectionHandle(Arc<dyn Any + Send + Sync>);

impl ConnectionHandle {
    /// Wrap an engine's connection value.
    pub fn new<C: Any + Send + Sync>(connection: C) -> Self {
        Self(Arc::new(connection))
    }

    /// Borrow the underlying connection as `C`, if that is what the
    /// establishing engine stored.
    pub fn downcast_ref<C: Any + Send + Sync>(&self) -> Option<&C> {
        self.0.downcast_ref()
    }
}

impl fmt::Debug for ConnectionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ConnectionHandle")
    }
}

/// A storage engine capable of opening connections from a descriptor.
///
/// Migrations and queries live behind this seam too, but they are consumed
/// by application code, not by the orchestrator.
#[async_trait]
pub trait StorageEngine: Send + Sync {
    /// Establish a connection for `app` from its assembled descriptor.
    async fn connect(
        &self,
        app: &str,
        descriptor: &DatastoreDescriptor,
    ) -> Result<ConnectionHandle, ConnectionError>;
}

/// SQLite-backed storage engine using an async connection pool.
///
/// Accepts `dbdriver = "sqlite"` or `"sqlite3"`. A `dbpath` of `:memory:`
/// opens an in-memory database; file paths are created if missing.
#[derive(Debug, Default)]
pub struct SqliteEngine;

impl SqliteEngine {
    /// Connection acquire timeout, so a wedged pool fails the build instead
    /// of hanging startup.
    const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

    const FILE_POOL_SIZE: u32 = 5;
}

#[async_trait]
impl StorageEngine for SqliteEngine {
    async fn connect(
        &self,
        app: &str,
        descriptor: &DatastoreDescriptor,
    ) -> Result<ConnectionHandle, ConnectionError> {
        let driver = descriptor
            .driver
            .as_deref()
            .ok_or_else(|| ConnectionError::MissingDriver {
                app: app.to_string(),
            })?;
        if !matches!(driver, "sqlite" | "sqlite3") {
            return Err(ConnectionError::UnsupportedDriver {
                app: app.to_string(),
                driver: driver.to_string(),
            });
        }
        let path = descriptor
            .path
            .as_deref()
            .ok_or_else(|| ConnectionError::MissingPath {
                app: app.to_string(),
                driver: driver.to_string(),
            })?;

        // An in-memory database exists per connection, so the pool must not
        // grow beyond one.
        let (options, max_connections) = if path == ":memory:" {
            (SqliteConnectOptions::new().in_memory(true), 1)
        } else {
            (
                SqliteConnectOptions::new()
                    .filename(path)
                    .create_if_missing(true),
                Self::FILE_POOL_SIZE,
            )
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Self::ACQUIRE_TIMEOUT)
            .connect_with(options)
            .await
            .map_err(|source| ConnectionError::Establish {
                app: app.to_string(),
                source,
            })?;

        tracing::info!(app = %app, path = %path, "datastore connected");
        Ok(ConnectionHandle::new(pool))
    }
}
