//! Management service: configuration tree + application registry.
//!
//! # Data Flow
//! ```text
//! Manager::configure(path, engine)
//!     → ConfigTree::load (recoverable ConfigError)
//!     → empty Registry
//!
//! Manager::register(app)
//!     → validate name → build descriptor → engine connect
//!     → Registry::insert (wholesale replace)
//! ```
//!
//! # Design Decisions
//! - The manager is an explicit value passed to whatever needs it, never a
//!   process-global; independent managers coexist in tests
//! - Registration failures surface to the caller per application and leave
//!   other applications untouched
//! - Shared read-mostly after setup: the tree is immutable and the registry
//!   is concurrent-safe, so handlers may read while setup finishes

use std::path::Path;
use std::sync::Arc;

use crate::config::{resolve_property, ConfigError, ConfigTree, PropertyNotFound};
use crate::datastore::{
    build_descriptor, AppNotRegistered, BuildError, DatastoreDescriptor, Registry, StorageEngine,
};
use crate::net::valid_app_name;

/// Process-wide management service for one configuration source.
///
/// Aggregates the loaded [`ConfigTree`], the application [`Registry`] and
/// the storage engine used to establish connections.
pub struct Manager {
    config: ConfigTree,
    registry: Registry,
    engine: Arc<dyn StorageEngine>,
}

impl std::fmt::Debug for Manager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Manager").finish_non_exhaustive()
    }
}

impl Manager {
    /// Load the configuration at `path` and prepare an empty registry.
    ///
    /// Failure is returned, not fatal: embedding hosts decide whether a
    /// missing or malformed file terminates the process.
    pub fn configure(
        path: impl AsRef<Path>,
        engine: Arc<dyn StorageEngine>,
    ) -> Result<Self, ConfigError> {
        let config = ConfigTree::load(path)?;
        Ok(Self::from_tree(config, engine))
    }

    /// Build a manager around an already-loaded tree.
    pub fn from_tree(config: ConfigTree, engine: Arc<dyn StorageEngine>) -> Self {
        Self {
            config,
            registry: Registry::new(),
            engine,
        }
    }

    /// Register `app`: build its datastore descriptor and connect.
    ///
    /// Idempotent by replacement — a re-registration re-runs the build and
    /// overwrites the stored descriptor wholesale, so nothing stale survives
    /// a configuration change. Returns the freshly stored descriptor.
    pub async fn register(&self, app: &str) -> Result<DatastoreDescriptor, BuildError> {
        if !valid_app_name(app) {
            return Err(BuildError::InvalidAppName {
                app: app.to_string(),
            });
        }
        let descriptor = build_descriptor(&self.config, self.engine.as_ref(), app).await?;
        self.registry.insert(app, descriptor.clone());
        tracing::info!(
            app = %app,
            fields = ?descriptor.resolved_fields(),
            "application registered"
        );
        Ok(descriptor)
    }

    /// Fetch the registered descriptor for `app`.
    pub fn get(&self, app: &str) -> Result<DatastoreDescriptor, AppNotRegistered> {
        self.registry.get(app)
    }

    /// Resolve a single configuration property for `app`.
    pub fn resolve_property(&self, app: &str, property: &str) -> Result<String, PropertyNotFound> {
        resolve_property(&self.config, app, property)
    }

    /// The loaded configuration tree.
    pub fn config(&self) -> &ConfigTree {
        &self.config
    }

    /// The application registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}
