//! Startup orchestration.
//!
//! # Responsibilities
//! - Sequence configure → register → compose → run
//! - Enforce transition order at runtime
//! - Block the process in the serving state
//!
//! # Design Decisions
//! - Configuration failure is returned, not fatal: the embedding context
//!   decides whether to terminate
//! - Per-application readiness lives in the registry; the controller only
//!   tracks the process-level stage
//! - `run` consumes the controller: there is no state after Running

use std::path::Path;
use std::sync::Arc;

use futures_util::future::try_join_all;
use thiserror::Error;

use crate::config::ConfigError;
use crate::datastore::{BuildError, DatastoreDescriptor, StorageEngine};
use crate::http::{compose, ComposeError, ComposedService, FatalServiceError};
use crate::manager::Manager;

/// Process-level lifecycle stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Unconfigured,
    Configured,
    Running,
}

/// Error type for lifecycle transitions.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("configuration failed")]
    Config(#[from] ConfigError),

    #[error("datastore registration failed")]
    Register(#[from] BuildError),

    #[error("service composition failed")]
    Compose(#[from] ComposeError),

    /// compose() was called for an application whose datastore is not ready.
    #[error("application '{app}' has no registered datastore")]
    NotReady { app: String },

    /// register() or compose() was called before configure().
    #[error("operation requires a loaded configuration")]
    NotConfigured,

    /// run() was called with no composed services.
    #[error("no services composed; nothing to run")]
    NothingComposed,

    #[error(transparent)]
    Fatal(#[from] FatalServiceError),
}

/// Sequences the bootstrap of a multi-tenant process and finally blocks it
/// in the serving state.
///
/// ```text
/// Unconfigured → Configured → datastore ready (per app) → composed → Running
/// ```
pub struct Lifecycle {
    stage: Stage,
    manager: Option<Arc<Manager>>,
    composed: Vec<ComposedService>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            stage: Stage::Unconfigured,
            manager: None,
            composed: Vec::new(),
        }
    }

    /// Current process-level stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The manager, once configured.
    pub fn manager(&self) -> Option<&Arc<Manager>> {
        self.manager.as_ref()
    }

    /// Transition Unconfigured → Configured by loading the configuration
    /// source. On failure the controller stays Unconfigured with no partial
    /// state.
    pub fn configure(
        &mut self,
        path: impl AsRef<Path>,
        engine: Arc<dyn StorageEngine>,
    ) -> Result<Arc<Manager>, LifecycleError> {
        let manager = Arc::new(Manager::configure(path, engine)?);
        self.manager = Some(Arc::clone(&manager));
        self.stage = Stage::Configured;
        tracing::info!("configuration loaded");
        Ok(manager)
    }

    /// Register one application's datastore. Repeatable, once per app; a
    /// failure here affects only that application.
    pub async fn register(&mut self, app: &str) -> Result<DatastoreDescriptor, LifecycleError> {
        let manager = self.manager.as_ref().ok_or(LifecycleError::NotConfigured)?;
        Ok(manager.register(app).await?)
    }

    /// Compose a service for a datastore-ready application. The returned
    /// handle accepts route registrations until `run` is called.
    pub async fn compose(&mut self, app: &str) -> Result<&mut ComposedService, LifecycleError> {
        let manager = self
            .manager
            .clone()
            .ok_or(LifecycleError::NotConfigured)?;
        if !manager.registry().contains(app) {
            return Err(LifecycleError::NotReady {
                app: app.to_string(),
            });
        }
        let composed = compose(app, manager).await?;
        self.composed.push(composed);
        let idx = self.composed.len() - 1;
        Ok(&mut self.composed[idx])
    }

    /// Transition into Running: serve every composed service concurrently
    /// and block until shutdown or the first fatal failure.
    pub async fn run(mut self) -> Result<(), LifecycleError> {
        if self.composed.is_empty() {
            return Err(LifecycleError::NothingComposed);
        }
        self.stage = Stage::Running;
        tracing::info!(services = self.composed.len(), "entering serving state");
        try_join_all(self.composed.into_iter().map(ComposedService::serve)).await?;
        Ok(())
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datastore::{ConnectionError, ConnectionHandle};
    use async_trait::async_trait;
    use std::io::Write;

    struct AcceptAll;

    #[async_trait]
    impl StorageEngine for AcceptAll {
        async fn connect(
            &self,
            _app: &str,
            _descriptor: &DatastoreDescriptor,
        ) -> Result<ConnectionHandle, ConnectionError> {
            Ok(ConnectionHandle::new(()))
        }
    }

    #[tokio::test]
    async fn test_register_before_configure() {
        let mut lifecycle = Lifecycle::new();
        assert_eq!(lifecycle.stage(), Stage::Unconfigured);
        let err = lifecycle.register("shop").await.unwrap_err();
        assert!(matches!(err, LifecycleError::NotConfigured));
    }

    #[tokio::test]
    async fn test_compose_before_register() {
        let mut config = tempfile::NamedTempFile::new().unwrap();
        write!(config, "[shop]\ndbdriver = \"sqlite3\"\n").unwrap();

        let mut lifecycle = Lifecycle::new();
        lifecycle
            .configure(config.path(), Arc::new(AcceptAll))
            .unwrap();
        assert_eq!(lifecycle.stage(), Stage::Configured);

        let err = lifecycle.compose("shop").await.unwrap_err();
        assert!(matches!(err, LifecycleError::NotReady { .. }));
    }

    #[tokio::test]
    async fn test_configure_failure_leaves_unconfigured() {
        let mut lifecycle = Lifecycle::new();
        let err = lifecycle
            .configure("/nonexistent/warden.toml", Arc::new(AcceptAll))
            .unwrap_err();
        assert!(matches!(
            err,
            LifecycleError::Config(ConfigError::NotFound { .. })
        ));
        assert_eq!(lifecycle.stage(), Stage::Unconfigured);
        assert!(lifecycle.manager().is_none());
    }

    #[tokio::test]
    async fn test_run_with_nothing_composed() {
        let mut config = tempfile::NamedTempFile::new().unwrap();
        write!(config, "[shop]\ndbdriver = \"sqlite3\"\n").unwrap();

        let mut lifecycle = Lifecycle::new();
        lifecycle
            .configure(config.path(), Arc::new(AcceptAll))
            .unwrap();
        let err = lifecycle.run().await.unwrap_err();
        assert!(matches!(err, LifecycleError::NothingComposed));
    }

    #[tokio::test]
    async fn test_one_failure_does_not_block_others() {
        let mut config = tempfile::NamedTempFile::new().unwrap();
        write!(config, "[shop]\ndbdriver = \"sqlite3\"\n").unwrap();

        let mut lifecycle = Lifecycle::new();
        lifecycle
            .configure(config.path(), Arc::new(AcceptAll))
            .unwrap();

        // "blog" has no section at all; "shop" must still register
        assert!(lifecycle.register("blog").await.is_err());
        assert!(lifecycle.register("shop").await.is_ok());
        assert!(lifecycle.manager().unwrap().get("shop").is_ok());
    }
}
