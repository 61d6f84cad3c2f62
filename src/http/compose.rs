//! Service composition: pairing a bound service with the shared manager.

use std::io;
use std::sync::Arc;

use thiserror::Error;

use crate::http::service::ServiceHandle;
use crate::manager::Manager;
use crate::net::{resolve_address, valid_app_name, ListenAddress};

/// Error type for service composition.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// The application name cannot form a valid env-var prefix.
    #[error(
        "invalid application name '{app}': expected ASCII letters, digits or '_', starting with a letter"
    )]
    InvalidAppName { app: String },

    /// The resolved address could not be bound.
    #[error("failed to bind {address} for '{app}'")]
    Bind {
        app: String,
        address: ListenAddress,
        #[source]
        source: io::Error,
    },
}

/// Fatal failure of a running service's serve loop.
#[derive(Debug, Error)]
#[error("fatal service error")]
pub struct FatalServiceError(#[from] pub io::Error);

/// One application's bound service handle paired with the shared manager.
///
/// Created per application at composition time; lives exactly as long as
/// its serve loop.
pub struct ComposedService {
    service: ServiceHandle,
    manager: Arc<Manager>,
}

impl std::fmt::Debug for ComposedService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComposedService").finish_non_exhaustive()
    }
}

impl ComposedService {
    /// The application this composition serves.
    pub fn app(&self) -> &str {
        self.service.app()
    }

    /// The shared manager.
    pub fn manager(&self) -> &Arc<Manager> {
        &self.manager
    }

    /// Mutable access to the service handle, for route registration.
    pub fn service_mut(&mut self) -> &mut ServiceHandle {
        &mut self.service
    }

    /// The service handle.
    pub fn service(&self) -> &ServiceHandle {
        &self.service
    }

    /// Serve until shutdown or fatal error. Consumes the composition.
    pub async fn serve(self) -> Result<(), FatalServiceError> {
        self.service.serve(self.manager).await.map_err(Into::into)
    }
}

/// Compose a service for `app`: resolve its address from the environment,
/// bind a listener there and pair the handle with the shared manager.
///
/// Route registration is the caller's job via the returned handle.
pub async fn compose(app: &str, manager: Arc<Manager>) -> Result<ComposedService, ComposeError> {
    if !valid_app_name(app) {
        return Err(ComposeError::InvalidAppName {
            app: app.to_string(),
        });
    }
    let address = resolve_address(app);
    let service = ServiceHandle::bind(app, address.clone())
        .await
        .map_err(|source| ComposeError::Bind {
            app: app.to_string(),
            address,
            source,
        })?;
    Ok(ComposedService { service, manager })
}

/// Daemonize one composed service: block on its serve loop.
///
/// Returns only on fatal service failure; external termination (signal)
/// resolves the future with `Ok(())` after graceful shutdown.
pub async fn run(composed: ComposedService) -> Result<(), FatalServiceError> {
    composed.serve().await
}
