//! Bound, routable service handle.
//!
//! # Responsibilities
//! - Bind a TCP listener for one application's resolved address
//! - Collect route registrations before serving
//! - Serve with request tracing and graceful ctrl-c shutdown

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::MethodRouter;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::lifecycle::shutdown::shutdown_signal;
use crate::manager::Manager;
use crate::net::ListenAddress;

/// A network service handle bound to one application's address.
///
/// Routes registered here receive `State(Arc<Manager>)`; the manager value
/// itself is supplied at serve time by the owning composed service.
pub struct ServiceHandle {
    app: String,
    address: ListenAddress,
    listener: TcpListener,
    router: Router<Arc<Manager>>,
}

impl ServiceHandle {
    /// Bind a listener at `address` for `app`.
    pub(crate) async fn bind(app: &str, address: ListenAddress) -> io::Result<Self> {
        let listener = TcpListener::bind(address.to_string()).await?;
        tracing::info!(app = %app, address = %address, "listener bound");
        Ok(Self {
            app: app.to_string(),
            address,
            listener,
            router: Router::new(),
        })
    }

    /// Register a route on this service.
    ///
    /// `method_router` is a standard axum method router, e.g.
    /// `axum::routing::get(handler)`.
    pub fn register_route(
        &mut self,
        path: &str,
        method_router: MethodRouter<Arc<Manager>>,
    ) -> &mut Self {
        let router = std::mem::take(&mut self.router);
        self.router = router.route(path, method_router);
        self
    }

    /// The application this service belongs to.
    pub fn app(&self) -> &str {
        &self.app
    }

    /// The address the service was composed for.
    pub fn address(&self) -> &ListenAddress {
        &self.address
    }

    /// The actual bound socket address (differs from [`Self::address`] when
    /// the configured port is `0`).
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serve until shutdown signal or fatal error. Consumes the handle.
    pub(crate) async fn serve(self, manager: Arc<Manager>) -> io::Result<()> {
        let router = self
            .router
            .with_state(manager)
            .layer(TraceLayer::new_for_http());

        tracing::info!(app = %self.app, address = %self.address, "service starting");
        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        tracing::info!(app = %self.app, "service stopped");
        Ok(())
    }
}
