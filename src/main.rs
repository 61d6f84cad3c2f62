//! warden binary entry point.
//!
//! Boots every application named on the command line from one TOML
//! configuration file, gives each a default `/status` route and blocks
//! serving. Library users embed [`warden::Lifecycle`] directly instead.

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::Json;
use clap::Parser;
use serde::Serialize;

use warden::observability::init_logging;
use warden::{Lifecycle, Manager, SqliteEngine};

#[derive(Parser)]
#[command(
    name = "warden",
    about = "Bootstrapping orchestrator for multi-tenant services"
)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "warden.toml")]
    config: PathBuf,

    /// Applications to register and serve.
    #[arg(required = true)]
    apps: Vec<String>,
}

/// Per-application entry of the default status route.
#[derive(Serialize)]
struct StatusEntry {
    app: String,
    configured: Vec<&'static str>,
    connected: bool,
}

/// Default route: what the shared manager knows about every registered app.
async fn status(State(manager): State<Arc<Manager>>) -> Json<serde_json::Value> {
    let mut services = Vec::new();
    for app in manager.registry().apps() {
        if let Ok(descriptor) = manager.get(&app) {
            services.push(StatusEntry {
                app,
                configured: descriptor.resolved_fields(),
                connected: descriptor.is_connected(),
            });
        }
    }
    Json(serde_json::json!({ "services": services }))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let args = Args::parse();

    tracing::info!(config = %args.config.display(), "warden v0.1.0 starting");

    let mut lifecycle = Lifecycle::new();
    lifecycle.configure(&args.config, Arc::new(SqliteEngine))?;

    // One application's failure must not block the others.
    let mut ready = Vec::new();
    for app in &args.apps {
        match lifecycle.register(app).await {
            Ok(descriptor) => {
                tracing::info!(
                    app = %app,
                    fields = ?descriptor.resolved_fields(),
                    "datastore ready"
                );
                ready.push(app.clone());
            }
            Err(error) => {
                tracing::error!(app = %app, error = %error, "registration failed; skipping");
            }
        }
    }

    for app in &ready {
        match lifecycle.compose(app).await {
            Ok(composed) => {
                composed.service_mut().register_route("/status", get(status));
            }
            Err(error) => {
                tracing::error!(app = %app, error = %error, "composition failed; skipping");
            }
        }
    }

    lifecycle.run().await?;

    tracing::info!("shutdown complete");
    Ok(())
}
