//! Shutdown coordination for serve loops.

/// Wait for the shutdown signal (ctrl-c).
pub async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("shutdown signal received");
}
