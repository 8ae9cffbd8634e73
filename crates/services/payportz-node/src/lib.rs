//! PayPortz node: serves the escrow and multisig APIs over HTTP.

pub mod app;
pub mod error;
pub mod routes;
pub mod services;

pub use app::{build_router, AppState};
pub use error::ApiError;
pub use services::Services;

use payportz_config::PayportzConfig;
use tokio::net::TcpListener;

/// Install the global tracing subscriber. `RUST_LOG` overrides the
/// default `info` filter; `log` records are forwarded as well.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

pub async fn run_node(config: PayportzConfig) -> anyhow::Result<()> {
    let services = Services::from_config(&config)?;
    let app = build_router(AppState::new(&services));

    let listener = TcpListener::bind(&config.api.listen_address)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind {}: {}", config.api.listen_address, e))?;

    tracing::info!(
        listen_address = %config.api.listen_address,
        backend = ?config.storage.backend,
        data_dir = %config.storage.data_dir.display(),
        "payportz node started"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown signal received. Exiting.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
