//! input-gateway server entry point.
//!
//! Resolves database credentials, connects the pool, ensures the schema and
//! starts the Axum HTTP server. Any failure before the listener is bound
//! aborts the process.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use input_gateway::api;
use input_gateway::app_state::AppState;
use input_gateway::config::secrets::{AwsSecretsManager, SecretSource};
use input_gateway::config::{self, GatewayConfig, LogFormat};
use input_gateway::metrics::ApiMetrics;
use input_gateway::persistence::postgres::PostgresStore;
use input_gateway::templates::Pages;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = GatewayConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    tracing::info!(addr = %config.listen_addr, "starting input-gateway");

    if let Err(err) = run(config).await {
        tracing::error!(error = %err, "input-gateway stopped");
        return Err(err);
    }
    Ok(())
}

async fn run(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Resolve database credentials
    let secrets = if config.secrets_enabled {
        Some(AwsSecretsManager::new(config.secret_region.as_deref()).await)
    } else {
        tracing::info!("secrets lookup disabled; using environment only");
        None
    };
    let params = config::connection::resolve(
        secrets.as_ref().map(|s| s as &dyn SecretSource),
        &config.secret_name,
        |key| std::env::var(key).ok(),
    )
    .await?;

    // Build persistence layer
    let store = PostgresStore::connect(&params, &config.pool).await?;
    store.ensure_schema().await?;

    // Build application state
    let app_state = AppState::new(
        Arc::new(store.clone()),
        Pages::new()?,
        ApiMetrics::new()?,
    );

    // Build router
    let app = api::build_router(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    tracing::info!("shutdown complete");
    Ok(())
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
