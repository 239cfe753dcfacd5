use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tracing_subscriber::EnvFilter;
use visitor_locator_api::{build_app, config::AppConfig, state::AppState};
use visitor_locator_core::{
    geolocation::IpInfoClient,
    store::{DocumentStore, MemoryDocumentStore, PgDocumentStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (dev convenience)
    let _ = dotenvy::dotenv();

    let config = AppConfig::from_env()
        .map_err(|e| anyhow::anyhow!("Failed to load config: {e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    tracing::info!("Starting visitor locator API server");

    let store = connect_store(&config).await?;

    let geolocation = IpInfoClient::new(
        config.geolocation_base_url.clone(),
        config.geolocation_token.clone(),
        config.geolocation_timeout,
    )
    .map_err(|e| anyhow::anyhow!("Failed to build geolocation client: {e}"))?;

    let state = AppState::new(store, Arc::new(geolocation));
    let app = build_app(state, &config);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Open the configured document store, running migrations for PostgreSQL.
async fn connect_store(config: &AppConfig) -> anyhow::Result<Arc<dyn DocumentStore>> {
    if config.uses_memory_store() {
        tracing::warn!("Using in-memory document store; records are lost on restart");
        return Ok(Arc::new(MemoryDocumentStore::new()));
    }

    let mut options = PgConnectOptions::from_str(&config.store_endpoint)
        .map_err(|e| anyhow::anyhow!("Invalid STORE_ENDPOINT: {e}"))?
        .database(&config.database_name);
    if let Some(key) = &config.store_key {
        options = options.password(key);
    }

    let pool = PgPoolOptions::new()
        .max_connections(config.store_max_connections)
        .connect_with(options)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to document store: {e}"))?;

    tracing::info!(database = %config.database_name, "Connected to PostgreSQL");

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to run migrations: {e}"))?;

    tracing::info!("Database migrations applied");

    Ok(Arc::new(PgDocumentStore::new(
        pool,
        config.container_name.clone(),
    )))
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => { tracing::info!("Received Ctrl+C, shutting down..."); }
        _ = terminate => { tracing::info!("Received SIGTERM, shutting down..."); }
    }
}
