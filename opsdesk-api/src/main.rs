//! # OpsDesk API Server
//!
//! Binary entry point. Loads configuration from the environment, selects the
//! storage backend (`DATABASE_URL` set: PostgreSQL with migrations; unset:
//! seeded in-memory store), builds the Axum application, and serves it until
//! a shutdown signal arrives.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p opsdesk-api
//! ```

use opsdesk_api::app::{build_router, AppState, StorageBackend};
use opsdesk_api::config::Config;
use opsdesk_shared::db::{create_pool, run_migrations, DatabaseConfig};
use opsdesk_shared::repos::memory::{
    MemoryClientRepo, MemoryProjectRepo, MemoryTaskRepo, MemoryUserRepo,
};
use opsdesk_shared::seed;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "opsdesk_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "OpsDesk API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let state = match &config.database {
        Some(db) => {
            tracing::info!("Using PostgreSQL backend");
            let pool = create_pool(DatabaseConfig {
                url: db.url.clone(),
                max_connections: db.max_connections,
                ..Default::default()
            })
            .await?;
            run_migrations(&pool).await?;
            AppState::with_postgres(pool, config.clone())
        }
        None => {
            tracing::info!("DATABASE_URL not set, using seeded in-memory backend");
            let users = Arc::new(MemoryUserRepo::new());
            let clients = Arc::new(MemoryClientRepo::new());
            let projects = Arc::new(MemoryProjectRepo::new());
            let tasks = Arc::new(MemoryTaskRepo::new());
            seed::seed(
                users.as_ref(),
                clients.as_ref(),
                projects.as_ref(),
                tasks.as_ref(),
            )
            .await?;
            AppState::new(
                users,
                clients,
                projects,
                tasks,
                StorageBackend::Memory,
                config.clone(),
            )
        }
    };

    let app = build_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Resolves when Ctrl-C is received
async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
