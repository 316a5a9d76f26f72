//! HTTP server initialization and runtime setup.
//!
//! Handles store construction, migrations, bootstrap and the Axum server lifecycle.

use crate::config::{Config, StoreBackend};
use crate::domain::repositories::{CounterRepository, UrlMappingRepository};
use crate::infrastructure::persistence::{
    MemoryStore, PgCounterRepository, PgUrlMappingRepository,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Repository handles for the configured backend.
pub struct Store {
    pub mappings: Arc<dyn UrlMappingRepository>,
    pub counters: Arc<dyn CounterRepository>,
}

/// Opens a PostgreSQL pool with the configured limits.
///
/// # Errors
///
/// Returns an error if the database URL is missing or the connection fails.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL is required for the postgres backend")?;

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    Ok(pool)
}

/// Builds the store for the configured backend.
///
/// For PostgreSQL this connects and applies pending migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn build_store(config: &Config) -> Result<Store> {
    let policy = config.tx_policy();

    match config.store_backend {
        StoreBackend::Postgres => {
            let pool = connect_pool(config).await?;
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to migrate")?;

            let pool = Arc::new(pool);
            Ok(Store {
                mappings: Arc::new(PgUrlMappingRepository::new(pool.clone(), policy.clone())),
                counters: Arc::new(PgCounterRepository::new(pool, policy)),
            })
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; mappings are lost on restart");
            let store = Arc::new(MemoryStore::new(policy));
            Ok(Store {
                mappings: store.clone(),
                counters: store,
            })
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - The store (PostgreSQL pool + migrations, or in-memory)
/// - The sentinel mapping and counter, if the store is empty
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Bootstrapping the store fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = build_store(&config).await?;

    let state = AppState::new(
        store.mappings,
        store.counters,
        config.counter_seed,
        config.sentinel()?,
        config.public_host.clone(),
    );

    state
        .registry
        .ensure_initialized()
        .await
        .context("Failed to bootstrap store")?;
    tracing::info!("Store initialized");

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl-C handler: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
