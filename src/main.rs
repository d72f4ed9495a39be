//! Event Management - REST API server
//!
//! CRUD endpoints for scheduled events under `/api/events`.

use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::PgPool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use event_management::config::{LogFormat, StorageBackend};
use event_management::{
    api, db, Config, EventRepository, EventService, InMemoryEventRepository, PgEventRepository,
};

/// Initialize tracing/logging
fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "event_management=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// Connect the configured storage backend
///
/// Returns the pool as well so it can be closed on shutdown.
async fn open_repository(
    config: &Config,
) -> anyhow::Result<(Arc<dyn EventRepository>, Option<PgPool>)> {
    match config.storage_backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            let repository: Arc<dyn EventRepository> = Arc::new(InMemoryEventRepository::new());
            Ok((repository, None))
        }
        StorageBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is required for postgres storage"))?;

            tracing::info!("Connecting to database...");
            let pool = db::connect(database_url, config.database_max_connections).await?;
            db::verify_connection(&pool).await?;

            if !db::check_schema(&pool).await? {
                tracing::error!("Database schema is not complete. Please run migrations.");
                return Err(anyhow::anyhow!("Database schema incomplete"));
            }

            tracing::info!("Database connected successfully");
            let repository: Arc<dyn EventRepository> = Arc::new(PgEventRepository::new(pool.clone()));
            Ok((repository, Some(pool)))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(config.effective_log_format());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    tracing::info!(
        environment = %config.environment,
        backend = ?config.storage_backend,
        "Starting event management server"
    );

    let (repository, pool) = open_repository(&config).await?;
    let app = api::build_router(EventService::from_arc(repository));

    tracing::info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutting down...");
    if let Some(pool) = pool {
        pool.close().await;
        tracing::info!("Database connections closed");
    }

    Ok(())
}

/// Shutdown signal handler for graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
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
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}
