use anyhow::Context;
use storage::{Database, Stores};

mod config;
mod docs;
mod error;
mod features;
mod middleware;
mod routes;
mod state;

use config::Config;
use middleware::auth::ApiKeys;
use state::{AppState, StorageBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting FitTrack API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    let state = match &config.database_url {
        Some(database_url) => {
            tracing::info!(
                "Connecting to database at: {}",
                database_url.split('@').next_back().unwrap_or("unknown")
            );
            let db = Database::new(database_url, config.database_max_connections)
                .await
                .context("Failed to initialize database")?;
            tracing::info!("Database connection established");

            tracing::info!("Running database migrations");
            db.run_migrations()
                .await
                .context("Failed to run migrations")?;
            tracing::info!("Database migrations completed successfully");

            AppState::new(Stores::postgres(&db), StorageBackend::Postgres)
        }
        None => {
            tracing::info!("DATABASE_URL not set, using the in-memory store");
            AppState::in_memory()
        }
    };

    let api_keys = ApiKeys::from_comma_separated(&config.api_keys);
    if api_keys.is_empty() {
        tracing::warn!("API_KEYS is empty, mutating routes are not protected");
    } else {
        tracing::info!("Loaded {} API key(s)", api_keys.len());
    }

    let router = routes::build_router(state, api_keys);

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", bind_address);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("FitTrack API shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
