//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level errors are the
//! domain crates' error types rendered through `kernel::error::AppError`.

mod app;
mod config;

use std::sync::Arc;

use auth::{InMemorySessionStore, InMemoryUserRepository, PgUserRepository, SessionManager};
use records::{InMemoryRecordRepository, PgRecordRepository};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,records=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    // Session table lives for the whole process
    let sessions = SessionManager::new(
        Arc::new(InMemorySessionStore::new()),
        Arc::new(config.auth.clone()),
    );
    let sweeper = app::spawn_session_sweeper(sessions.clone());

    let router = match config.database_url.as_deref() {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .acquire_timeout(config.records.store_timeout)
                .connect(database_url)
                .await?;

            tracing::info!("Connected to database");

            // Run migrations
            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await?;

            tracing::info!("Migrations completed");

            app::bootstrap(
                PgUserRepository::new(pool.clone(), config.records.store_timeout),
                PgRecordRepository::new(pool, config.records.store_timeout),
                sessions,
                &config,
            )
            .await?
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory stores");
            app::bootstrap(
                InMemoryUserRepository::new(),
                InMemoryRecordRepository::new(),
                sessions,
                &config,
            )
            .await?
        }
    };

    let app = router.layer(TraceLayer::new_for_http());

    // Start server
    tracing::info!("Listening on {}", config.bind_addr);
    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.abort();
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
