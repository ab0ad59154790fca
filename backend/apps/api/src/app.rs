//! Router composition and startup tasks

use auth::application::config::SESSION_SWEEP_INTERVAL;
use auth::application::{default_accounts, seed_users};
use auth::domain::repository::{SessionRepository, UserRepository};
use auth::{SessionManager, auth_router, with_identity};
use axum::Router;
use records::{RecordRepository, RecordsConfig, records_router};
use tokio::task::JoinHandle;

use crate::config::AppConfig;

/// Seed the bootstrap accounts, then compose the application router
pub async fn bootstrap<U, R, S>(
    users: U,
    records: R,
    sessions: SessionManager<S>,
    config: &AppConfig,
) -> anyhow::Result<Router>
where
    U: UserRepository + Send + Sync + 'static,
    R: RecordRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    let accounts = default_accounts(
        config.seed_admin_password.clone(),
        config.seed_viewer_password.clone(),
    );
    let created = seed_users(&users, &config.auth, accounts).await?;
    tracing::info!(accounts_created = created, "Bootstrap accounts checked");

    Ok(build_router(users, records, sessions, config.records.clone()))
}

/// Every route passes through session resolution before its guard
pub fn build_router<U, R, S>(
    users: U,
    records: R,
    sessions: SessionManager<S>,
    records_config: RecordsConfig,
) -> Router
where
    U: UserRepository + Send + Sync + 'static,
    R: RecordRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    let router = Router::new()
        .merge(auth_router(users, sessions.clone()))
        .merge(records_router(records, records_config));

    with_identity(router, sessions)
}

/// Purge expired sessions now and every [`SESSION_SWEEP_INTERVAL`]
pub fn spawn_session_sweeper<S>(sessions: SessionManager<S>) -> JoinHandle<()>
where
    S: SessionRepository + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            match sessions.cleanup_expired().await {
                Ok(0) => {}
                Ok(deleted) => {
                    tracing::info!(sessions_deleted = deleted, "Expired sessions purged");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Session sweep failed, continuing anyway");
                }
            }
        }
    })
}
