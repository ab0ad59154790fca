//! Records Router

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, put};

use crate::application::config::RecordsConfig;
use crate::domain::repository::RecordRepository;
use crate::presentation::{api, browser};

/// Shared state for record handlers
pub struct RecordsAppState<R>
where
    R: RecordRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<RecordsConfig>,
}

impl<R> Clone for RecordsAppState<R>
where
    R: RecordRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

/// Browser pages and `/api/records`
///
/// Handlers read the identity resolved by `auth::with_identity`, which must
/// wrap the composed router.
pub fn records_router<R>(repo: R, config: RecordsConfig) -> Router
where
    R: RecordRepository + Send + Sync + 'static,
{
    let state = RecordsAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/", get(browser::index::<R>))
        .route(
            "/add",
            get(browser::add_form::<R>).post(browser::add::<R>),
        )
        .route(
            "/edit/{id}",
            get(browser::edit_form::<R>).post(browser::edit::<R>),
        )
        .route("/delete/{id}", get(browser::delete::<R>))
        .route(
            "/api/records",
            get(api::list::<R>).post(api::create::<R>),
        )
        .route(
            "/api/records/{id}",
            put(api::update::<R>).delete(api::delete::<R>),
        )
        .with_state(state)
}
