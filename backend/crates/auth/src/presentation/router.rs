//! Auth Router

use std::sync::Arc;

use axum::{Router, middleware, routing::get};

use crate::application::session_manager::SessionManager;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::resolve_identity;

/// Browser login/logout routes
pub fn auth_router<U, S>(users: U, sessions: SessionManager<S>) -> Router
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    let config = Arc::new(sessions.config().clone());
    let state = AuthAppState {
        users: Arc::new(users),
        sessions,
        config,
    };

    Router::new()
        .route(
            "/login",
            get(handlers::login_page::<U, S>).post(handlers::login::<U, S>),
        )
        .route("/logout", get(handlers::logout::<U, S>))
        .with_state(state)
}

/// Resolve the session for every request routed through `router`
pub fn with_identity<S>(router: Router, sessions: SessionManager<S>) -> Router
where
    S: SessionRepository + Send + Sync + 'static,
{
    router.layer(middleware::from_fn_with_state(
        sessions,
        resolve_identity::<S>,
    ))
}
