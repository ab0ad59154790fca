//! Identity Middleware
//!
//! Resolves the session cookie once per request and stores the result in the
//! request extensions, where the guards read it.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::application::session_manager::{Identity, SessionManager};
use crate::domain::repository::SessionRepository;

/// Resolved identity for the current request (`None` = unauthenticated)
#[derive(Debug, Clone, Default)]
pub struct RequestIdentity(pub Option<Identity>);

pub async fn resolve_identity<S>(
    State(sessions): State<SessionManager<S>>,
    mut req: Request,
    next: Next,
) -> Response
where
    S: SessionRepository + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(
        req.headers(),
        &sessions.config().session_cookie_name,
    );

    let identity = match sessions.resolve(token.as_deref()).await {
        Ok(identity) => identity,
        Err(e) => return e.into_response(),
    };

    req.extensions_mut().insert(RequestIdentity(identity));
    next.run(req).await
}
