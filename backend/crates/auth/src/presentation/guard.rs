//! Authorization Guard
//!
//! Two checks, always applied in this order:
//! 1. [`require_authenticated`] - a session resolved for the request
//! 2. [`require_role`] - the session's role snapshot equals the required role
//!
//! Role checks are plain equality; no role implies another. The extractors
//! below apply the checks before a handler runs and turn failures into the
//! response of the surface they serve: redirects and HTML for browsers,
//! status + JSON for the API.

use std::marker::PhantomData;

use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{Html, IntoResponse, Redirect, Response};

use crate::application::session_manager::Identity;
use crate::domain::value_object::user_role::UserRole;
use crate::error::AuthError;
use crate::presentation::middleware::RequestIdentity;

pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardError {
    Unauthenticated,
    Forbidden,
}

impl From<GuardError> for AuthError {
    fn from(err: GuardError) -> Self {
        match err {
            GuardError::Unauthenticated => AuthError::Unauthenticated,
            GuardError::Forbidden => AuthError::Forbidden,
        }
    }
}

pub fn require_authenticated(ctx: &RequestIdentity) -> Result<&Identity, GuardError> {
    ctx.0.as_ref().ok_or(GuardError::Unauthenticated)
}

pub fn require_role(identity: &Identity, role: UserRole) -> Result<(), GuardError> {
    if identity.user_role == role {
        Ok(())
    } else {
        tracing::warn!(
            user_name = %identity.user_name,
            user_role = %identity.user_role,
            "Role check failed"
        );
        Err(GuardError::Forbidden)
    }
}

// ============================================================================
// Surfaces
// ============================================================================

/// How a request surface reports guard failures
pub trait Surface: Send + Sync + 'static {
    fn reject(err: GuardError) -> Response;
}

/// JSON API: status code + problem document, never a redirect
pub struct Api;

/// Browser: redirect to the login page, or a static forbidden page
pub struct Browser;

impl Surface for Api {
    fn reject(err: GuardError) -> Response {
        AuthError::from(err).into_response()
    }
}

impl Surface for Browser {
    fn reject(err: GuardError) -> Response {
        match err {
            GuardError::Unauthenticated => Redirect::to(LOGIN_PATH).into_response(),
            GuardError::Forbidden => (
                StatusCode::FORBIDDEN,
                Html(platform::html::error_page(
                    "Forbidden",
                    "You do not have access to this page.",
                )),
            )
                .into_response(),
        }
    }
}

// ============================================================================
// Roles
// ============================================================================

/// A role requirement usable as an extractor parameter
pub trait RequiredRole: Send + Sync + 'static {
    const ROLE: UserRole;
}

pub struct AdminOnly;

impl RequiredRole for AdminOnly {
    const ROLE: UserRole = UserRole::Admin;
}

// ============================================================================
// Extractors
// ============================================================================

fn request_identity(parts: &Parts) -> RequestIdentity {
    match parts.extensions.get::<RequestIdentity>() {
        Some(ctx) => ctx.clone(),
        None => {
            tracing::error!("Identity middleware not installed; treating request as anonymous");
            RequestIdentity::default()
        }
    }
}

/// Any signed-in identity
pub struct Authenticated<V: Surface> {
    pub identity: Identity,
    _surface: PhantomData<V>,
}

impl<St, V> FromRequestParts<St> for Authenticated<V>
where
    St: Send + Sync,
    V: Surface,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &St) -> Result<Self, Self::Rejection> {
        let ctx = request_identity(parts);
        let identity = require_authenticated(&ctx).map_err(V::reject)?.clone();
        Ok(Self {
            identity,
            _surface: PhantomData,
        })
    }
}

/// A signed-in identity holding role `R`
pub struct Authorized<R: RequiredRole, V: Surface> {
    pub identity: Identity,
    _marker: PhantomData<(R, V)>,
}

impl<St, R, V> FromRequestParts<St> for Authorized<R, V>
where
    St: Send + Sync,
    R: RequiredRole,
    V: Surface,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &St) -> Result<Self, Self::Rejection> {
        let ctx = request_identity(parts);
        let identity = require_authenticated(&ctx).map_err(V::reject)?;
        require_role(identity, R::ROLE).map_err(V::reject)?;
        Ok(Self {
            identity: identity.clone(),
            _marker: PhantomData,
        })
    }
}

pub type ApiUser = Authenticated<Api>;
pub type ApiAdmin = Authorized<AdminOnly, Api>;
pub type BrowserUser = Authenticated<Browser>;
pub type BrowserAdmin = Authorized<AdminOnly, Browser>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_name::UserName;
    use axum::http::header;

    fn identity(role: UserRole) -> Identity {
        Identity {
            user_name: UserName::new("someone").unwrap(),
            user_role: role,
        }
    }

    #[test]
    fn test_require_authenticated() {
        assert_eq!(
            require_authenticated(&RequestIdentity(None)).unwrap_err(),
            GuardError::Unauthenticated
        );
        let ctx = RequestIdentity(Some(identity(UserRole::Viewer)));
        assert_eq!(require_authenticated(&ctx).unwrap().user_role, UserRole::Viewer);
    }

    #[test]
    fn test_require_role_is_equality_only() {
        assert!(require_role(&identity(UserRole::Admin), UserRole::Admin).is_ok());
        assert!(require_role(&identity(UserRole::Viewer), UserRole::Viewer).is_ok());
        // No hierarchy in either direction
        assert_eq!(
            require_role(&identity(UserRole::Admin), UserRole::Viewer),
            Err(GuardError::Forbidden)
        );
        assert_eq!(
            require_role(&identity(UserRole::Viewer), UserRole::Admin),
            Err(GuardError::Forbidden)
        );
    }

    #[test]
    fn test_browser_rejections() {
        let resp = Browser::reject(GuardError::Unauthenticated);
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()[header::LOCATION], LOGIN_PATH);

        let resp = Browser::reject(GuardError::Forbidden);
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_api_rejections_do_not_redirect_or_name_roles() {
        let resp = Api::reject(GuardError::Unauthenticated);
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(resp.headers().get(header::LOCATION).is_none());

        let resp = Api::reject(GuardError::Forbidden);
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(!body.contains("admin"));
        assert!(!body.contains("viewer"));
    }
}
