//! Browser login / logout handlers

use std::sync::Arc;

use axum::Form;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{AppendHeaders, Html, IntoResponse, Redirect, Response};
use platform::flash::{Flash, clear_flash_cookie};

use crate::application::config::AuthConfig;
use crate::application::session_manager::SessionManager;
use crate::application::sign_in::{SignInInput, SignInUseCase};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::error::AuthError;
use crate::presentation::dto::LoginForm;
use crate::presentation::guard::LOGIN_PATH;
use crate::presentation::views;

/// Shared state for auth handlers
pub struct AuthAppState<U, S>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    pub users: Arc<U>,
    pub sessions: SessionManager<S>,
    pub config: Arc<AuthConfig>,
}

impl<U, S> Clone for AuthAppState<U, S>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            users: self.users.clone(),
            sessions: self.sessions.clone(),
            config: self.config.clone(),
        }
    }
}

/// GET /login
pub async fn login_page<U, S>(
    State(state): State<AuthAppState<U, S>>,
    headers: HeaderMap,
) -> Response
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    let flash = Flash::from_headers(&headers);
    (
        [(header::SET_COOKIE, clear_flash_cookie(state.config.cookie_secure))],
        Html(views::login_page(flash.as_ref())),
    )
        .into_response()
}

/// POST /login
pub async fn login<U, S>(
    State(state): State<AuthAppState<U, S>>,
    Form(form): Form<LoginForm>,
) -> Response
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(
        state.users.clone(),
        state.sessions.clone(),
        state.config.clone(),
    );

    let input = SignInInput {
        user_name: form.username,
        password: form.password,
    };

    match use_case.execute(input).await {
        Ok(output) => {
            let secure = state.config.cookie_secure;
            let session_cookie = state
                .config
                .session_cookie()
                .build_set_cookie(&output.session_token);
            (
                AppendHeaders([
                    (header::SET_COOKIE, session_cookie),
                    (
                        header::SET_COOKIE,
                        Flash::success("Login successful!").to_set_cookie(secure),
                    ),
                ]),
                Redirect::to("/"),
            )
                .into_response()
        }
        Err(AuthError::InvalidCredentials) => {
            AuthError::InvalidCredentials.log();
            (
                StatusCode::UNAUTHORIZED,
                Html(views::login_page(Some(&Flash::danger("Invalid credentials!")))),
            )
                .into_response()
        }
        Err(e) => {
            e.log();
            (
                e.status_code(),
                Html(platform::html::error_page(
                    "Service Unavailable",
                    "Sign-in is temporarily unavailable. Please try again.",
                )),
            )
                .into_response()
        }
    }
}

/// GET /logout
///
/// Always ends at the login page; destroying an unknown session is a no-op.
pub async fn logout<U, S>(State(state): State<AuthAppState<U, S>>, headers: HeaderMap) -> Response
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    if let Some(token) =
        platform::cookie::extract_cookie(&headers, &state.config.session_cookie_name)
    {
        if let Err(e) = state.sessions.destroy(&token).await {
            e.log();
        }
    }

    (
        [(
            header::SET_COOKIE,
            state.config.session_cookie().build_delete_cookie(),
        )],
        Redirect::to(LOGIN_PATH),
    )
        .into_response()
}
