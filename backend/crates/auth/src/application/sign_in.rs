//! Sign In Use Case
//!
//! Verifies credentials against the credential store and opens a session
//! carrying the user's current role.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::session_manager::SessionManager;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{user_name::UserName, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

pub struct SignInInput {
    pub user_name: String,
    pub password: String,
}

#[derive(Debug)]
pub struct SignInOutput {
    pub session_token: String,
    pub user_name: UserName,
    pub user_role: UserRole,
}

pub struct SignInUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository + Send + Sync + 'static,
{
    user_repo: Arc<U>,
    sessions: SessionManager<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> SignInUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository + Send + Sync + 'static,
{
    pub fn new(user_repo: Arc<U>, sessions: SessionManager<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            sessions,
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let password = ClearTextPassword::new(input.password);
        let user_name =
            UserName::new(&input.user_name).map_err(|_| AuthError::InvalidCredentials)?;
        if password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        let user = self
            .user_repo
            .find_by_user_name(&user_name)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.password_hash.verify(&password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let session_token = self
            .sessions
            .create_session(user.user_name.clone(), user.user_role)
            .await?;

        tracing::info!(
            user_name = %user.user_name,
            user_role = %user.user_role,
            "User signed in"
        );

        Ok(SignInOutput {
            session_token,
            user_name: user.user_name,
            user_role: user.user_role,
        })
    }
}
