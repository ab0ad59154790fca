//! Session Manager
//!
//! Issues, resolves, and destroys server-side sessions. Tokens handed to the
//! client are `<session id>.<HMAC signature>`; a token that fails the
//! signature check never reaches the session table.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::SessionId;
use platform::crypto::{sign, verify_signature};

use crate::application::config::AuthConfig;
use crate::domain::entity::session::Session;
use crate::domain::repository::SessionRepository;
use crate::domain::value_object::{user_name::UserName, user_role::UserRole};
use crate::error::AuthResult;

/// The identity bound to a request, as captured at sign-in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_name: UserName,
    pub user_role: UserRole,
}

pub struct SessionManager<S>
where
    S: SessionRepository + Send + Sync + 'static,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> Clone for SessionManager<S>
where
    S: SessionRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            session_repo: self.session_repo.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S> SessionManager<S>
where
    S: SessionRepository + Send + Sync + 'static,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Start a session bound to `(user_name, role)` and return its token.
    /// Other sessions of the same user are left alone.
    pub async fn create_session(&self, user_name: UserName, role: UserRole) -> AuthResult<String> {
        let session = Session::new(user_name, role, self.config.session_ttl_chrono());
        let token = self.issue_token(&session.session_id);

        tracing::info!(
            user_name = %session.user_name,
            user_role = %session.user_role,
            session_id = %session.session_id,
            "Session created"
        );

        self.session_repo.insert(session).await?;
        Ok(token)
    }

    /// Identity bound to `token`, or `None` when the token is absent,
    /// forged, unknown, or expired. Never mutates the session table.
    pub async fn resolve(&self, token: Option<&str>) -> AuthResult<Option<Identity>> {
        let Some(session_id) = token.and_then(|t| self.parse_token(t)) else {
            return Ok(None);
        };

        let now_ms = Utc::now().timestamp_millis();
        let identity = self
            .session_repo
            .find(&session_id)
            .await?
            .filter(|session| !session.is_expired_at(now_ms))
            .map(|session| Identity {
                user_name: session.user_name,
                user_role: session.user_role,
            });

        Ok(identity)
    }

    /// End the session behind `token`. Unknown or already-destroyed tokens
    /// are a no-op.
    pub async fn destroy(&self, token: &str) -> AuthResult<()> {
        let Some(session_id) = self.parse_token(token) else {
            return Ok(());
        };

        if self.session_repo.remove(&session_id).await? {
            tracing::info!(session_id = %session_id, "Session destroyed");
        }
        Ok(())
    }

    /// Purge expired sessions from the table
    pub async fn cleanup_expired(&self) -> AuthResult<u64> {
        self.session_repo
            .cleanup_expired(Utc::now().timestamp_millis())
            .await
    }

    fn issue_token(&self, session_id: &SessionId) -> String {
        let id = session_id.to_string();
        let signature = sign(&self.config.session_secret, id.as_bytes());
        format!("{}.{}", id, signature)
    }

    fn parse_token(&self, token: &str) -> Option<SessionId> {
        let (id, signature) = token.split_once('.')?;
        if !verify_signature(&self.config.session_secret, id.as_bytes(), signature) {
            return None;
        }
        SessionId::parse(id).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::InMemorySessionStore;
    use std::time::Duration;

    fn manager_with(config: AuthConfig) -> (SessionManager<InMemorySessionStore>, InMemorySessionStore) {
        let store = InMemorySessionStore::new();
        let manager = SessionManager::new(Arc::new(store.clone()), Arc::new(config));
        (manager, store)
    }

    fn manager() -> (SessionManager<InMemorySessionStore>, InMemorySessionStore) {
        manager_with(AuthConfig::development())
    }

    fn name(s: &str) -> UserName {
        UserName::new(s).unwrap()
    }

    #[tokio::test]
    async fn test_create_then_resolve() {
        let (manager, _) = manager();
        let token = manager
            .create_session(name("admin"), UserRole::Admin)
            .await
            .unwrap();

        let identity = manager.resolve(Some(&token)).await.unwrap().unwrap();
        assert_eq!(identity.user_name.as_str(), "admin");
        assert_eq!(identity.user_role, UserRole::Admin);
    }

    #[tokio::test]
    async fn test_resolve_absent_or_garbage_is_none() {
        let (manager, _) = manager();
        assert_eq!(manager.resolve(None).await.unwrap(), None);
        assert_eq!(manager.resolve(Some("")).await.unwrap(), None);
        assert_eq!(manager.resolve(Some("no-dot")).await.unwrap(), None);
        assert_eq!(manager.resolve(Some("a.b")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_forged_signature_is_rejected() {
        let (manager, _) = manager();
        let token = manager
            .create_session(name("viewer"), UserRole::Viewer)
            .await
            .unwrap();
        let (id, _) = token.split_once('.').unwrap();
        let forged = format!("{}.{}", id, "AAAA");
        assert_eq!(manager.resolve(Some(&forged)).await.unwrap(), None);

        // A token signed with another secret does not verify either
        let (other, _) = manager_with(AuthConfig::development());
        assert_eq!(other.resolve(Some(&token)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_destroy_is_idempotent() {
        let (manager, store) = manager();
        let token = manager
            .create_session(name("admin"), UserRole::Admin)
            .await
            .unwrap();

        manager.destroy(&token).await.unwrap();
        assert_eq!(manager.resolve(Some(&token)).await.unwrap(), None);

        manager.destroy(&token).await.unwrap();
        manager.destroy("garbage").await.unwrap();
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_multiple_sessions_per_user() {
        let (manager, _) = manager();
        let first = manager
            .create_session(name("admin"), UserRole::Admin)
            .await
            .unwrap();
        let second = manager
            .create_session(name("admin"), UserRole::Admin)
            .await
            .unwrap();
        assert_ne!(first, second);

        manager.destroy(&first).await.unwrap();
        assert!(manager.resolve(Some(&second)).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_expired_session_resolves_to_none_without_removal() {
        let (manager, store) = manager_with(AuthConfig {
            session_ttl: Duration::ZERO,
            ..AuthConfig::development()
        });
        let token = manager
            .create_session(name("admin"), UserRole::Admin)
            .await
            .unwrap();

        assert_eq!(manager.resolve(Some(&token)).await.unwrap(), None);
        // resolve is side-effect-free; the sweeper removes it
        assert_eq!(store.len().await, 1);
        assert_eq!(manager.cleanup_expired().await.unwrap(), 1);
        assert_eq!(store.len().await, 0);
    }
}
