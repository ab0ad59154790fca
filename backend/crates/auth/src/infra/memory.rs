//! In-process repository implementations
//!
//! [`InMemorySessionStore`] is the production session table. The user store
//! backs development runs without a database, and tests.

use std::collections::HashMap;
use std::sync::Arc;

use kernel::id::SessionId;
use tokio::sync::RwLock;

use crate::domain::entity::{session::Session, user::User};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{user_name::UserName, user_role::UserRole};
use crate::error::AuthResult;

/// Session table shared by all request handlers
///
/// Each entry is only written by the sign-in that created it and the
/// sign-out or sweep that removes it. The lock is never held across an await.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl SessionRepository for InMemorySessionStore {
    async fn insert(&self, session: Session) -> AuthResult<()> {
        self.sessions
            .write()
            .await
            .insert(session.session_id, session);
        Ok(())
    }

    async fn find(&self, session_id: &SessionId) -> AuthResult<Option<Session>> {
        Ok(self.sessions.read().await.get(session_id).cloned())
    }

    async fn remove(&self, session_id: &SessionId) -> AuthResult<bool> {
        Ok(self.sessions.write().await.remove(session_id).is_some())
    }

    async fn cleanup_expired(&self, now_ms: i64) -> AuthResult<u64> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired_at(now_ms));
        Ok((before - sessions.len()) as u64)
    }
}

#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserName, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create_if_absent(&self, user: &User) -> AuthResult<bool> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.user_name) {
            return Ok(false);
        }
        users.insert(user.user_name.clone(), user.clone());
        Ok(true)
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        Ok(self.users.read().await.get(user_name).cloned())
    }

    async fn update_role(&self, user_name: &UserName, role: UserRole) -> AuthResult<bool> {
        match self.users.write().await.get_mut(user_name) {
            Some(user) => {
                user.set_role(role);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
