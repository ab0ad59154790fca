//! Session Entity
//!
//! Server-side state binding a session id to an identity and a role snapshot.

use chrono::{Duration, Utc};
use kernel::id::SessionId;

use crate::domain::value_object::{user_name::UserName, user_role::UserRole};

#[derive(Debug, Clone)]
pub struct Session {
    pub session_id: SessionId,
    pub user_name: UserName,
    /// Role captured at sign-in, not re-read from the credential store
    pub user_role: UserRole,
    pub created_at_ms: i64,
    pub expires_at_ms: i64,
}

impl Session {
    /// TTL comes from application config, not from the entity
    pub fn new(user_name: UserName, user_role: UserRole, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            session_id: SessionId::new(),
            user_name,
            user_role,
            created_at_ms: now.timestamp_millis(),
            expires_at_ms: (now + ttl).timestamp_millis(),
        }
    }

    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        now_ms >= self.expires_at_ms
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(ttl: Duration) -> Session {
        Session::new(UserName::new("admin").unwrap(), UserRole::Admin, ttl)
    }

    #[test]
    fn test_new_session_is_live() {
        let s = session(Duration::hours(12));
        assert!(!s.is_expired());
        assert!(s.expires_at_ms > s.created_at_ms);
    }

    #[test]
    fn test_expiry_boundary() {
        let s = session(Duration::seconds(10));
        assert!(!s.is_expired_at(s.expires_at_ms - 1));
        assert!(s.is_expired_at(s.expires_at_ms));
    }

    #[test]
    fn test_zero_ttl_is_expired() {
        assert!(session(Duration::zero()).is_expired());
    }
}
