//! Repository Traits
//!
//! Persistence interfaces. Implementations live in the infrastructure layer.

use kernel::id::SessionId;

use crate::domain::entity::{session::Session, user::User};
use crate::domain::value_object::{user_name::UserName, user_role::UserRole};
use crate::error::AuthResult;

/// Credential store
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert the user unless the name is taken. Returns whether it was inserted.
    async fn create_if_absent(&self, user: &User) -> AuthResult<bool>;

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>>;

    /// Role correction. Returns false when the user does not exist.
    async fn update_role(&self, user_name: &UserName, role: UserRole) -> AuthResult<bool>;
}

/// Session table
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    async fn insert(&self, session: Session) -> AuthResult<()>;

    /// Read-only lookup; expired entries are returned as stored.
    async fn find(&self, session_id: &SessionId) -> AuthResult<Option<Session>>;

    /// Idempotent removal. Returns whether an entry existed.
    async fn remove(&self, session_id: &SessionId) -> AuthResult<bool>;

    /// Purge entries expired at `now_ms`. Returns the number removed.
    async fn cleanup_expired(&self, now_ms: i64) -> AuthResult<u64>;
}
