//! User Entity
//!
//! A credential: identity, opaque password verifier, and role.

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;

use crate::domain::value_object::{user_name::UserName, user_role::UserRole};

#[derive(Debug, Clone)]
pub struct User {
    /// Unique login handle
    pub user_name: UserName,
    /// Argon2id verifier; never leaves the credential store boundary
    pub password_hash: HashedPassword,
    pub user_role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(user_name: UserName, password_hash: HashedPassword, user_role: UserRole) -> Self {
        let now = Utc::now();
        Self {
            user_name,
            password_hash,
            user_role,
            created_at: now,
            updated_at: now,
        }
    }

    /// Role correction; open sessions keep their snapshot until re-login
    pub fn set_role(&mut self, role: UserRole) {
        self.user_role = role;
        self.updated_at = Utc::now();
    }
}
