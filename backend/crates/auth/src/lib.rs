//! Auth Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Users, sessions, roles, repository traits
//! - `application/` - Session manager, sign-in, bootstrap seeding
//! - `infra/` - PostgreSQL credential store, in-process session table
//! - `presentation/` - Identity middleware, guards, login/logout routes
//!
//! ## Security Model
//! - Passwords verified against Argon2id hashes, optionally peppered
//! - Server-side sessions referenced by HMAC-signed cookie tokens
//! - A session's role is a snapshot taken at sign-in; role corrections apply
//!   from the next sign-in
//! - Two peer roles (admin, viewer) checked by equality only

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use application::config::AuthConfig;
pub use application::session_manager::{Identity, SessionManager};
pub use domain::value_object::{user_name::UserName, user_role::UserRole};
pub use error::{AuthError, AuthResult};
pub use infra::memory::{InMemorySessionStore, InMemoryUserRepository};
pub use infra::postgres::PgUserRepository;
pub use presentation::router::{auth_router, with_identity};

pub mod guard {
    pub use crate::presentation::guard::*;
}

#[cfg(test)]
mod tests;
