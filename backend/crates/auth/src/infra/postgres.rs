//! PostgreSQL credential store
//!
//! Every call is bounded by the configured timeout; expiry surfaces as
//! [`AuthError::StoreUnavailable`](crate::error::AuthError).

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;
use sqlx::PgPool;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{user_name::UserName, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
    timeout: Duration,
}

impl PgUserRepository {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    async fn bounded<T, F>(&self, call: F) -> AuthResult<T>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        Ok(tokio::time::timeout(self.timeout, call).await??)
    }
}

impl UserRepository for PgUserRepository {
    async fn create_if_absent(&self, user: &User) -> AuthResult<bool> {
        let inserted = self
            .bounded(
                sqlx::query(
                    r#"
                    INSERT INTO users (
                        user_name,
                        password_hash,
                        user_role,
                        created_at,
                        updated_at
                    ) VALUES ($1, $2, $3, $4, $5)
                    ON CONFLICT (user_name) DO NOTHING
                    "#,
                )
                .bind(user.user_name.as_str())
                .bind(user.password_hash.as_phc_string())
                .bind(user.user_role.id())
                .bind(user.created_at)
                .bind(user.updated_at)
                .execute(&self.pool),
            )
            .await?
            .rows_affected();

        Ok(inserted == 1)
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        let row = self
            .bounded(
                sqlx::query_as::<_, UserRow>(
                    r#"
                    SELECT
                        user_name,
                        password_hash,
                        user_role,
                        created_at,
                        updated_at
                    FROM users
                    WHERE user_name = $1
                    "#,
                )
                .bind(user_name.as_str())
                .fetch_optional(&self.pool),
            )
            .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn update_role(&self, user_name: &UserName, role: UserRole) -> AuthResult<bool> {
        let updated = self
            .bounded(
                sqlx::query(
                    "UPDATE users SET user_role = $2, updated_at = now() WHERE user_name = $1",
                )
                .bind(user_name.as_str())
                .bind(role.id())
                .execute(&self.pool),
            )
            .await?
            .rows_affected();

        Ok(updated == 1)
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    user_name: String,
    password_hash: String,
    user_role: i16,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let user_name = UserName::new(&self.user_name)
            .map_err(|e| AuthError::Internal(format!("Invalid user_name: {}", e)))?;
        let password_hash = HashedPassword::from_phc_string(self.password_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password_hash: {}", e)))?;
        let user_role = UserRole::from_id(self.user_role)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(User {
            user_name,
            password_hash,
            user_role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
