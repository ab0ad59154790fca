//! Bootstrap accounts
//!
//! Creates the default `admin` and `viewer` identities on startup. Running it
//! again leaves existing accounts (and any corrected roles) untouched.

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{user_name::UserName, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

pub struct SeedAccount {
    pub user_name: &'static str,
    pub role: UserRole,
    pub password: String,
}

/// Default accounts with the given secrets
pub fn default_accounts(admin_password: String, viewer_password: String) -> Vec<SeedAccount> {
    vec![
        SeedAccount {
            user_name: "admin",
            role: UserRole::Admin,
            password: admin_password,
        },
        SeedAccount {
            user_name: "viewer",
            role: UserRole::Viewer,
            password: viewer_password,
        },
    ]
}

/// Returns how many accounts were newly created
pub async fn seed_users<U>(
    repo: &U,
    config: &AuthConfig,
    accounts: Vec<SeedAccount>,
) -> AuthResult<usize>
where
    U: UserRepository,
{
    let mut created = 0;

    for account in accounts {
        let user_name = UserName::new(account.user_name)
            .map_err(|e| AuthError::InvalidInput(e.to_string()))?;

        if repo.find_by_user_name(&user_name).await?.is_some() {
            tracing::debug!(user_name = %user_name, "Seed account already present");
            continue;
        }

        let password_hash = ClearTextPassword::new(account.password).hash(config.pepper())?;
        let user = User::new(user_name, password_hash, account.role);

        if repo.create_if_absent(&user).await? {
            tracing::info!(user_name = %user.user_name, user_role = %user.user_role, "Seeded account");
            created += 1;
        }
    }

    Ok(created)
}
