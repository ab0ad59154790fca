//! Unit tests for the auth crate

#[cfg(test)]
mod sign_in_tests {
    use std::sync::Arc;

    use crate::application::{
        AuthConfig, SessionManager, SignInInput, SignInUseCase, default_accounts, seed_users,
    };
    use crate::domain::repository::UserRepository;
    use crate::domain::value_object::{user_name::UserName, user_role::UserRole};
    use crate::error::AuthError;
    use crate::infra::memory::{InMemorySessionStore, InMemoryUserRepository};

    struct Fixture {
        users: InMemoryUserRepository,
        sessions: SessionManager<InMemorySessionStore>,
        config: Arc<AuthConfig>,
    }

    async fn fixture() -> Fixture {
        let config = Arc::new(AuthConfig::development());
        let users = InMemoryUserRepository::new();
        seed_users(
            &users,
            &config,
            default_accounts("admin123".into(), "viewer123".into()),
        )
        .await
        .unwrap();
        let sessions = SessionManager::new(Arc::new(InMemorySessionStore::new()), config.clone());
        Fixture {
            users,
            sessions,
            config,
        }
    }

    impl Fixture {
        async fn sign_in(&self, user: &str, password: &str) -> Result<String, AuthError> {
            SignInUseCase::new(
                Arc::new(self.users.clone()),
                self.sessions.clone(),
                self.config.clone(),
            )
            .execute(SignInInput {
                user_name: user.into(),
                password: password.into(),
            })
            .await
            .map(|out| out.session_token)
        }
    }

    #[tokio::test]
    async fn test_sign_in_binds_role() {
        let fx = fixture().await;
        let token = fx.sign_in("viewer", "viewer123").await.unwrap();
        let identity = fx.sessions.resolve(Some(&token)).await.unwrap().unwrap();
        assert_eq!(identity.user_role, UserRole::Viewer);
    }

    #[tokio::test]
    async fn test_bad_credentials_are_indistinguishable() {
        let fx = fixture().await;
        assert!(matches!(
            fx.sign_in("admin", "wrong").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            fx.sign_in("nobody", "admin123").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            fx.sign_in("", "").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_role_change_applies_on_next_sign_in() {
        let fx = fixture().await;
        let before = fx.sign_in("viewer", "viewer123").await.unwrap();

        let viewer = UserName::new("viewer").unwrap();
        assert!(fx.users.update_role(&viewer, UserRole::Admin).await.unwrap());

        let old = fx.sessions.resolve(Some(&before)).await.unwrap().unwrap();
        assert_eq!(old.user_role, UserRole::Viewer);

        let after = fx.sign_in("viewer", "viewer123").await.unwrap();
        let new = fx.sessions.resolve(Some(&after)).await.unwrap().unwrap();
        assert_eq!(new.user_role, UserRole::Admin);
    }

    #[tokio::test]
    async fn test_seeding_is_idempotent() {
        let fx = fixture().await;
        let created = seed_users(
            &fx.users,
            &fx.config,
            default_accounts("changed".into(), "changed".into()),
        )
        .await
        .unwrap();
        assert_eq!(created, 0);

        // Original secrets still work
        assert!(fx.sign_in("admin", "admin123").await.is_ok());
        assert!(fx.sign_in("admin", "changed").await.is_err());
    }

    #[tokio::test]
    async fn test_update_role_unknown_user() {
        let fx = fixture().await;
        let ghost = UserName::new("ghost").unwrap();
        assert!(!fx.users.update_role(&ghost, UserRole::Admin).await.unwrap());
    }
}

#[cfg(test)]
mod error_tests {
    use crate::error::AuthError;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_error_into_response_status_codes() {
        let test_cases: Vec<(AuthError, StatusCode)> = vec![
            (AuthError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AuthError::Unauthenticated, StatusCode::UNAUTHORIZED),
            (AuthError::Forbidden, StatusCode::FORBIDDEN),
            (AuthError::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
            (
                AuthError::StoreUnavailable("pool timed out".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AuthError::Internal("test".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in test_cases {
            assert_eq!(error.into_response().status(), expected_status);
        }
    }

    #[test]
    fn test_server_errors_hide_internal_detail() {
        let cases = [
            AuthError::from(sqlx::Error::RowNotFound),
            AuthError::Internal("argon2 params rejected".into()),
            AuthError::StoreUnavailable("connection refused: 10.0.0.7:5432".into()),
        ];
        for err in cases {
            let app_err = err.to_app_error();
            assert_eq!(app_err.status_code(), err.status_code().as_u16());
            assert!(!app_err.message().contains("argon2"), "{err}");
            assert!(!app_err.message().contains("10.0.0.7"), "{err}");
            assert!(!app_err.message().contains("no rows"), "{err}");
        }
        assert_eq!(
            AuthError::Internal("x".into()).to_app_error().message(),
            "Internal server error"
        );
    }

    #[tokio::test]
    async fn test_store_timeout_maps_to_unavailable() {
        let elapsed = tokio::time::timeout(
            std::time::Duration::from_millis(1),
            std::future::pending::<()>(),
        )
        .await
        .unwrap_err();
        let err = AuthError::from(elapsed);
        assert!(matches!(err, AuthError::StoreUnavailable(_)));
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_sqlx_errors_split_by_availability() {
        assert!(matches!(
            AuthError::from(sqlx::Error::PoolTimedOut),
            AuthError::StoreUnavailable(_)
        ));
        assert!(matches!(
            AuthError::from(sqlx::Error::RowNotFound),
            AuthError::Database(_)
        ));
    }
}
