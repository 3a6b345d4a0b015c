use anyhow::anyhow;
use serde_json::Value;
use tracing::instrument;
use uuid::Uuid;

use scholaris_auth::create_access_token;
use scholaris_auth::entitlement::grants_for_role;
use scholaris_config::JwtConfig;
use scholaris_core::filter::{FilterCriteria, FilterOperator};
use scholaris_core::page::ListQuery;
use scholaris_core::{AppError, verify_password};
use scholaris_store::EntityStore;

use super::model::{LoginRequest, LoginResponse};

/// Store collection holding operator accounts. Absent from the entity
/// registry, so it is unreachable through `/api/{entity}`.
pub const USERS_COLLECTION: &str = "users";

/// Looks up a user record by exact email.
pub async fn find_user_by_email(
    store: &dyn EntityStore,
    email: &str,
) -> Result<Option<Value>, AppError> {
    let query = ListQuery {
        criteria: vec![FilterCriteria {
            property_name: "email".to_string(),
            operator: FilterOperator::Equal,
            value: email.to_string(),
        }],
        page_size: 1,
        ..ListQuery::default()
    };

    let page = store.list(USERS_COLLECTION, &query).await?;
    Ok(page.data.into_iter().next())
}

pub struct AuthService;

impl AuthService {
    /// Verifies credentials against the reserved users collection and
    /// issues an access token carrying the role's grants.
    #[instrument(skip(store, dto, jwt_config))]
    pub async fn login_user(
        store: &dyn EntityStore,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let mut user = find_user_by_email(store, &dto.email)
            .await?
            .ok_or_else(|| AppError::unauthorized(anyhow!("Invalid credentials")))?;

        let password_hash = user
            .get("password")
            .and_then(Value::as_str)
            .ok_or_else(|| AppError::unauthorized(anyhow!("Invalid credentials")))?;

        if !verify_password(&dto.password, password_hash)? {
            return Err(AppError::unauthorized(anyhow!("Invalid credentials")));
        }

        let user_id = user
            .get("id")
            .and_then(Value::as_str)
            .and_then(|s| Uuid::parse_str(s).ok())
            .ok_or_else(|| AppError::internal(anyhow!("User record has no valid id")))?;

        let role = user
            .get("role")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let permissions = grants_for_role(&role);

        let access_token =
            create_access_token(user_id, &dto.email, &role, permissions, jwt_config)?;

        if let Some(fields) = user.as_object_mut() {
            fields.remove("password");
        }

        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: jwt_config.access_token_expiry,
            user,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholaris_auth::verify_token;
    use scholaris_core::hash_password;
    use scholaris_store::MemoryStore;
    use serde_json::json;

    fn test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            access_token_expiry: 3600,
        }
    }

    async fn seed_user(store: &MemoryStore, email: &str, password: &str, role: &str) {
        store
            .create(
                USERS_COLLECTION,
                json!({
                    "email": email,
                    "password": hash_password(password).unwrap(),
                    "first_name": "Test",
                    "last_name": "User",
                    "role": role,
                }),
            )
            .await
            .unwrap();
    }

    fn login_request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let store = MemoryStore::new();
        seed_user(&store, "admin@example.com", "testpass123", "admin").await;

        let response = AuthService::login_user(
            &store,
            login_request("admin@example.com", "testpass123"),
            &test_jwt_config(),
        )
        .await
        .unwrap();

        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, 3600);

        let claims = verify_token(&response.access_token, &test_jwt_config()).unwrap();
        assert_eq!(claims.email, "admin@example.com");
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.permissions, vec!["*"]);
    }

    #[tokio::test]
    async fn test_login_strips_password_from_user() {
        let store = MemoryStore::new();
        seed_user(&store, "admin@example.com", "testpass123", "admin").await;

        let response = AuthService::login_user(
            &store,
            login_request("admin@example.com", "testpass123"),
            &test_jwt_config(),
        )
        .await
        .unwrap();

        assert!(response.user.get("password").is_none());
        assert_eq!(response.user["email"], "admin@example.com");
        assert!(response.user["id"].is_string());
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_unauthorized() {
        let store = MemoryStore::new();
        seed_user(&store, "admin@example.com", "testpass123", "admin").await;

        let err = AuthService::login_user(
            &store,
            login_request("admin@example.com", "wrong"),
            &test_jwt_config(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status.as_u16(), 401);
        assert_eq!(err.error.to_string(), "Invalid credentials");
    }

    #[tokio::test]
    async fn test_login_unknown_email_is_unauthorized() {
        let store = MemoryStore::new();

        let err = AuthService::login_user(
            &store,
            login_request("nobody@example.com", "whatever"),
            &test_jwt_config(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status.as_u16(), 401);
        assert_eq!(err.error.to_string(), "Invalid credentials");
    }

    #[tokio::test]
    async fn test_auditor_gets_read_only_grants() {
        let store = MemoryStore::new();
        seed_user(&store, "auditor@example.com", "testpass123", "auditor").await;

        let response = AuthService::login_user(
            &store,
            login_request("auditor@example.com", "testpass123"),
            &test_jwt_config(),
        )
        .await
        .unwrap();

        let claims = verify_token(&response.access_token, &test_jwt_config()).unwrap();
        assert_eq!(claims.permissions, vec!["*:read"]);
    }

    #[tokio::test]
    async fn test_find_user_by_email_is_exact() {
        let store = MemoryStore::new();
        seed_user(&store, "admin@example.com", "testpass123", "admin").await;

        assert!(
            find_user_by_email(&store, "admin@example.com")
                .await
                .unwrap()
                .is_some()
        );
        assert!(
            find_user_by_email(&store, "ADMIN@example.com")
                .await
                .unwrap()
                .is_none()
        );
    }
}
