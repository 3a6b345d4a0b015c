use anyhow::anyhow;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use scholaris_auth::entitlement::{Action, is_granted, permission_for};
use scholaris_auth::{Claims, verify_token};
use scholaris_core::AppError;

use crate::state::AppState;

/// Extractor that validates the JWT and provides the authenticated user's
/// claims. Entitlement checks happen in the handler via [`AuthUser::require`].
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Check that the user is entitled to perform `action` on `segment`.
    ///
    /// The required permission is derived from the entity segment at
    /// request time, so one check covers every entity type.
    pub fn require(&self, segment: &str, action: Action) -> Result<(), AppError> {
        let permission = permission_for(segment, action);
        if is_granted(&self.0.permissions, &permission) {
            Ok(())
        } else {
            Err(AppError::unauthorized(anyhow!(
                "Access denied. Missing required permission: {}",
                permission
            )))
        }
    }

    /// Get the user ID as UUID
    pub fn user_id(&self) -> Result<uuid::Uuid, AppError> {
        uuid::Uuid::parse_str(&self.0.sub)
            .map_err(|_| AppError::unauthorized(anyhow!("Invalid user ID in token")))
    }

    /// Get the user's email
    pub fn email(&self) -> &str {
        &self.0.email
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized(anyhow!("Missing authorization header")))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized(anyhow!("Invalid authorization header format")))?;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}
