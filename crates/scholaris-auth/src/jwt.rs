//! JWT creation and verification for API authentication.
//!
//! Access tokens are HS256 JWTs carrying the user's id, email, role, and
//! permission strings, so entitlement checks need no database round-trip.
//!
//! # Example
//!
//! ```ignore
//! use scholaris_auth::{create_access_token, verify_token};
//! use scholaris_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, "a@b.test", "admin", vec!["*".into()], &config)?;
//! let claims = verify_token(&token, &config)?;
//! ```

use anyhow::anyhow;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use scholaris_config::JwtConfig;
use scholaris_core::AppError;

use crate::claims::Claims;

/// Creates an access token with the user's role and permission grants.
///
/// # Errors
///
/// Returns an error if token encoding fails (e.g. invalid secret key).
pub fn create_access_token(
    user_id: Uuid,
    email: &str,
    role: &str,
    permissions: Vec<String>,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let exp = now + jwt_config.access_token_expiry;

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        role: role.to_string(),
        permissions,
        exp: exp as usize,
        iat: now as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow!("Failed to create token: {}", e)))
}

/// Verifies an access token's signature and expiry and returns its claims.
///
/// # Errors
///
/// Returns an unauthorized error if the token is malformed, the signature
/// does not match, or the token has expired.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized(anyhow!("Invalid or expired token")))
}
