//! JWT claim structure for access tokens.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JWT claims for access tokens.
///
/// These claims are embedded in access tokens and provide everything needed
/// for authentication and entitlement decisions without database lookups.
///
/// # Fields
///
/// - `sub`: User ID (subject)
/// - `email`: User's email address
/// - `role`: The user's role name
/// - `permissions`: Permission strings granted to the user, possibly with
///   wildcards (`*`, `building:*`, `*:read`)
/// - `exp`: Token expiration timestamp
/// - `iat`: Token issued-at timestamp
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    /// User's email address
    pub email: String,
    /// Role name the permissions were derived from
    pub role: String,
    /// Permission strings granted to the user
    pub permissions: Vec<String>,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}
