//! Middleware modules for request processing.
//!
//! This module contains the extractors for handling authentication and
//! entitlement checks.
//!
//! # Authentication Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. `AuthUser` extractor validates the JWT and extracts claims
//! 3. The handler calls [`auth::AuthUser::require`] with the entity segment
//!    and the action it is about to perform
//! 4. Handler executes if the check passes
//!
//! # Example
//!
//! ```ignore
//! use scholaris_auth::entitlement::Action;
//! use crate::middleware::auth::AuthUser;
//!
//! async fn delete_record(auth_user: AuthUser, ...) -> Result<_, AppError> {
//!     auth_user.require("building", Action::Delete)?;
//!     // Only runs when the token carries "building:delete" or a
//!     // wildcard grant covering it
//! }
//! ```

pub mod auth;
