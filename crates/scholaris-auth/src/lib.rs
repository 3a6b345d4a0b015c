//! # Scholaris Auth
//!
//! Authentication types, JWT utilities, and entitlement evaluation for the
//! Scholaris API.
//!
//! This crate provides:
//!
//! - [`claims`]: JWT claim structure for access tokens
//! - [`jwt`]: Token creation and verification utilities
//! - [`entitlement`]: Per-entity, per-action permission strings and grant
//!   matching
//!
//! # Example
//!
//! ```ignore
//! use scholaris_auth::{create_access_token, verify_token};
//! use scholaris_auth::entitlement::{Action, is_granted, permission_for};
//! use scholaris_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(
//!     user_id,
//!     "admin@example.com",
//!     "admin",
//!     vec!["*".to_string()],
//!     &config,
//! )?;
//!
//! let claims = verify_token(&token, &config)?;
//! let needed = permission_for("building", Action::Read);
//! assert!(is_granted(&claims.permissions, &needed));
//! ```

pub mod claims;
pub mod entitlement;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use entitlement::{Action, is_granted, permission_for};
pub use jwt::{create_access_token, verify_token};
