//! # Scholaris Config
//!
//! Configuration types for the Scholaris API.
//!
//! This crate provides configuration structures loaded from environment
//! variables:
//!
//! - [`jwt`]: JWT authentication configuration
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`rate_limit`]: API rate limiting configuration
//! - [`store`]: Entity store backend selection
//!
//! # Example
//!
//! ```ignore
//! use scholaris_config::{CorsConfig, JwtConfig, RateLimitConfig, StoreConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let rate_limit_config = RateLimitConfig::from_env();
//! let store_config = StoreConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod rate_limit;
pub mod store;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use rate_limit::RateLimitConfig;
pub use store::{StoreBackend, StoreConfig};
