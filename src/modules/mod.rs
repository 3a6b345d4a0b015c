pub mod auth;
pub mod entities;

pub use self::auth::model::LoginRequest;
pub use self::entities::registry::ENTITY_TYPES;
