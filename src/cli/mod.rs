use serde_json::json;
use uuid::Uuid;

use scholaris_auth::entitlement::ROLE_ADMIN;
use scholaris_core::hash_password;
use scholaris_store::EntityStore;

use crate::modules::auth::service::{USERS_COLLECTION, find_user_by_email};

pub mod seeder;

/// Creates an operator account with the admin role.
pub async fn create_admin(
    store: &dyn EntityStore,
    first_name: &str,
    last_name: &str,
    email: &str,
    password: &str,
) -> Result<Uuid, Box<dyn std::error::Error>> {
    if find_user_by_email(store, email)
        .await
        .map_err(|e| e.error.to_string())?
        .is_some()
    {
        return Err("User with this email already exists".into());
    }

    let hashed_password =
        hash_password(password).map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let id = store
        .create(
            USERS_COLLECTION,
            json!({
                "first_name": first_name,
                "last_name": last_name,
                "email": email,
                "password": hashed_password,
                "role": ROLE_ADMIN,
            }),
        )
        .await
        .map_err(|e| e.error.to_string())?;

    Ok(id)
}
