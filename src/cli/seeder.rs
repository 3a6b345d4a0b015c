use std::time::Instant;

use fake::Fake;
use fake::faker::address::en::*;
use fake::faker::company::en::*;
use fake::faker::internet::en::*;
use fake::faker::name::en::*;
use serde_json::{Value, json};

use scholaris_auth::entitlement::ROLE_AUDITOR;
use scholaris_core::hash_password;
use scholaris_store::EntityStore;

use crate::modules::auth::service::{USERS_COLLECTION, find_user_by_email};

/// Password assigned to every seeded account.
pub const SEED_PASSWORD: &str = "password123";
/// Email of the seeded read-only account.
pub const SEED_AUDITOR_EMAIL: &str = "auditor@scholaris.dev";

const SEEDED_ENTITIES: &[&str] = &["building", "classroom", "course", "student", "teacher"];
const DEPARTMENTS: &[&str] = &["Mathematics", "Science", "Humanities", "Languages", "Arts"];
const STATUSES: &[&str] = &["Active", "Inactive"];

/// Seeds the store with demo data for local development: a read-only
/// auditor account plus `records_per_entity` records in each of a handful
/// of entity collections.
pub async fn seed_store(
    store: &dyn EntityStore,
    records_per_entity: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();

    println!("🌱 Starting store seeding...");
    println!("   - Records per entity type: {}", records_per_entity);

    if find_user_by_email(store, SEED_AUDITOR_EMAIL)
        .await
        .map_err(|e| e.error.to_string())?
        .is_none()
    {
        let password_hash =
            hash_password(SEED_PASSWORD).map_err(|e| format!("Failed to hash password: {}", e.error))?;
        store
            .create(
                USERS_COLLECTION,
                json!({
                    "first_name": "Demo",
                    "last_name": "Auditor",
                    "email": SEED_AUDITOR_EMAIL,
                    "password": password_hash,
                    "role": ROLE_AUDITOR,
                }),
            )
            .await
            .map_err(|e| e.error.to_string())?;
        println!(
            "   ✓ Created auditor account {} (password: {})",
            SEED_AUDITOR_EMAIL, SEED_PASSWORD
        );
    }

    for entity in SEEDED_ENTITIES {
        for index in 0..records_per_entity {
            let record = sample_record(entity, index);
            store
                .create(entity, record)
                .await
                .map_err(|e| e.error.to_string())?;
        }
        println!("   ✓ Seeded {} {} records", records_per_entity, entity);
    }

    println!("\n✅ Seeding finished in {:?}", start_time.elapsed());
    Ok(())
}

fn sample_record(entity: &str, index: usize) -> Value {
    let status = STATUSES[index % STATUSES.len()];
    let department = DEPARTMENTS[index % DEPARTMENTS.len()];

    match entity {
        "building" => {
            let city: String = CityName().fake();
            let floors: i64 = (1..7).fake();
            let capacity: i64 = (100..900).fake();
            json!({
                "name": format!("{} Hall", city),
                "code": format!("BLD-{:03}", index + 1),
                "floors": floors,
                "capacity": capacity,
                "status": status,
            })
        }
        "classroom" => {
            let capacity: i64 = (15..45).fake();
            json!({
                "name": format!("Room {}", 100 + index),
                "building": format!("BLD-{:03}", index % 10 + 1),
                "capacity": capacity,
                "hasProjector": index % 3 != 0,
                "status": status,
            })
        }
        "course" => {
            let topic: String = Buzzword().fake();
            let credits: i64 = (1..6).fake();
            json!({
                "title": format!("{} Studies", topic),
                "code": format!("CRS-{:03}", index + 1),
                "credits": credits,
                "department": department,
                "status": status,
            })
        }
        "student" => {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();
            let email: String = SafeEmail().fake();
            json!({
                "firstName": first_name,
                "lastName": last_name,
                "email": email,
                "enrollmentYear": 2020 + (index % 6),
                "status": status,
            })
        }
        "teacher" => {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();
            let email: String = SafeEmail().fake();
            json!({
                "firstName": first_name,
                "lastName": last_name,
                "email": email,
                "department": department,
                "status": status,
            })
        }
        _ => json!({
            "name": format!("{} {}", entity, index + 1),
            "status": status,
        }),
    }
}
