use std::sync::Arc;

use anyhow::anyhow;

use scholaris_config::{CorsConfig, JwtConfig, RateLimitConfig, StoreBackend, StoreConfig};
use scholaris_core::AppError;
use scholaris_store::{EntityStore, MemoryStore, PgStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EntityStore>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
}

pub async fn init_app_state() -> Result<AppState, AppError> {
    let store_config = StoreConfig::from_env();
    let store: Arc<dyn EntityStore> = match store_config.backend {
        StoreBackend::Postgres => {
            let database_url = store_config.database_url.ok_or_else(|| {
                AppError::internal(anyhow!("DATABASE_URL must be set for the postgres backend"))
            })?;
            tracing::info!("Using PostgreSQL entity store");
            Arc::new(PgStore::connect(&database_url).await?)
        }
        StoreBackend::Memory => {
            tracing::info!("Using in-memory entity store");
            Arc::new(MemoryStore::new())
        }
    };

    Ok(AppState {
        store,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        rate_limit_config: RateLimitConfig::from_env(),
    })
}
