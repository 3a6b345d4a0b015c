use std::env;

/// Which entity store backend to run against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres,
}

#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub database_url: Option<String>,
}

impl StoreConfig {
    /// Reads `STORE_BACKEND` (`memory` | `postgres`). When unset, runs
    /// against Postgres if `DATABASE_URL` is present, in memory otherwise.
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL").ok();
        let backend = match env::var("STORE_BACKEND").ok().as_deref() {
            Some("postgres") => StoreBackend::Postgres,
            Some("memory") => StoreBackend::Memory,
            _ => {
                if database_url.is_some() {
                    StoreBackend::Postgres
                } else {
                    StoreBackend::Memory
                }
            }
        };

        Self {
            backend,
            database_url,
        }
    }
}
