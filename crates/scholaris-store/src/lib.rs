//! # Scholaris Store
//!
//! The persistence seam of the Scholaris API: every entity endpoint talks to
//! an [`EntityStore`], never to a concrete backend.
//!
//! Records are opaque JSON objects namespaced by entity segment. The store
//! owns id assignment (a UUID injected as the record's `"id"` field at
//! create time) and keeps it immutable through replace and patch.
//!
//! Two backends implement identical observable semantics:
//!
//! - [`MemoryStore`]: process-local, used by tests and `STORE_BACKEND=memory`
//! - [`PgStore`]: one JSONB table in PostgreSQL
//!
//! # Example
//!
//! ```ignore
//! use scholaris_store::{EntityStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! let id = store.create("building", json!({"name": "Main Hall"})).await?;
//! let record = store.get("building", id).await?;
//! assert_eq!(record["id"], json!(id.to_string()));
//! ```

use anyhow::anyhow;
use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use scholaris_core::errors::AppError;
use scholaris_core::page::{ListQuery, Page};
use scholaris_core::patch::PatchDocument;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Persistence operations for one entity collection.
///
/// Implementations must be safe for concurrent invocation; handlers call
/// them from simultaneous requests without coordination.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Persists a new record and returns its assigned id.
    async fn create(&self, entity: &str, data: Value) -> Result<Uuid, AppError>;

    /// Returns one page of records matching the query.
    async fn list(&self, entity: &str, query: &ListQuery) -> Result<Page, AppError>;

    /// Returns the record with the given id.
    async fn get(&self, entity: &str, id: Uuid) -> Result<Value, AppError>;

    /// Overwrites the record with the given id.
    async fn replace(&self, entity: &str, id: Uuid, data: Value) -> Result<(), AppError>;

    /// Applies a patch document to the record with the given id. Nothing is
    /// persisted when any operation in the document fails.
    async fn patch(&self, entity: &str, id: Uuid, patch: &PatchDocument) -> Result<(), AppError>;

    /// Removes the record with the given id.
    async fn delete(&self, entity: &str, id: Uuid) -> Result<(), AppError>;
}

/// Rejects payloads that are not JSON objects; only objects can carry the
/// injected `"id"` field.
pub(crate) fn require_object(data: &Value) -> Result<(), AppError> {
    if data.is_object() {
        Ok(())
    } else {
        Err(AppError::bad_request(anyhow!(
            "Entity payload must be a JSON object."
        )))
    }
}
