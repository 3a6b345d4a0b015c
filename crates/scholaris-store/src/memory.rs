//! In-memory entity store.
//!
//! Backs tests and `STORE_BACKEND=memory` deployments. All list semantics
//! (filtering, search, sort, pagination) are evaluated in process with the
//! shared matchers from `scholaris-core`, so this backend is the executable
//! reference for what the SQL backend must do.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::anyhow;
use async_trait::async_trait;
use serde_json::{Value, json};
use uuid::Uuid;

use scholaris_core::errors::AppError;
use scholaris_core::filter::{compare_by_field, matches_record, matches_search};
use scholaris_core::page::{ListQuery, Page};
use scholaris_core::patch::PatchDocument;

use crate::{EntityStore, require_object};

#[derive(Debug, Clone)]
struct StoredRecord {
    data: Value,
    /// Monotonic insertion counter; newest-first is the default list order.
    seq: u64,
}

/// Process-local store keyed by entity segment, then record id.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, HashMap<Uuid, StoredRecord>>>,
    next_seq: AtomicU64,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_error() -> AppError {
        AppError::internal(anyhow!("Store lock poisoned"))
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn create(&self, entity: &str, mut data: Value) -> Result<Uuid, AppError> {
        require_object(&data)?;

        let id = Uuid::new_v4();
        data["id"] = json!(id.to_string());

        let mut records = self.records.write().map_err(|_| Self::lock_error())?;
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        records
            .entry(entity.to_string())
            .or_default()
            .insert(id, StoredRecord { data, seq });

        Ok(id)
    }

    async fn list(&self, entity: &str, query: &ListQuery) -> Result<Page, AppError> {
        let records = self.records.read().map_err(|_| Self::lock_error())?;

        let mut matching: Vec<&StoredRecord> = records
            .get(entity)
            .map(|collection| {
                collection
                    .values()
                    .filter(|record| matches_record(&record.data, &query.criteria))
                    .filter(|record| match &query.search_term {
                        Some(term) => matches_search(&record.data, term),
                        None => true,
                    })
                    .collect()
            })
            .unwrap_or_default();

        match &query.sort_field {
            Some(field) => matching.sort_by(|a, b| {
                compare_by_field(&a.data, &b.data, field, query.sort_order)
                    .then_with(|| b.seq.cmp(&a.seq))
            }),
            None => matching.sort_by(|a, b| b.seq.cmp(&a.seq)),
        }

        let total = matching.len() as i64;
        let data: Vec<Value> = matching
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.page_size as usize)
            .map(|record| record.data.clone())
            .collect();

        Ok(Page::new(data, total, query))
    }

    async fn get(&self, entity: &str, id: Uuid) -> Result<Value, AppError> {
        let records = self.records.read().map_err(|_| Self::lock_error())?;
        records
            .get(entity)
            .and_then(|collection| collection.get(&id))
            .map(|record| record.data.clone())
            .ok_or_else(|| AppError::not_found(anyhow!("Record not found")))
    }

    async fn replace(&self, entity: &str, id: Uuid, mut data: Value) -> Result<(), AppError> {
        require_object(&data)?;
        data["id"] = json!(id.to_string());

        let mut records = self.records.write().map_err(|_| Self::lock_error())?;
        let record = records
            .get_mut(entity)
            .and_then(|collection| collection.get_mut(&id))
            .ok_or_else(|| AppError::not_found(anyhow!("Record not found")))?;

        record.data = data;
        Ok(())
    }

    async fn patch(&self, entity: &str, id: Uuid, patch: &PatchDocument) -> Result<(), AppError> {
        let mut records = self.records.write().map_err(|_| Self::lock_error())?;
        let record = records
            .get_mut(entity)
            .and_then(|collection| collection.get_mut(&id))
            .ok_or_else(|| AppError::not_found(anyhow!("Record not found")))?;

        // patch a copy so a failing operation leaves the record untouched
        let mut updated = record.data.clone();
        patch.apply(&mut updated).map_err(AppError::bad_request)?;
        require_object(&updated)?;
        updated["id"] = json!(id.to_string());

        record.data = updated;
        Ok(())
    }

    async fn delete(&self, entity: &str, id: Uuid) -> Result<(), AppError> {
        let mut records = self.records.write().map_err(|_| Self::lock_error())?;
        records
            .get_mut(entity)
            .and_then(|collection| collection.remove(&id))
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(anyhow!("Record not found")))
    }
}
