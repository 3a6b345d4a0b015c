//! PostgreSQL entity store.
//!
//! Records for every entity live in one `entity_records` table keyed by
//! `(entity, id)` with the payload in a JSONB column. List queries compile
//! `FilterCriteria` into WHERE fragments with numbered binds so filtering,
//! search and sorting all happen server side.

use anyhow::anyhow;
use async_trait::async_trait;
use serde_json::{Value, json};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::instrument;
use uuid::Uuid;

use scholaris_core::errors::AppError;
use scholaris_core::filter::{FilterCriteria, FilterOperator, SortOrder};
use scholaris_core::page::{ListQuery, Page};
use scholaris_core::patch::PatchDocument;

use crate::{EntityStore, require_object};

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool against `database_url` and applies pending migrations.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .map_err(|e| AppError::internal(anyhow!("Failed to connect to database: {}", e)))?;

        sqlx::migrate!("../../migrations")
            .run(&pool)
            .await
            .map_err(|e| AppError::internal(anyhow!("Failed to run migrations: {}", e)))?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// SQL compiled from a [`ListQuery`]. `$1` is always the entity segment;
/// the first `where_binds` entries of `binds` belong to the WHERE clause
/// and are shared with the count query, any remainder is the sort key.
struct ListSql {
    select: String,
    count: String,
    binds: Vec<String>,
    where_binds: usize,
}

fn push_bind(binds: &mut Vec<String>, value: String) -> usize {
    binds.push(value);
    binds.len() + 1
}

/// Comparison against a JSON property. Values that parse as numbers compare
/// numerically when the stored property is a number, otherwise as text, which
/// mirrors the in-memory matcher.
fn comparison_condition(
    criterion: &FilterCriteria,
    field: usize,
    binds: &mut Vec<String>,
    op: &str,
) -> String {
    let value = push_bind(binds, criterion.value.clone());

    let text = format!("data->>${field} {op} ${value}");
    if criterion.value.parse::<f64>().is_err() {
        return text;
    }

    format!(
        "CASE WHEN jsonb_typeof(data->${field}) = 'number' THEN (data->>${field})::numeric {op} (${value})::numeric ELSE {text} END"
    )
}

fn build_where(query: &ListQuery, binds: &mut Vec<String>) -> String {
    let mut clause = String::from("entity = $1");

    for criterion in &query.criteria {
        let field = push_bind(binds, criterion.property_name.clone());
        let condition = match criterion.operator {
            FilterOperator::Contains => {
                let pattern = push_bind(binds, format!("%{}%", criterion.value));
                format!("data->>${field} ILIKE ${pattern}")
            }
            FilterOperator::StartsWith => {
                let pattern = push_bind(binds, format!("{}%", criterion.value));
                format!("data->>${field} ILIKE ${pattern}")
            }
            FilterOperator::EndsWith => {
                let pattern = push_bind(binds, format!("%{}", criterion.value));
                format!("data->>${field} ILIKE ${pattern}")
            }
            FilterOperator::Equal => comparison_condition(criterion, field, binds, "="),
            FilterOperator::NotEqual => {
                comparison_condition(criterion, field, binds, "IS DISTINCT FROM")
            }
            FilterOperator::GreaterThan => comparison_condition(criterion, field, binds, ">"),
            FilterOperator::GreaterThanOrEqual => {
                comparison_condition(criterion, field, binds, ">=")
            }
            FilterOperator::LessThan => comparison_condition(criterion, field, binds, "<"),
            FilterOperator::LessThanOrEqual => comparison_condition(criterion, field, binds, "<="),
        };
        clause.push_str(" AND (");
        clause.push_str(&condition);
        clause.push(')');
    }

    if let Some(term) = &query.search_term {
        let pattern = push_bind(binds, format!("%{}%", term));
        clause.push_str(&format!(" AND data::text ILIKE ${pattern}"));
    }

    clause
}

/// Sort key ordering: numeric values first, then text, missing properties
/// last in either direction. Insertion time breaks ties newest first.
fn build_order_by(query: &ListQuery, binds: &mut Vec<String>) -> String {
    let direction = match query.sort_order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    };

    match &query.sort_field {
        Some(field) => {
            let key = push_bind(binds, field.clone());
            format!(
                " ORDER BY (CASE WHEN jsonb_typeof(data->${key}) = 'number' THEN (data->>${key})::numeric END) {direction} NULLS LAST, data->>${key} {direction} NULLS LAST, created_at DESC"
            )
        }
        None => String::from(" ORDER BY created_at DESC"),
    }
}

fn build_list_sql(query: &ListQuery) -> ListSql {
    let mut binds = Vec::new();
    let where_clause = build_where(query, &mut binds);
    let where_binds = binds.len();

    let count = format!("SELECT COUNT(*) FROM entity_records WHERE {where_clause}");

    let order_by = build_order_by(query, &mut binds);
    let select = format!(
        "SELECT data FROM entity_records WHERE {where_clause}{order_by} LIMIT {} OFFSET {}",
        query.page_size,
        query.offset()
    );

    ListSql {
        select,
        count,
        binds,
        where_binds,
    }
}

#[async_trait]
impl EntityStore for PgStore {
    #[instrument(skip(self, data))]
    async fn create(&self, entity: &str, mut data: Value) -> Result<Uuid, AppError> {
        require_object(&data)?;

        let id = Uuid::new_v4();
        data["id"] = json!(id.to_string());

        sqlx::query("INSERT INTO entity_records (entity, id, data) VALUES ($1, $2, $3)")
            .bind(entity)
            .bind(id)
            .bind(&data)
            .execute(&self.pool)
            .await?;

        Ok(id)
    }

    #[instrument(skip(self, query))]
    async fn list(&self, entity: &str, query: &ListQuery) -> Result<Page, AppError> {
        let sql = build_list_sql(query);

        let mut count_query = sqlx::query_scalar::<_, i64>(&sql.count).bind(entity);
        for bind in &sql.binds[..sql.where_binds] {
            count_query = count_query.bind(bind);
        }
        let total = count_query.fetch_one(&self.pool).await?;

        let mut select_query = sqlx::query_scalar::<_, Value>(&sql.select).bind(entity);
        for bind in &sql.binds {
            select_query = select_query.bind(bind);
        }
        let data = select_query.fetch_all(&self.pool).await?;

        Ok(Page::new(data, total, query))
    }

    #[instrument(skip(self))]
    async fn get(&self, entity: &str, id: Uuid) -> Result<Value, AppError> {
        sqlx::query_scalar::<_, Value>(
            "SELECT data FROM entity_records WHERE entity = $1 AND id = $2",
        )
        .bind(entity)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Record not found")))
    }

    #[instrument(skip(self, data))]
    async fn replace(&self, entity: &str, id: Uuid, mut data: Value) -> Result<(), AppError> {
        require_object(&data)?;
        data["id"] = json!(id.to_string());

        let result = sqlx::query(
            "UPDATE entity_records SET data = $3, updated_at = NOW() WHERE entity = $1 AND id = $2",
        )
        .bind(entity)
        .bind(id)
        .bind(&data)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Record not found")));
        }

        Ok(())
    }

    #[instrument(skip(self, patch))]
    async fn patch(&self, entity: &str, id: Uuid, patch: &PatchDocument) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let mut data = sqlx::query_scalar::<_, Value>(
            "SELECT data FROM entity_records WHERE entity = $1 AND id = $2 FOR UPDATE",
        )
        .bind(entity)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Record not found")))?;

        patch.apply(&mut data).map_err(AppError::bad_request)?;
        require_object(&data)?;
        data["id"] = json!(id.to_string());

        sqlx::query(
            "UPDATE entity_records SET data = $3, updated_at = NOW() WHERE entity = $1 AND id = $2",
        )
        .bind(entity)
        .bind(id)
        .bind(&data)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, entity: &str, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM entity_records WHERE entity = $1 AND id = $2")
            .bind(entity)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Record not found")));
        }

        Ok(())
    }
}
