use anyhow::anyhow;
use axum::Json;
use axum::extract::{Path, Query, State};
use serde_json::Value;
use tracing::instrument;
use uuid::Uuid;

use scholaris_auth::entitlement::Action;
use scholaris_core::{AppError, Page, PatchDocument};

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;

use super::model::{CreatedResponse, EntityDescriptor, ListParams, StatusResponse};
use super::registry;

/// List the entity types served by this API
#[utoipa::path(
    get,
    path = "/api/entities",
    responses(
        (status = 200, description = "The entity type catalog", body = [EntityDescriptor]),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Entities",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all)]
pub async fn list_entities(_auth_user: AuthUser) -> Result<Json<Vec<EntityDescriptor>>, AppError> {
    Ok(Json(registry::descriptors()))
}

/// Create a new record
#[utoipa::path(
    post,
    path = "/api/{entity}",
    params(("entity" = String, Path, description = "Entity type segment")),
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Record created", body = CreatedResponse),
        (status = 400, description = "Body is not a JSON object", body = ErrorResponse),
        (status = 401, description = "Missing token or entitlement", body = ErrorResponse),
        (status = 404, description = "Unknown entity type", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Entities",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn create_record(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(entity): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Json<CreatedResponse>, AppError> {
    let segment = registry::resolve_segment(&entity)?;
    auth_user.require(&segment, Action::Create)?;

    let id = state.store.create(&segment, payload).await?;
    Ok(Json(CreatedResponse { id }))
}

/// List records with filtering, search, sorting, and pagination
#[utoipa::path(
    get,
    path = "/api/{entity}",
    params(
        ("entity" = String, Path, description = "Entity type segment"),
        ListParams
    ),
    responses(
        (status = 200, description = "One page of matching records", body = Page),
        (status = 400, description = "Invalid pagination or filter criteria", body = ErrorResponse),
        (status = 401, description = "Missing token or entitlement", body = ErrorResponse),
        (status = 404, description = "Unknown entity type", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Entities",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn list_records(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(entity): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<Page>, AppError> {
    let segment = registry::resolve_segment(&entity)?;
    auth_user.require(&segment, Action::Read)?;

    let query = params.into_query()?;
    let page = state.store.list(&segment, &query).await?;
    Ok(Json(page))
}

/// Get a record by ID
#[utoipa::path(
    get,
    path = "/api/{entity}/{id}",
    params(
        ("entity" = String, Path, description = "Entity type segment"),
        ("id" = Uuid, Path, description = "Record ID")
    ),
    responses(
        (status = 200, description = "The record", body = serde_json::Value),
        (status = 401, description = "Missing token or entitlement", body = ErrorResponse),
        (status = 404, description = "Unknown entity type or record", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Entities",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn get_record(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((entity, id)): Path<(String, Uuid)>,
) -> Result<Json<Value>, AppError> {
    let segment = registry::resolve_segment(&entity)?;
    auth_user.require(&segment, Action::Read)?;

    let record = state.store.get(&segment, id).await?;
    Ok(Json(record))
}

/// Replace a record by ID
#[utoipa::path(
    put,
    path = "/api/{entity}/{id}",
    params(
        ("entity" = String, Path, description = "Entity type segment"),
        ("id" = Uuid, Path, description = "Record ID")
    ),
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Record replaced", body = StatusResponse),
        (status = 400, description = "Body id does not match the path id", body = ErrorResponse),
        (status = 401, description = "Missing token or entitlement", body = ErrorResponse),
        (status = 404, description = "Unknown entity type or record", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Entities",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn replace_record(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((entity, id)): Path<(String, Uuid)>,
    Json(payload): Json<Value>,
) -> Result<Json<StatusResponse>, AppError> {
    let segment = registry::resolve_segment(&entity)?;
    auth_user.require(&segment, Action::Update)?;

    let body_id = payload
        .get("id")
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s).ok());
    if body_id != Some(id) {
        return Err(AppError::bad_request(anyhow!("Mismatched Id")));
    }

    state.store.replace(&segment, id, payload).await?;
    Ok(Json(StatusResponse { status: true }))
}

/// Apply a patch document to a record by ID
#[utoipa::path(
    patch,
    path = "/api/{entity}/{id}",
    params(
        ("entity" = String, Path, description = "Entity type segment"),
        ("id" = Uuid, Path, description = "Record ID")
    ),
    request_body = PatchDocument,
    responses(
        (status = 200, description = "Record patched", body = StatusResponse),
        (status = 400, description = "Missing patch document or failed operation", body = ErrorResponse),
        (status = 401, description = "Missing token or entitlement", body = ErrorResponse),
        (status = 404, description = "Unknown entity type or record", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Entities",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, patch))]
pub async fn patch_record(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((entity, id)): Path<(String, Uuid)>,
    Json(patch): Json<Option<PatchDocument>>,
) -> Result<Json<StatusResponse>, AppError> {
    let segment = registry::resolve_segment(&entity)?;
    auth_user.require(&segment, Action::Update)?;

    let patch =
        patch.ok_or_else(|| AppError::bad_request(anyhow!("Patch document is missing.")))?;

    state.store.patch(&segment, id, &patch).await?;
    Ok(Json(StatusResponse { status: true }))
}

/// Delete a record by ID
#[utoipa::path(
    delete,
    path = "/api/{entity}/{id}",
    params(
        ("entity" = String, Path, description = "Entity type segment"),
        ("id" = Uuid, Path, description = "Record ID")
    ),
    responses(
        (status = 200, description = "Record deleted", body = StatusResponse),
        (status = 401, description = "Missing token or entitlement", body = ErrorResponse),
        (status = 404, description = "Unknown entity type or record", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Entities",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_record(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((entity, id)): Path<(String, Uuid)>,
) -> Result<Json<StatusResponse>, AppError> {
    let segment = registry::resolve_segment(&entity)?;
    auth_user.require(&segment, Action::Delete)?;

    state.store.delete(&segment, id).await?;
    Ok(Json(StatusResponse { status: true }))
}
