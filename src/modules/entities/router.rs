use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_record, delete_record, get_record, list_entities, list_records, patch_record,
    replace_record,
};

/// Routes for the discovery endpoint and the generic per-entity CRUD
/// contract. `/entities` is static, so it wins over the `{entity}` capture.
pub fn init_entities_router() -> Router<AppState> {
    Router::new()
        .route("/entities", get(list_entities))
        .route("/{entity}", post(create_record).get(list_records))
        .route(
            "/{entity}/{id}",
            get(get_record)
                .put(replace_record)
                .patch(patch_record)
                .delete(delete_record),
        )
}
