//! JSON read endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use livelist_core::Item;

use super::{parse_id, HandlerError};
use crate::state::AppState;

/// GET /api/items - Snapshot of the whole list, newest first.
pub async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<Item>>, HandlerError> {
    let items = state.with_store(|store| store.list()).await?;
    Ok(Json(items))
}

/// GET /api/items/{id} - One item, 404 when it does not exist.
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Item>, HandlerError> {
    let id = parse_id(&id)?;
    let item = state.with_store(move |store| store.find(id)).await?;
    Ok(Json(item))
}
