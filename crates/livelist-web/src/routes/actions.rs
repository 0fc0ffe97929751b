//! Mutating form actions.
//!
//! Each handler performs one store mutation, then broadcasts a pulse so every
//! connected viewer re-fetches. Unknown ids are silently ignored by the store.

use axum::{
    extract::State,
    http::StatusCode,
    response::Redirect,
    Form,
};
use serde::Deserialize;
use tracing::info;

use super::{parse_id, HandlerError};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AddForm {
    #[serde(default)]
    pub title: String,
}

#[derive(Deserialize)]
pub struct IdForm {
    #[serde(default)]
    pub id: String,
}

#[derive(Deserialize)]
pub struct RenameForm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
}

/// POST /add - Create an item.
pub async fn add(
    State(state): State<AppState>,
    Form(form): Form<AddForm>,
) -> Result<Redirect, HandlerError> {
    let item = state
        .with_store(move |store| store.create(&form.title))
        .await?;
    info!(item_id = item.id, "add");
    state.broadcast();
    Ok(Redirect::to("/"))
}

/// PATCH /toggle - Flip an item's done flag.
pub async fn toggle(
    State(state): State<AppState>,
    Form(form): Form<IdForm>,
) -> Result<Redirect, HandlerError> {
    let id = parse_id(&form.id)?;
    info!(item_id = id, "toggle");
    state.with_store(move |store| store.toggle(id)).await?;
    state.broadcast();
    Ok(Redirect::to("/"))
}

/// DELETE /delete - Remove an item.
pub async fn delete(
    State(state): State<AppState>,
    Form(form): Form<IdForm>,
) -> Result<Redirect, HandlerError> {
    let id = parse_id(&form.id)?;
    info!(item_id = id, "delete");
    state.with_store(move |store| store.delete(id)).await?;
    state.broadcast();
    Ok(Redirect::to("/"))
}

/// PATCH /rename - Replace an item's title.
pub async fn rename(
    State(state): State<AppState>,
    Form(form): Form<RenameForm>,
) -> Result<StatusCode, HandlerError> {
    let id = parse_id(&form.id)?;
    info!(item_id = id, "rename");
    state
        .with_store(move |store| store.rename(id, &form.title))
        .await?;
    state.broadcast();
    Ok(StatusCode::OK)
}

/// POST /clear - Remove every item.
pub async fn clear(State(state): State<AppState>) -> Result<Redirect, HandlerError> {
    info!("clear");
    state.with_store(|store| store.clear()).await?;
    state.broadcast();
    Ok(Redirect::to("/"))
}

/// POST /clearcompleted - Remove every done item.
pub async fn clear_completed(State(state): State<AppState>) -> Result<Redirect, HandlerError> {
    info!("clear completed");
    state.with_store(|store| store.clear_completed()).await?;
    state.broadcast();
    Ok(Redirect::to("/"))
}
