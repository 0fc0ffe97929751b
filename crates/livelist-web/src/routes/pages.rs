//! Server-rendered HTML pages.

use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
};
use livelist_core::Item;
use serde::Deserialize;

use super::{parse_id, HandlerError};
use crate::state::AppState;

// ============================================================
// TEMPLATES
// ============================================================

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    /// Cache-buster for the client script.
    timestamp: i64,
    items: Vec<Item>,
    open_count: usize,
    completed_count: usize,
}

#[derive(Template)]
#[template(path = "rename.html")]
struct RenameTemplate {
    item: Item,
}

#[derive(Deserialize)]
pub struct RenameQuery {
    pub id: Option<String>,
}

fn render(template: &impl Template) -> Result<Html<String>, HandlerError> {
    template.render().map(Html).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Template error: {}", e),
        )
    })
}

// ============================================================
// HANDLERS
// ============================================================

/// GET / - The full list page.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, HandlerError> {
    let items = state.with_store(|store| store.list()).await?;
    let completed_count = items.iter().filter(|i| i.done).count();

    render(&IndexTemplate {
        timestamp: chrono::Utc::now().timestamp(),
        open_count: items.len() - completed_count,
        completed_count,
        items,
    })
}

/// GET /showrename?id= - Inline rename form for one item.
pub async fn show_rename(
    State(state): State<AppState>,
    Query(query): Query<RenameQuery>,
) -> Result<Html<String>, HandlerError> {
    let raw = query
        .id
        .filter(|id| !id.is_empty())
        .ok_or((StatusCode::BAD_REQUEST, "id is required".to_string()))?;
    let id = parse_id(&raw)?;

    let item = state.with_store(move |store| store.find(id)).await?;
    render(&RenameTemplate { item })
}
