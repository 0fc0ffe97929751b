//! Route handlers.

pub mod actions;
pub mod api;
pub mod assets;
pub mod internal;
pub mod pages;

use axum::http::StatusCode;
use livelist_core::{ItemId, ListError};
use tracing::error;

/// Error half of every handler result.
pub type HandlerError = (StatusCode, String);

/// Map a store failure onto an HTTP status.
pub(crate) fn store_error(e: ListError) -> HandlerError {
    if e.is_not_found() {
        return (StatusCode::NOT_FOUND, e.to_string());
    }
    error!(error = %e, "List store operation failed");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

/// Parse an item id taken from a form or query string.
pub(crate) fn parse_id(raw: &str) -> Result<ItemId, HandlerError> {
    raw.trim()
        .parse()
        .map_err(|_| (StatusCode::BAD_REQUEST, format!("invalid item id: {:?}", raw)))
}
