//! Centralized error types for list operations.

use crate::item::model::ItemId;
use thiserror::Error;

/// Main error type for list store operations.
#[derive(Error, Debug)]
pub enum ListError {
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    #[error("Database error: {0}")]
    Database(#[from] livelist_db::DbError),
}

/// Result type for list store operations.
pub type ListResult<T> = Result<T, ListError>;

impl ListError {
    /// Whether this is the normal "no such item" outcome of a lookup.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ItemNotFound(_))
    }
}
