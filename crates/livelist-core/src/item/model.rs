//! Item domain model.

use livelist_db::queries::items::ItemRow;
use serde::{Deserialize, Serialize};

/// Store-assigned item identifier.
pub type ItemId = i64;

/// One entry of the shared list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub done: bool,
}

impl Item {
    /// A fresh, not yet completed item.
    pub fn new(id: ItemId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            done: false,
        }
    }

    /// Create an Item from a database row.
    pub fn from_row(row: ItemRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            done: row.done,
        }
    }
}
