//! List store backed by SQLite.

use std::path::Path;

use livelist_db::queries::items as queries;
use livelist_db::{DbError, DbPool};
use tracing::debug;

use super::model::{Item, ItemId};
use super::ListStore;
use crate::error::{ListError, ListResult};

/// Durable list store. Each call is one statement or one transaction on the
/// pool's single connection, so the pool mutex is the store-wide lock.
#[derive(Debug)]
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    /// Wrap a pool whose migrations have already been applied.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Open (or create) the database file and apply migrations.
    pub fn open(path: &Path) -> ListResult<Self> {
        Ok(Self::new(livelist_db::init_pool(path)?))
    }

    /// A throwaway in-memory database.
    pub fn in_memory() -> ListResult<Self> {
        Ok(Self::new(livelist_db::init_memory_pool()?))
    }

    fn rows_to_items(rows: Vec<queries::ItemRow>) -> Vec<Item> {
        rows.into_iter().map(Item::from_row).collect()
    }
}

impl ListStore for SqliteStore {
    fn create(&self, title: &str) -> ListResult<Item> {
        let item = Item::from_row(queries::create_item(&self.pool, title)?);
        debug!(item_id = item.id, "Created item");
        Ok(item)
    }

    fn list(&self) -> ListResult<Vec<Item>> {
        Ok(Self::rows_to_items(queries::list_items(&self.pool)?))
    }

    fn find(&self, id: ItemId) -> ListResult<Item> {
        match queries::get_item(&self.pool, id) {
            Ok(row) => Ok(Item::from_row(row)),
            Err(DbError::NotFound(_)) => Err(ListError::ItemNotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    fn toggle(&self, id: ItemId) -> ListResult<()> {
        let touched = queries::toggle_item(&self.pool, id)?;
        debug!(item_id = id, touched, "Toggled item");
        Ok(())
    }

    fn rename(&self, id: ItemId, title: &str) -> ListResult<()> {
        let touched = queries::rename_item(&self.pool, id, title)?;
        debug!(item_id = id, touched, "Renamed item");
        Ok(())
    }

    fn delete(&self, id: ItemId) -> ListResult<()> {
        let touched = queries::delete_item(&self.pool, id)?;
        debug!(item_id = id, touched, "Deleted item");
        Ok(())
    }

    fn clear(&self) -> ListResult<()> {
        let removed = queries::delete_all_items(&self.pool)?;
        debug!(removed, "Cleared items");
        Ok(())
    }

    fn clear_completed(&self) -> ListResult<()> {
        let removed = queries::delete_done_items(&self.pool)?;
        debug!(removed, "Cleared completed items");
        Ok(())
    }

    fn open_items(&self) -> ListResult<Vec<Item>> {
        Ok(Self::rows_to_items(queries::list_items_by_done(&self.pool, false)?))
    }

    fn completed_items(&self) -> ListResult<Vec<Item>> {
        Ok(Self::rows_to_items(queries::list_items_by_done(&self.pool, true)?))
    }
}
