//! Item-related database queries.
//!
//! Each function is a single statement or a single transaction, so the
//! connection mutex plus SQLite's own atomicity make every call indivisible.

use crate::pool::{DbError, DbPool, DbResult};
use rusqlite::{params, Row};

/// Item row from database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub id: i64,
    pub title: String,
    pub done: bool,
    pub created_at: String,
    pub updated_at: String,
}

const SELECT_COLUMNS: &str = "SELECT id, title, done, created_at, updated_at FROM items";

fn map_row(row: &Row<'_>) -> rusqlite::Result<ItemRow> {
    Ok(ItemRow {
        id: row.get(0)?,
        title: row.get(1)?,
        done: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

/// Insert a new item and return the stored row.
pub fn create_item(pool: &DbPool, title: &str) -> DbResult<ItemRow> {
    let now = chrono::Utc::now().to_rfc3339();

    pool.with_conn_mut(|conn| {
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO items (title, done, created_at, updated_at) VALUES (?1, 0, ?2, ?2)",
            params![title, now],
        )?;
        let id = tx.last_insert_rowid();
        let row = tx.query_row(
            &format!("{SELECT_COLUMNS} WHERE id = ?1"),
            params![id],
            map_row,
        )?;
        tx.commit()?;
        Ok(row)
    })
}

/// Get an item by ID.
pub fn get_item(pool: &DbPool, id: i64) -> DbResult<ItemRow> {
    pool.with_conn(|conn| {
        conn.query_row(
            &format!("{SELECT_COLUMNS} WHERE id = ?1"),
            params![id],
            map_row,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => DbError::NotFound(format!("Item: {}", id)),
            e => DbError::Connection(e),
        })
    })
}

/// List all items, newest first.
pub fn list_items(pool: &DbPool) -> DbResult<Vec<ItemRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY id DESC"))?;
        let rows = stmt.query_map([], map_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    })
}

/// List items with the given done flag, newest first.
pub fn list_items_by_done(pool: &DbPool, done: bool) -> DbResult<Vec<ItemRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(&format!(
            "{SELECT_COLUMNS} WHERE done = ?1 ORDER BY id DESC"
        ))?;
        let rows = stmt.query_map(params![done], map_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    })
}

/// Flip the done flag. Returns the number of rows touched (0 or 1).
pub fn toggle_item(pool: &DbPool, id: i64) -> DbResult<usize> {
    let now = chrono::Utc::now().to_rfc3339();
    pool.with_conn(|conn| {
        Ok(conn.execute(
            "UPDATE items SET done = NOT done, updated_at = ?2 WHERE id = ?1",
            params![id, now],
        )?)
    })
}

/// Replace an item's title. Returns the number of rows touched (0 or 1).
pub fn rename_item(pool: &DbPool, id: i64, title: &str) -> DbResult<usize> {
    let now = chrono::Utc::now().to_rfc3339();
    pool.with_conn(|conn| {
        Ok(conn.execute(
            "UPDATE items SET title = ?2, updated_at = ?3 WHERE id = ?1",
            params![id, title, now],
        )?)
    })
}

/// Delete an item. Returns the number of rows removed (0 or 1).
pub fn delete_item(pool: &DbPool, id: i64) -> DbResult<usize> {
    pool.with_conn(|conn| Ok(conn.execute("DELETE FROM items WHERE id = ?1", params![id])?))
}

/// Delete every item. Returns the number of rows removed.
pub fn delete_all_items(pool: &DbPool) -> DbResult<usize> {
    pool.with_conn(|conn| Ok(conn.execute("DELETE FROM items", [])?))
}

/// Delete every completed item. Returns the number of rows removed.
pub fn delete_done_items(pool: &DbPool) -> DbResult<usize> {
    pool.with_conn(|conn| Ok(conn.execute("DELETE FROM items WHERE done = 1", [])?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init_memory_pool;

    #[test]
    fn test_create_and_get() {
        let pool = init_memory_pool().unwrap();
        let row = create_item(&pool, "Buy milk").unwrap();
        assert_eq!(row.id, 1);
        assert!(!row.done);

        let fetched = get_item(&pool, row.id).unwrap();
        assert_eq!(fetched, row);
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let pool = init_memory_pool().unwrap();
        assert!(matches!(get_item(&pool, 42), Err(DbError::NotFound(_))));
    }

    #[test]
    fn test_ids_not_reused_after_clear() {
        let pool = init_memory_pool().unwrap();
        create_item(&pool, "a").unwrap();
        let b = create_item(&pool, "b").unwrap();
        assert_eq!(delete_all_items(&pool).unwrap(), 2);

        let c = create_item(&pool, "c").unwrap();
        assert!(c.id > b.id);
    }

    #[test]
    fn test_mutations_report_rows_touched() {
        let pool = init_memory_pool().unwrap();
        let row = create_item(&pool, "x").unwrap();

        assert_eq!(toggle_item(&pool, row.id).unwrap(), 1);
        assert_eq!(toggle_item(&pool, 999).unwrap(), 0);
        assert_eq!(rename_item(&pool, 999, "y").unwrap(), 0);
        assert_eq!(delete_item(&pool, 999).unwrap(), 0);

        let done = list_items_by_done(&pool, true).unwrap();
        assert_eq!(done.len(), 1);
        assert_eq!(delete_done_items(&pool).unwrap(), 1);
        assert!(list_items(&pool).unwrap().is_empty());
    }

    #[test]
    fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("livelist.db");

        {
            let pool = crate::init_pool(&path).unwrap();
            create_item(&pool, "persisted").unwrap();
        }

        let pool = crate::init_pool(&path).unwrap();
        let rows = list_items(&pool).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "persisted");
    }
}
