//! The shared item list.
//!
//! [`ListStore`] is the capability set every backend implements. All
//! operations are atomic with respect to each other. Mutators treat an
//! unknown id as a no-op: ids come from a client snapshot that may already
//! be stale, and a racing delete should not surface as a user-facing error.

pub mod memory;
pub mod model;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::error::ListResult;
use model::{Item, ItemId};

/// Operations on the authoritative item collection.
pub trait ListStore: Send + Sync {
    /// Append a new open item with a freshly minted id.
    fn create(&self, title: &str) -> ListResult<Item>;

    /// Snapshot of every item, newest first.
    fn list(&self) -> ListResult<Vec<Item>>;

    /// Point lookup. The only operation that reports a missing id.
    fn find(&self, id: ItemId) -> ListResult<Item>;

    /// Flip the done flag.
    fn toggle(&self, id: ItemId) -> ListResult<()>;

    fn rename(&self, id: ItemId, title: &str) -> ListResult<()>;

    fn delete(&self, id: ItemId) -> ListResult<()>;

    /// Remove every item. Ids already minted are never handed out again.
    fn clear(&self) -> ListResult<()>;

    /// Remove every done item.
    fn clear_completed(&self) -> ListResult<()>;

    /// Snapshot of items not yet done, newest first.
    fn open_items(&self) -> ListResult<Vec<Item>>;

    /// Snapshot of done items, newest first.
    fn completed_items(&self) -> ListResult<Vec<Item>>;
}
