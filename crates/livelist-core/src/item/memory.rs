//! In-process list store.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use super::model::{Item, ItemId};
use super::ListStore;
use crate::error::{ListError, ListResult};

#[derive(Debug, Default)]
struct Inner {
    /// Keyed by id; ids are minted in increasing order, so reverse key
    /// order is newest first.
    items: BTreeMap<ItemId, Item>,
    last_id: ItemId,
}

impl Inner {
    fn collect(&self, keep: impl Fn(&Item) -> bool) -> Vec<Item> {
        self.items.values().rev().filter(|&item| keep(item)).cloned().collect()
    }
}

/// List store held entirely in memory. Empty again after a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Every critical section leaves the map consistent, so a poisoned
    // lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ListStore for MemoryStore {
    fn create(&self, title: &str) -> ListResult<Item> {
        let mut inner = self.lock();
        inner.last_id += 1;
        let item = Item::new(inner.last_id, title);
        inner.items.insert(item.id, item.clone());
        debug!(item_id = item.id, "Created item");
        Ok(item)
    }

    fn list(&self) -> ListResult<Vec<Item>> {
        Ok(self.lock().collect(|_| true))
    }

    fn find(&self, id: ItemId) -> ListResult<Item> {
        self.lock()
            .items
            .get(&id)
            .cloned()
            .ok_or(ListError::ItemNotFound(id))
    }

    fn toggle(&self, id: ItemId) -> ListResult<()> {
        if let Some(item) = self.lock().items.get_mut(&id) {
            item.done = !item.done;
        }
        Ok(())
    }

    fn rename(&self, id: ItemId, title: &str) -> ListResult<()> {
        if let Some(item) = self.lock().items.get_mut(&id) {
            item.title = title.to_string();
        }
        Ok(())
    }

    fn delete(&self, id: ItemId) -> ListResult<()> {
        self.lock().items.remove(&id);
        Ok(())
    }

    fn clear(&self) -> ListResult<()> {
        // last_id is kept so ids stay unique across clears.
        self.lock().items.clear();
        Ok(())
    }

    fn clear_completed(&self) -> ListResult<()> {
        self.lock().items.retain(|_, item| !item.done);
        Ok(())
    }

    fn open_items(&self) -> ListResult<Vec<Item>> {
        Ok(self.lock().collect(|i| !i.done))
    }

    fn completed_items(&self) -> ListResult<Vec<Item>> {
        Ok(self.lock().collect(|i| i.done))
    }
}
