//! Application state.

use axum::http::StatusCode;
use livelist_core::{ListResult, ListStore, Notifier, Pulse};
use std::sync::Arc;

use crate::routes::{store_error, HandlerError};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ListStore>,
    pub notifier: Notifier,
}

impl AppState {
    pub fn new(store: Arc<dyn ListStore>) -> Self {
        Self {
            store,
            notifier: Notifier::new(),
        }
    }

    /// Run a store operation on the blocking pool.
    ///
    /// Store calls may wait on the SQLite busy timeout while another process
    /// holds the file lock; that wait must not park an async worker.
    pub async fn with_store<T, F>(&self, op: F) -> Result<T, HandlerError>
    where
        F: FnOnce(&dyn ListStore) -> ListResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || op(store.as_ref()))
            .await
            .map_err(|e| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Store task failed: {}", e),
                )
            })?
            .map_err(store_error)
    }

    /// Tell every connected viewer to re-fetch the list.
    ///
    /// Call only after the mutation has returned, so the re-fetch sees it.
    pub fn broadcast(&self) -> usize {
        self.notifier.broadcast(Pulse)
    }
}
