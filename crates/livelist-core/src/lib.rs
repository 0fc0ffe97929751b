//! Livelist Core Library
//!
//! The shared item list and the change notifier that tells live viewers
//! to re-fetch it.

pub mod error;
pub mod item;
pub mod notifier;

pub use error::{ListError, ListResult};
pub use item::model::{Item, ItemId};
pub use item::{ListStore, MemoryStore, SqliteStore};
pub use notifier::{Notifier, Observer, ObserverId, Pulse, Subscription};
