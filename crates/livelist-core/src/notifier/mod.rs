//! Change notification fan-out.
//!
//! The notifier keeps the set of live observers and offers each of them a
//! [`Pulse`] when the list changes. A pulse carries no data: observers react
//! by re-fetching the whole list, so a missed or duplicated pulse heals on the
//! next one.

pub mod channel;
pub mod remote;

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use uuid::Uuid;

pub use channel::{pulse_channel, ChannelObserver};
pub use remote::WebNotifier;

/// The "something changed, re-fetch" signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pulse;

impl Pulse {
    /// Text frame transports use to encode a pulse.
    pub const SENTINEL: &'static str = "update";
}

/// Opaque token for one registered observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(Uuid);

impl ObserverId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Why a pulse could not be handed to an observer.
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("observer connection closed")]
    Closed,
}

/// Anything that can be offered a pulse.
///
/// `offer` must not block: it is called for every observer in turn.
pub trait Observer: Send + Sync {
    fn offer(&self, pulse: Pulse) -> Result<(), DeliveryError>;
}

type ObserverSet = HashMap<ObserverId, Arc<dyn Observer>>;

/// Shared set of live observers. Cloning yields another handle to the same set.
#[derive(Clone, Default)]
pub struct Notifier {
    observers: Arc<Mutex<ObserverSet>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ObserverSet> {
        self.observers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add an observer to the active set.
    pub fn register(&self, observer: impl Observer + 'static) -> ObserverId {
        let id = ObserverId::new();
        let count = {
            let mut observers = self.lock();
            observers.insert(id, Arc::new(observer));
            observers.len()
        };
        debug!(observer_id = %id, count, "Observer registered");
        id
    }

    /// Remove an observer. Removing one that is already gone is harmless.
    pub fn unregister(&self, id: ObserverId) {
        let removed = self.lock().remove(&id).is_some();
        if removed {
            debug!(observer_id = %id, "Observer unregistered");
        }
    }

    /// Offer `pulse` to every registered observer and return how many took it.
    ///
    /// The active set is snapshotted under the lock and delivery runs outside
    /// it, so observers may join or leave mid-broadcast. An observer that
    /// fails is logged and dropped from the set; the others still get the
    /// pulse and the caller never sees the failure.
    pub fn broadcast(&self, pulse: Pulse) -> usize {
        let targets: Vec<(ObserverId, Arc<dyn Observer>)> = self
            .lock()
            .iter()
            .map(|(id, observer)| (*id, Arc::clone(observer)))
            .collect();

        let mut delivered = 0;
        let mut dead = Vec::new();
        for (id, observer) in targets {
            match observer.offer(pulse) {
                Ok(()) => delivered += 1,
                Err(e) => {
                    warn!(observer_id = %id, error = %e, "Pulse delivery failed, dropping observer");
                    dead.push(id);
                }
            }
        }

        if !dead.is_empty() {
            let mut observers = self.lock();
            for id in &dead {
                observers.remove(id);
            }
        }

        debug!(delivered, dropped = dead.len(), "Broadcast pulse");
        delivered
    }

    /// Number of observers currently registered.
    pub fn observer_count(&self) -> usize {
        self.lock().len()
    }

    /// Register a channel-backed observer and hand back its receiving end.
    ///
    /// The returned [`Subscription`] unregisters itself when dropped.
    pub fn subscribe(&self) -> Subscription {
        let (observer, rx) = pulse_channel();
        let id = self.register(observer);
        Subscription {
            id,
            rx,
            notifier: self.clone(),
        }
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("observers", &self.observer_count())
            .finish()
    }
}

/// A registered observer owned by a transport connection.
#[derive(Debug)]
pub struct Subscription {
    id: ObserverId,
    rx: mpsc::Receiver<Pulse>,
    notifier: Notifier,
}

impl Subscription {
    pub fn id(&self) -> ObserverId {
        self.id
    }

    /// Wait for the next pulse. Pulses offered while one is pending coalesce.
    pub async fn recv(&mut self) -> Option<Pulse> {
        self.rx.recv().await
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.notifier.unregister(self.id);
    }
}
