//! Observer backed by a bounded tokio channel.

use tokio::sync::mpsc::{self, error::TrySendError};

use super::{DeliveryError, Observer, Pulse};

/// One pending pulse is enough: a second one would only ask for the same
/// re-fetch again.
const PULSE_BUFFER: usize = 1;

/// Sending half of a pulse channel.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    tx: mpsc::Sender<Pulse>,
}

/// Create a connected observer/receiver pair.
pub fn pulse_channel() -> (ChannelObserver, mpsc::Receiver<Pulse>) {
    let (tx, rx) = mpsc::channel(PULSE_BUFFER);
    (ChannelObserver { tx }, rx)
}

impl Observer for ChannelObserver {
    fn offer(&self, pulse: Pulse) -> Result<(), DeliveryError> {
        match self.tx.try_send(pulse) {
            // A full buffer already holds a pulse for this observer.
            Ok(()) | Err(TrySendError::Full(_)) => Ok(()),
            Err(TrySendError::Closed(_)) => Err(DeliveryError::Closed),
        }
    }
}
