use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use flume::{Receiver, RecvTimeoutError, Sender};

/// Signal that the persisted preferences changed. Carries no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreferenceChanged;

/// Observer list fanning out [`PreferenceChanged`] to every subscriber.
///
/// Delivery order between subscribers is unspecified. Subscribers whose
/// receiving side was dropped are pruned on the next notification.
#[derive(Debug, Default)]
pub struct PreferenceNotifier {
    subscribers: Mutex<Vec<Sender<PreferenceChanged>>>,
}

impl PreferenceNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber.
    pub fn subscribe(&self) -> PreferenceSubscription {
        let (sender, receiver) = flume::unbounded();
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(sender);
        PreferenceSubscription { receiver }
    }

    /// Deliver a change signal to all live subscribers.
    pub fn notify(&self) {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        subscribers.retain(|sender| sender.send(PreferenceChanged).is_ok());
        log::debug!(
            "preference change delivered to {} subscribers",
            subscribers.len()
        );
    }

    /// Return the number of subscribers registered so far.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Receiving side of a preference subscription.
#[derive(Debug)]
pub struct PreferenceSubscription {
    receiver: Receiver<PreferenceChanged>,
}

impl PreferenceSubscription {
    /// Take one pending signal without blocking.
    pub fn try_recv(&self) -> Option<PreferenceChanged> {
        self.receiver.try_recv().ok()
    }

    /// Wait up to `timeout` for a signal.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<PreferenceChanged> {
        match self.receiver.recv_timeout(timeout) {
            Ok(signal) => Some(signal),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => {
                None
            },
        }
    }

    /// Drain all pending signals, returning whether there was any.
    ///
    /// Several changes collapse into one refresh.
    pub fn take_pending(&self) -> bool {
        self.receiver.drain().count() > 0
    }
}
