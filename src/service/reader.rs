use std::{
    sync::mpsc::{Receiver, RecvTimeoutError},
    time::Duration,
};

use parking_lot::Mutex;

use super::Event;

/// Consumer end of the progress channel.
///
/// Events arrive in the order the worker sent them. Reading never blocks the
/// worker; the channel is unbounded.
#[derive(Debug)]
pub struct EventReader {
    receiver: Mutex<Receiver<Event>>,
}

impl EventReader {
    pub(super) fn new(receiver: Receiver<Event>) -> Self {
        Self {
            receiver: Mutex::new(receiver),
        }
    }

    /// Returns the next event if one is waiting.
    #[must_use]
    pub fn try_next(&self) -> Option<Event> {
        self.receiver.lock().try_recv().ok()
    }

    /// Waits up to `timeout` for the next event.
    #[must_use]
    pub fn next_timeout(&self, timeout: Duration) -> Option<Event> {
        match self.receiver.lock().recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Takes every event currently waiting.
    #[must_use]
    pub fn drain(&self) -> Vec<Event> {
        self.receiver.lock().try_iter().collect()
    }
}
