//! Cancelable delayed delivery of a single event.
//!
//! At most one timer is live: arming a new one aborts the previous task.

use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::sleep;

#[derive(Debug)]
pub struct Debouncer<T> {
    /// Quiet period before the event is delivered
    delay: Duration,
    /// Where elapsed events are sent
    tx: UnboundedSender<T>,
    /// The live timer, if any
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(delay: Duration, tx: UnboundedSender<T>) -> Self {
        Self {
            delay,
            tx,
            pending: None,
        }
    }

    /// Deliver `event` after the delay unless re-armed or cancelled first
    pub fn arm(&mut self, event: T) {
        self.cancel();

        let tx = self.tx.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            sleep(delay).await;
            // Receiver gone means the browser is shutting down
            let _ = tx.send(event);
        }));
    }

    /// Drop the live timer without delivering its event
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
            tracing::trace!("Debounce timer cancelled");
        }
    }

    /// Whether a timer is armed and has not fired yet
    pub fn is_armed(&self) -> bool {
        self.pending
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
