//! Single-slot expiring timer for interim text.
//!
//! Guarantees interim text does not persist indefinitely when the recognizer
//! stalls between updates: each `arm` starts a fresh countdown and cancels the
//! previous one (debounce, not accumulate).

use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// Debouncing countdown that reports expiry through a channel.
///
/// At most one countdown is outstanding at a time. Expiries carry a
/// generation number; an expiry that raced a re-arm or cancel fails the
/// [`InterimTimer::is_current`] check and must be ignored by the receiver.
pub struct InterimTimer {
    timeout: Duration,
    expiry_tx: UnboundedSender<u64>,
    generation: u64,
    countdown: Option<JoinHandle<()>>,
}

impl InterimTimer {
    /// Create a timer and the receiver its expiries are delivered on.
    pub fn new(timeout: Duration) -> (Self, UnboundedReceiver<u64>) {
        let (expiry_tx, expiry_rx) = mpsc::unbounded_channel();
        (
            Self {
                timeout,
                expiry_tx,
                generation: 0,
                countdown: None,
            },
            expiry_rx,
        )
    }

    /// (Re)start the countdown, cancelling any outstanding one.
    ///
    /// Must be called from within a tokio runtime.
    pub fn arm(&mut self) {
        self.abort_countdown();
        self.generation += 1;
        let generation = self.generation;
        let timeout = self.timeout;
        let expiry_tx = self.expiry_tx.clone();
        self.countdown = Some(tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            let _ = expiry_tx.send(generation);
        }));
    }

    /// Cancel any outstanding countdown without firing.
    pub fn cancel(&mut self) {
        self.abort_countdown();
        // Invalidate an expiry that fired before the abort landed.
        self.generation += 1;
    }

    /// Whether an expiry with this generation is still live.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Configured countdown duration.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn abort_countdown(&mut self) {
        if let Some(countdown) = self.countdown.take() {
            countdown.abort();
        }
    }
}

impl Drop for InterimTimer {
    fn drop(&mut self) {
        self.abort_countdown();
    }
}
