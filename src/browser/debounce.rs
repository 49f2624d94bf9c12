//! Cancellable delayed delivery of the latest value.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::trace;

/// Delivers the most recently scheduled value once `delay` passes without a
/// newer one. Each `schedule` aborts the pending task and starts a new one.
///
/// Delivered values carry the generation they were scheduled under; the
/// receiver checks [`Debouncer::is_current`] so a value that was already in
/// the channel when it got superseded or cancelled is dropped.
pub struct Debouncer<T, E> {
    delay: Duration,
    tx: UnboundedSender<E>,
    wrap: fn(u64, T) -> E,
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

impl<T, E> Debouncer<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    pub fn new(delay: Duration, tx: UnboundedSender<E>, wrap: fn(u64, T) -> E) -> Self {
        Self {
            delay,
            tx,
            wrap,
            generation: 0,
            pending: None,
        }
    }

    /// Restart the quiet period with `value` as the pending value.
    pub fn schedule(&mut self, value: T) -> u64 {
        self.abort_pending();
        self.generation += 1;
        let generation = self.generation;
        // Deadline counts from the keystroke, not from when the task first runs.
        let deadline = Instant::now() + self.delay;
        let tx = self.tx.clone();
        let wrap = self.wrap;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            trace!(generation, "debounce settled");
            let _ = tx.send(wrap(generation, value));
        }));
        generation
    }

    /// Drop the pending value, if any.
    pub fn cancel(&mut self) {
        self.abort_pending();
        self.generation += 1;
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    #[cfg(test)]
    fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    fn abort_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl<T, E> Drop for Debouncer<T, E> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
