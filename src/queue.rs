//! Bounded FIFO hand-off queues with explicit close semantics.
//!
//! Both hops of the pipeline use the same primitive: the frame queue between
//! the capture and segmentation workers, and the segment channel between the
//! segmentation worker and its consumer. A full queue blocks the producer
//! (backpressure — ordering is preserved and nothing is silently dropped),
//! and a closed-and-drained queue reports end-of-stream rather than an error.

use crossbeam_channel::{RecvTimeoutError, bounded};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Creates a bounded queue, returning the producer and consumer halves.
pub fn channel<T>(capacity: usize) -> (QueueSender<T>, QueueReceiver<T>) {
    let (tx, rx) = bounded(capacity);
    (
        QueueSender {
            inner: Mutex::new(Some(tx)),
        },
        QueueReceiver { inner: rx },
    )
}

/// Returned by `push` when the queue has been closed; carries the rejected
/// item back to the caller.
#[derive(Debug)]
pub struct QueueClosed<T>(pub T);

impl<T> QueueClosed<T> {
    /// Recovers the item that could not be queued.
    pub fn into_inner(self) -> T {
        self.0
    }
}

/// Outcome of a `pop` with timeout. Timeout and close are distinct signals
/// and neither is an error: timeout is the periodic shutdown-check
/// opportunity, close is end-of-stream.
#[derive(Debug)]
pub enum Pop<T> {
    /// An item was dequeued.
    Item(T),
    /// Nothing arrived within the timeout; the queue is still open.
    TimedOut,
    /// The queue is closed and fully drained.
    Closed,
}

/// Producer half of a bounded queue.
pub struct QueueSender<T> {
    inner: Mutex<Option<crossbeam_channel::Sender<T>>>,
}

impl<T> QueueSender<T> {
    /// Enqueues an item, blocking while the queue is full.
    ///
    /// Returns the item back inside `QueueClosed` if `close` was called or
    /// the consumer is gone.
    pub fn push(&self, item: T) -> Result<(), QueueClosed<T>> {
        // Clone the sender out of the lock so a blocking send never holds it.
        let tx = {
            let guard = self
                .inner
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            match guard.as_ref() {
                Some(tx) => tx.clone(),
                None => return Err(QueueClosed(item)),
            }
        };
        tx.send(item).map_err(|e| QueueClosed(e.into_inner()))
    }

    /// Closes the queue. Idempotent; safe from any thread.
    ///
    /// Items already queued remain poppable; once drained, `pop` reports
    /// `Pop::Closed`.
    pub fn close(&self) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    /// Returns true if `close` has been called.
    pub fn is_closed(&self) -> bool {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }
}

/// Consumer half of a bounded queue.
pub struct QueueReceiver<T> {
    inner: crossbeam_channel::Receiver<T>,
}

impl<T> QueueReceiver<T> {
    /// Dequeues one item, waiting up to `timeout`.
    pub fn pop(&self, timeout: Duration) -> Pop<T> {
        match self.inner.recv_timeout(timeout) {
            Ok(item) => Pop::Item(item),
            Err(RecvTimeoutError::Timeout) => Pop::TimedOut,
            Err(RecvTimeoutError::Disconnected) => Pop::Closed,
        }
    }

    /// Number of items currently buffered.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if no items are currently buffered.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
