//! Unbounded blocking FIFO for scheduler coordination.
//!
//! # Design
//!
//! A mutex-protected `VecDeque` paired with a condvar. `push` never blocks
//! (the queue is unbounded); `pop` parks the calling thread until an item is
//! available. Items enqueued by one producer are observed in order by any
//! single consumer.
//!
//! The queue deliberately has no peek, no capacity bound, and no cancellation
//! primitive. Shutdown is expressed in-band by the protocol built on top of
//! it (a tagged end-of-work task pushed through the same channel), never by
//! the queue itself.
//!
//! # Usage in the scheduler
//!
//! - One queue per worker carrying `Task` values (single producer: the
//!   emitter; single consumer: the worker).
//! - One shared feedback queue carrying worker ids (many producers: the
//!   workers; single consumer: the emitter).
//!
//! The implementation is nonetheless a full MPMC queue; the scheduler's
//! narrower usage is a protocol property, not a queue property.
//!
//! # Mutex poisoning
//!
//! A panic while holding the lock poisons it and subsequent calls panic too.
//! This matches the run-level policy: a panicking worker is fatal to the run.

use crossbeam_utils::CachePadded;
use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};

/// Thread-safe unbounded FIFO with blocking take.
pub struct BlockingQueue<T> {
    /// Padded to keep independent queues off each other's cache lines; the
    /// scheduler allocates one queue per worker in a contiguous `Vec`.
    items: CachePadded<Mutex<VecDeque<T>>>,
    ready: Condvar,
}

impl<T> BlockingQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            items: CachePadded::new(Mutex::new(VecDeque::new())),
            ready: Condvar::new(),
        }
    }

    /// Append `value` and wake one blocked consumer.
    ///
    /// Never blocks; the queue grows as needed.
    pub fn push(&self, value: T) {
        let mut items = self.items.lock().expect("blocking queue mutex poisoned");
        items.push_back(value);
        drop(items);
        self.ready.notify_one();
    }

    /// Remove and return the head item, blocking until one is available.
    pub fn pop(&self) -> T {
        let mut items = self.items.lock().expect("blocking queue mutex poisoned");
        loop {
            match items.pop_front() {
                Some(value) => return value,
                None => {
                    items = self
                        .ready
                        .wait(items)
                        .expect("blocking queue mutex poisoned");
                }
            }
        }
    }

    /// Remove and return the head item if one is present.
    pub fn try_pop(&self) -> Option<T> {
        self.items
            .lock()
            .expect("blocking queue mutex poisoned")
            .pop_front()
    }

    /// Current number of queued items.
    ///
    /// Racy under concurrent use; intended for tests and diagnostics.
    pub fn len(&self) -> usize {
        self.items
            .lock()
            .expect("blocking queue mutex poisoned")
            .len()
    }

    /// Whether the queue is currently empty. Racy, like [`len`](Self::len).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for BlockingQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
