// src/queue.rs

//! Unbounded blocking FIFO used to hand values between threads.
//!
//! A `BlockingQueue` is a monitor: a `Mutex<VecDeque<T>>` paired with a
//! `Condvar`. Senders append under the lock and wake one waiter; receivers
//! wait on the condvar until the deque is non-empty, re-checking after every
//! wake so spurious wakeups and racing receivers never pop from an empty
//! queue.
//!
//! # Delivery
//!
//! Each item is handed to exactly one receiver, in the order the sends
//! acquired the lock. The queue has no capacity limit, so `send` never
//! blocks on a full queue.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};
use std::time::{Duration, Instant};

use log::trace;

/// Unbounded FIFO whose `receive` blocks until an item is available.
pub struct BlockingQueue<T> {
    items: Mutex<VecDeque<T>>,
    ready: Condvar,
}

impl<T> BlockingQueue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            ready: Condvar::new(),
        }
    }

    /// Appends `item` to the tail and wakes one blocked receiver.
    ///
    /// The lock is released before notifying so the woken receiver does not
    /// immediately block on it again.
    pub fn send(&self, item: T) {
        let backlog = {
            let mut items = self.items.lock().unwrap();
            items.push_back(item);
            items.len()
        };
        self.ready.notify_one();
        trace!("BlockingQueue: sent item (backlog {})", backlog);
    }

    /// Removes and returns the oldest item, blocking until one is available.
    ///
    /// Blocks forever if nothing is ever sent.
    pub fn receive(&self) -> T {
        let mut items = self.items.lock().unwrap();
        loop {
            if let Some(item) = items.pop_front() {
                return item;
            }
            items = self.ready.wait(items).unwrap();
        }
    }

    /// Like [`receive`](Self::receive), but gives up once `timeout` has
    /// elapsed with the queue still empty.
    ///
    /// A timeout too large to represent as a deadline waits forever.
    pub fn receive_timeout(&self, timeout: Duration) -> Option<T> {
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            return Some(self.receive());
        };
        let mut items = self.items.lock().unwrap();

        loop {
            if let Some(item) = items.pop_front() {
                return Some(item);
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return None;
            }
            let (guard, _) = self.ready.wait_timeout(items, remaining).unwrap();
            items = guard;
        }
    }

    /// Pops the oldest item without waiting.
    pub fn try_receive(&self) -> Option<T> {
        self.items.lock().unwrap().pop_front()
    }

    /// Number of items sent but not yet received.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.lock().unwrap().is_empty()
    }
}

impl<T> Default for BlockingQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for BlockingQueue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingQueue")
            .field("len", &self.len())
            .finish()
    }
}
