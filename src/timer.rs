//! Single-threaded deferred callbacks on a virtual clock
//!
//! The host advances the clock; due entries are popped in deadline order, one
//! at a time, so a callback that re-arms itself is seen by the same advance.
//! Cancelling removes the entry outright: a cancelled timer can never fire.

use std::time::Duration;

/// Handle for a scheduled entry. Cancelling a stale handle is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Pending<T> {
    id: TimerId,
    deadline: Duration,
    payload: T,
}

#[derive(Debug)]
pub struct TimerQueue<T> {
    now: Duration,
    next_id: u64,
    /// Sorted by (deadline, id)
    pending: Vec<Pending<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            pending: Vec::new(),
        }
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Run `payload` after `delay` from now.
    pub fn schedule(&mut self, delay: Duration, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let deadline = self.now + delay;
        // Equal deadlines keep scheduling order
        let pos = self.pending.partition_point(|p| p.deadline <= deadline);
        self.pending.insert(
            pos,
            Pending {
                id,
                deadline,
                payload,
            },
        );
        id
    }

    /// Returns whether the entry was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        self.pending.len() != before
    }

    /// Drop every pending entry.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.pending.len();
        self.pending.clear();
        n
    }

    /// Pop the earliest entry due at or before `until`, moving the clock to its
    /// deadline. With nothing due the clock moves to `until` and `None` is
    /// returned.
    pub fn next_due(&mut self, until: Duration) -> Option<(TimerId, T)> {
        match self.pending.first() {
            Some(p) if p.deadline <= until => {
                let p = self.pending.remove(0);
                self.now = self.now.max(p.deadline);
                Some((p.id, p.payload))
            }
            _ => {
                self.now = self.now.max(until);
                None
            }
        }
    }
}
