//! Fire-once, cancellable delayed actions polled from the frame clock.
//!
//! There are no timers or threads here. The owner calls [`Scheduler::drain_due`]
//! with the current animation time and applies whatever comes back. Readers
//! that cannot mutate can still ask which actions *would* have fired via
//! [`Scheduler::due`], which is how the coordinator stays correct when nobody
//! polls on time.
//!
//! [`Scheduler::cancel_all`] empties the queue, so nothing scheduled before
//! the cancel can fire afterwards.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::{Timestamp, TIME_EPSILON};

#[derive(Debug, Clone)]
struct Entry<A> {
    fire_at: Timestamp,
    seq: u64,
    action: A,
}

impl<A> PartialEq for Entry<A> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<A> Eq for Entry<A> {}

impl<A> PartialOrd for Entry<A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<A> Ord for Entry<A> {
    // Reversed so BinaryHeap pops the earliest fire time, then the earliest insertion.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .fire_at
            .total_cmp(&self.fire_at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-heap of delayed actions keyed by fire time.
#[derive(Debug, Clone)]
pub struct Scheduler<A> {
    heap: BinaryHeap<Entry<A>>,
    next_seq: u64,
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }
}

impl<A> Scheduler<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `action` to fire once the clock reaches `fire_at`.
    pub fn schedule(&mut self, fire_at: Timestamp, action: A) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry {
            fire_at,
            seq,
            action,
        });
    }

    /// Drop everything queued so far. Returns how many actions were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.heap.len();
        self.heap.clear();
        cancelled
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Earliest pending fire time.
    pub fn next_fire_time(&self) -> Option<Timestamp> {
        self.heap.peek().map(|e| e.fire_at)
    }

    /// Remove and return every action due at `now`, in fire order.
    pub fn drain_due(&mut self, now: Timestamp) -> Vec<A> {
        let mut fired = Vec::new();
        while let Some(entry) = self.heap.peek() {
            if entry.fire_at > now + TIME_EPSILON {
                break;
            }
            if let Some(entry) = self.heap.pop() {
                fired.push(entry.action);
            }
        }
        fired
    }

    /// Actions that are due at `now`, in fire order, without removing them.
    pub fn due(&self, now: Timestamp) -> Vec<&A> {
        let mut due: Vec<&Entry<A>> = self
            .heap
            .iter()
            .filter(|e| e.fire_at <= now + TIME_EPSILON)
            .collect();
        // Entry's Ord is reversed for the heap
        due.sort_by(|a, b| b.cmp(a));
        due.into_iter().map(|e| &e.action).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drains_in_fire_order() {
        let mut s = Scheduler::new();
        s.schedule(3.0, "c");
        s.schedule(1.0, "a");
        s.schedule(2.0, "b");
        assert_eq!(s.drain_due(2.5), vec!["a", "b"]);
        assert_eq!(s.len(), 1);
        assert_eq!(s.drain_due(3.0), vec!["c"]);
        assert!(s.is_empty());
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut s = Scheduler::new();
        s.schedule(1.0, 1);
        s.schedule(1.0, 2);
        s.schedule(1.0, 3);
        assert_eq!(s.drain_due(1.0), vec![1, 2, 3]);
    }

    #[test]
    fn test_cancel_all_suppresses() {
        let mut s = Scheduler::new();
        s.schedule(1.0, "stale");
        assert_eq!(s.cancel_all(), 1);
        s.schedule(2.0, "fresh");
        assert_eq!(s.due(10.0), vec![&"fresh"]);
        assert_eq!(s.drain_due(10.0), vec!["fresh"]);
        assert_eq!(s.cancel_all(), 0);
    }

    #[test]
    fn test_due_is_read_only() {
        let mut s = Scheduler::new();
        s.schedule(1.0, "a");
        s.schedule(0.5, "b");
        s.schedule(5.0, "c");
        assert_eq!(s.due(1.0), vec![&"b", &"a"]);
        assert_eq!(s.len(), 3);
        assert_eq!(s.next_fire_time(), Some(0.5));
    }

    #[test]
    fn test_nothing_due_early() {
        let mut s = Scheduler::new();
        s.schedule(1.0, ());
        assert!(s.drain_due(0.999).is_empty());
        assert!(s.due(0.999).is_empty());
    }
}
