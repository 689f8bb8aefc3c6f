use std::{cmp::Reverse, collections::BinaryHeap};

use super::step::Step;

/// A step waiting on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled {
    pub at: u64,
    /// Insertion order, breaks ties between steps due at the same time.
    pub seq: u64,
    /// Epoch the step was scheduled under.
    pub epoch: u64,
    pub step: Step,
}

impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.at, self.seq).cmp(&(other.at, other.seq))
    }
}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Single event queue ordered by due time, then by insertion order.
#[derive(Debug, Default)]
pub struct Timeline {
    // Reverse turns the max-heap into a min-heap
    queue: BinaryHeap<Reverse<Scheduled>>,
    next_seq: u64,
}

impl Timeline {
    pub fn schedule(&mut self, at: u64, epoch: u64, step: Step) {
        self.queue.push(Reverse(Scheduled {
            at,
            seq: self.next_seq,
            epoch,
            step,
        }));
        self.next_seq += 1;
    }

    /// Due time of the earliest pending step.
    pub fn next_due(&self) -> Option<u64> {
        self.queue.peek().map(|Reverse(s)| s.at)
    }

    /// The earliest pending step without removing it.
    pub fn peek(&self) -> Option<&Scheduled> {
        self.queue.peek().map(|Reverse(s)| s)
    }

    /// Remove and return the earliest step if it is due at or before `now`.
    pub fn pop_due(&mut self, now: u64) -> Option<Scheduled> {
        match self.queue.peek() {
            Some(Reverse(s)) if s.at <= now => self.queue.pop().map(|Reverse(s)| s),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
