//! Min-priority queue with re-keyable entries.
//!
//! A thin layer over [`BinaryHeap`] that adds what incremental planners
//! need and standard heaps lack:
//!
//! - lookup of the items stored at an exact key ([`DynamicQueue::search`]),
//!   so callers can avoid inserting the same item twice at one priority
//! - bulk key recomputation ([`DynamicQueue::update_costs`]) after the data
//!   the keys were derived from changed underneath the queue
//!
//! Ties are broken by insertion order, which keeps runs reproducible.
//! The queue does not deduplicate on its own.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Queue entry ordered by `(key, seq)`
#[derive(Clone, Debug)]
struct Entry<T> {
    item: T,
    key: f32,
    seq: u64,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior
        other
            .key
            .total_cmp(&self.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue keyed by `f32`, with exact-key search and re-keying.
#[derive(Clone, Debug)]
pub struct DynamicQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    next_seq: u64,
}

impl<T> Default for DynamicQueue<T> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }
}

impl<T: Clone + PartialEq> DynamicQueue<T> {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `item` with priority `key` (lower pops first).
    pub fn add(&mut self, item: T, key: f32) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { item, key, seq });
    }

    /// Remove and return the item with the smallest key.
    ///
    /// Returns `None` on an empty queue.
    pub fn pop(&mut self) -> Option<T> {
        self.heap.pop().map(|entry| entry.item)
    }

    /// Smallest key currently queued
    pub fn peek_key(&self) -> Option<f32> {
        self.heap.peek().map(|entry| entry.key)
    }

    /// Items stored at exactly `key`, in no particular order.
    pub fn search(&self, key: f32) -> Vec<T> {
        self.heap
            .iter()
            .filter(|entry| entry.key == key)
            .map(|entry| entry.item.clone())
            .collect()
    }

    /// Recompute every key with `key_fn` and restore heap order.
    ///
    /// Insertion order is kept for tie-breaking.
    pub fn update_costs(&mut self, mut key_fn: impl FnMut(&T) -> f32) {
        let mut entries = std::mem::take(&mut self.heap).into_vec();
        for entry in &mut entries {
            entry.key = key_fn(&entry.item);
        }
        self.heap = BinaryHeap::from(entries);
    }

    /// Number of queued entries
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}
