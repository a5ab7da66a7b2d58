//! Binary-heap priority queue.
//!
//! Wraps `std::collections::BinaryHeap` with reversed ordering and an insertion
//! counter, so that the minimum is extracted first and equal keys come out in
//! the order they were inserted.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use super::PriorityQueue;

struct Entry<K, V> {
    key: K,
    seq: u64,
    value: V,
}

impl<K: Ord, V> PartialEq for Entry<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K: Ord, V> Eq for Entry<K, V> {}

impl<K: Ord, V> PartialOrd for Entry<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord, V> Ord for Entry<K, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key).then(self.seq.cmp(&other.seq))
    }
}

/// A priority queue backed by [BinaryHeap].
pub struct HeapQueue<K, V> {
    heap: BinaryHeap<Reverse<Entry<K, V>>>,
    seq: u64,
    max_len: usize,
}

impl<K: Ord, V> Default for HeapQueue<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> HeapQueue<K, V> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new queue with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            seq: 0,
            max_len: 0,
        }
    }

    /// Returns the total number of insertions so far.
    pub fn inserted(&self) -> u64 {
        self.seq
    }

    /// Returns the largest number of elements that were pending at once.
    pub fn max_len(&self) -> usize {
        self.max_len
    }
}

impl<K: Ord, V> PriorityQueue<K, V> for HeapQueue<K, V> {
    #[inline]
    fn insert(&mut self, key: K, value: V) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(Entry { key, seq, value }));
        self.max_len = self.max_len.max(self.heap.len());
    }

    #[inline]
    fn peek_min(&self) -> Option<&K> {
        self.heap.peek().map(|Reverse(e)| &e.key)
    }

    #[inline]
    fn extract_min(&mut self) -> Option<(K, V)> {
        self.heap.pop().map(|Reverse(e)| (e.key, e.value))
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}
