//! Sorted, forward-only sequences.
//!
//! Every sweep reads its inputs through a [`SortedSeq`]: the elements have
//! been put into the order the sweep needs by a [`Sorter`], and can only be
//! consumed front to back. There is no indexing and no rewinding.
//!
//! [`MemorySorter`] is the in-memory realization used by default; an
//! external-memory sorter can be plugged in by implementing [`Sorter`].

use std::collections::VecDeque;

/// Produces sorted sequences from unordered element sets.
pub trait Sorter {
    /// Sorts `items` by `key` and returns them as a forward-only sequence.
    fn sort_by_key<T, K, F>(&self, items: Vec<T>, key: F) -> SortedSeq<T>
    where
        K: Ord,
        F: FnMut(&T) -> K;
}

/// Sorts in memory.
#[derive(Debug, Default, Copy, Clone)]
pub struct MemorySorter;

impl Sorter for MemorySorter {
    fn sort_by_key<T, K, F>(&self, mut items: Vec<T>, key: F) -> SortedSeq<T>
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        items.sort_by_key(key);
        SortedSeq::from_sorted(items)
    }
}

/// A read-only cursor over pre-sorted elements.
#[derive(Debug, Clone)]
pub struct SortedSeq<T> {
    items: VecDeque<T>,
    consumed: usize,
}

impl<T> SortedSeq<T> {
    /// Wraps elements that are already in the desired order.
    pub fn from_sorted(items: impl Into<VecDeque<T>>) -> Self {
        Self {
            items: items.into(),
            consumed: 0,
        }
    }

    /// Returns the next element without consuming it.
    pub fn peek(&self) -> Option<&T> {
        self.items.front()
    }

    /// Returns true if every element has been consumed.
    pub fn is_done(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of elements left.
    pub fn remaining(&self) -> usize {
        self.items.len()
    }

    /// Returns the number of elements consumed so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Consumes the next element if it satisfies `pred`.
    pub fn next_if(&mut self, pred: impl FnOnce(&T) -> bool) -> Option<T> {
        if self.items.front().is_some_and(pred) {
            self.next()
        } else {
            None
        }
    }

    /// Skips elements while `pred` holds and returns the first one for which
    /// it does not, without consuming it.
    pub fn advance_while(&mut self, mut pred: impl FnMut(&T) -> bool) -> Option<&T> {
        while self.next_if(&mut pred).is_some() {}
        self.peek()
    }
}

impl<T> Iterator for SortedSeq<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let item = self.items.pop_front()?;
        self.consumed += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.items.len(), Some(self.items.len()))
    }
}

impl<T> ExactSizeIterator for SortedSeq<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sorter() {
        let seq = MemorySorter.sort_by_key(vec![3, 1, 2], |&x| x);
        assert_eq!(seq.collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_memory_sorter_reverse_key() {
        let seq = MemorySorter.sort_by_key(vec![3, 1, 2], |&x| std::cmp::Reverse(x));
        assert_eq!(seq.collect::<Vec<_>>(), vec![3, 2, 1]);
    }

    #[test]
    fn test_cursor() {
        let mut seq = SortedSeq::from_sorted(vec![1, 2, 4, 8, 16]);
        assert_eq!(seq.peek(), Some(&1));
        assert_eq!(seq.next_if(|&x| x > 1), None);
        assert_eq!(seq.next(), Some(1));
        assert_eq!(seq.advance_while(|&x| x < 8), Some(&8));
        assert_eq!(seq.consumed(), 3);
        assert_eq!(seq.remaining(), 2);
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.advance_while(|_| true), None);
        assert!(seq.is_done());
    }
}
