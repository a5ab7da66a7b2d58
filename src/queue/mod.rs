//! Priority queues of pending requests.
//!
//! A sweep never follows a pointer into the future: work on a node that lies
//! further down (or further up) the diagram is recorded as a request and
//! inserted into a priority queue keyed by the position at which the sweep
//! will reach it. When the sweep arrives there, the request is extracted.
//!
//! Any structure with the [`PriorityQueue`] interface works, including an
//! external-memory one. The crate ships a binary-heap realization,
//! [`HeapQueue`], which is also the default [`Queue`].
//!
//! # Example
//!
//! ```
//! use sweep_bdd::queue::{PriorityQueue, Queue};
//!
//! let mut queue = Queue::<u32, &str>::default();
//! queue.insert(3, "c");
//! queue.insert(1, "a");
//! queue.insert(2, "b");
//!
//! assert_eq!(queue.peek_min(), Some(&1));
//! assert_eq!(queue.extract_min(), Some((1, "a")));
//! assert_eq!(queue.len(), 2);
//! ```

mod heap;

pub use heap::HeapQueue;

/// Default queue implementation.
pub type Queue<K, V> = HeapQueue<K, V>;

/// The interface the sweeps need from a priority queue.
///
/// Elements with equal keys are extracted in insertion order.
pub trait PriorityQueue<K: Ord, V> {
    /// Schedules `value` under `key`.
    fn insert(&mut self, key: K, value: V);

    /// Returns the smallest key, if any.
    fn peek_min(&self) -> Option<&K>;

    /// Removes and returns the element with the smallest key.
    fn extract_min(&mut self) -> Option<(K, V)>;

    /// Returns the number of pending elements.
    fn len(&self) -> usize;

    /// Returns true if no element is pending.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes the smallest element if its key equals `key`.
    fn extract_if_min(&mut self, key: &K) -> Option<V> {
        if self.peek_min() == Some(key) {
            self.extract_min().map(|(_, v)| v)
        } else {
            None
        }
    }
}
