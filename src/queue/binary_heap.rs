//! Indexed binary heap with in-place priority updates.
//!
//! Entries live in a 1-indexed array: position 0 holds a keyless sentinel so
//! that the parent of position `k` is `k / 2` and its children are `2k` and
//! `2k + 1`. A key → position map is kept in step with every swap, which is
//! what makes [`PriorityQueue::update_node`] (decrease-key) O(log n).

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Picks the preferred of two priorities.
///
/// Must return one of its arguments. Returning the first argument on ties
/// keeps sift comparisons left-biased.
pub type PriorityFn = fn(f64, f64) -> f64;

/// Lower priority wins. Ties go to the first argument.
pub fn min_priority(first: f64, second: f64) -> f64 {
    if second < first {
        second
    } else {
        first
    }
}

/// Higher priority wins. Ties go to the first argument.
pub fn max_priority(first: f64, second: f64) -> f64 {
    if second > first {
        second
    } else {
        first
    }
}

/// Errors returned by [`PriorityQueue`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    /// The key is already in the queue.
    #[error("key already queued: {0}")]
    DuplicateKey(String),

    /// The key is not in the queue.
    #[error("key not queued: {0}")]
    UnknownKey(String),

    /// Priorities must be comparable.
    #[error("priority must not be NaN")]
    InvalidPriority,
}

/// Result type alias for queue operations.
pub type QueueResult<T> = Result<T, QueueError>;

#[derive(Debug, Clone)]
struct Entry<K> {
    key: Option<K>,
    priority: f64,
}

/// A min- (or max-) priority queue over `(key, priority)` pairs that supports
/// changing the priority of a queued key.
///
/// # Example
///
/// ```rust
/// use trellis::queue::PriorityQueue;
///
/// let mut queue = PriorityQueue::new();
/// queue.insert("a".to_string(), 5.0).unwrap();
/// queue.insert("b".to_string(), 3.0).unwrap();
/// queue.insert("c".to_string(), 4.0).unwrap();
///
/// queue.update_node("a", 1.0).unwrap();
///
/// assert_eq!(queue.pop(), Some(("a".to_string(), 1.0)));
/// assert_eq!(queue.pop(), Some(("b".to_string(), 3.0)));
/// ```
#[derive(Debug, Clone)]
pub struct PriorityQueue<K = String> {
    heap: Vec<Entry<K>>,
    positions: HashMap<K, usize>,
    priority: PriorityFn,
}

impl<K: Hash + Eq + Clone + Debug> Default for PriorityQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a min-priority queue. A repeated key keeps its last priority and
/// entries with a NaN priority are skipped.
impl<K: Hash + Eq + Clone + Debug> FromIterator<(K, f64)> for PriorityQueue<K> {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut queue = Self::with_capacity(iter.size_hint().0);
        for (key, priority) in iter {
            if priority.is_nan() {
                continue;
            }
            // NaN is filtered above and presence is checked here, so neither
            // call can fail.
            let queued = if queue.contains(&key) {
                queue.update_node(&key, priority)
            } else {
                queue.insert(key, priority)
            };
            debug_assert!(queued.is_ok(), "collecting into queue: {queued:?}");
        }
        queue
    }
}

impl<K: Hash + Eq + Clone + Debug> PriorityQueue<K> {
    /// Creates an empty min-priority queue.
    pub fn new() -> Self {
        Self::with_priority(min_priority)
    }

    /// Creates an empty max-priority queue.
    pub fn max() -> Self {
        Self::with_priority(max_priority)
    }

    /// Creates an empty queue ordered by `priority`.
    pub fn with_priority(priority: PriorityFn) -> Self {
        Self::with_capacity_and_priority(0, priority)
    }

    /// Creates an empty min-priority queue with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_priority(capacity, min_priority)
    }

    fn with_capacity_and_priority(capacity: usize, priority: PriorityFn) -> Self {
        let mut heap = Vec::with_capacity(capacity + 1);
        heap.push(Entry {
            key: None,
            priority: priority(f64::NEG_INFINITY, f64::INFINITY),
        });
        Self {
            heap,
            positions: HashMap::with_capacity(capacity),
            priority,
        }
    }

    /// Number of queued entries.
    pub fn len(&self) -> usize {
        self.heap.len() - 1
    }

    /// Checks if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks if `key` is queued.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.positions.contains_key(key)
    }

    /// Current priority of `key`, if queued.
    pub fn priority_of<Q>(&self, key: &Q) -> Option<f64>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.positions.get(key).map(|&k| self.heap[k].priority)
    }

    /// The entry that [`pop`](Self::pop) would return next.
    pub fn peek(&self) -> Option<(&K, f64)> {
        let root = self.heap.get(1)?;
        root.key.as_ref().map(|key| (key, root.priority))
    }

    /// Adds `key` with `priority`.
    ///
    /// # Errors
    ///
    /// [`QueueError::DuplicateKey`] if the key is already queued,
    /// [`QueueError::InvalidPriority`] if `priority` is NaN.
    pub fn insert(&mut self, key: K, priority: f64) -> QueueResult<()> {
        if priority.is_nan() {
            return Err(QueueError::InvalidPriority);
        }
        if self.positions.contains_key(&key) {
            return Err(QueueError::DuplicateKey(format!("{key:?}")));
        }
        let position = self.heap.len();
        self.positions.insert(key.clone(), position);
        self.heap.push(Entry {
            key: Some(key),
            priority,
        });
        self.float_index(position);
        Ok(())
    }

    /// Removes and returns the entry with the best priority.
    ///
    /// Returns `None` when the queue is empty.
    pub fn pop(&mut self) -> Option<(K, f64)> {
        if self.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.heap.swap(1, last);
        let Entry { key, priority } = self.heap.pop()?;
        let key = key?;
        self.positions.remove(&key);

        if !self.is_empty() {
            self.reindex(1);
            self.sink_index(1);
        }
        Some((key, priority))
    }

    /// Changes the priority of a queued key and restores heap order.
    ///
    /// An improved priority floats the entry toward the root; anything else
    /// sinks it.
    ///
    /// # Errors
    ///
    /// [`QueueError::UnknownKey`] if the key is not queued,
    /// [`QueueError::InvalidPriority`] if `priority` is NaN.
    pub fn update_node<Q>(&mut self, key: &Q, priority: f64) -> QueueResult<()>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        if priority.is_nan() {
            return Err(QueueError::InvalidPriority);
        }
        let position = *self
            .positions
            .get(key)
            .ok_or_else(|| QueueError::UnknownKey(format!("{key:?}")))?;

        let old = self.heap[position].priority;
        self.heap[position].priority = priority;
        if priority != old && (self.priority)(priority, old) == priority {
            self.float_index(position);
        } else {
            self.sink_index(position);
        }
        Ok(())
    }

    /// Drains the queue in priority order.
    pub fn into_sorted_vec(mut self) -> Vec<(K, f64)> {
        let mut sorted = Vec::with_capacity(self.len());
        while let Some(entry) = self.pop() {
            sorted.push(entry);
        }
        sorted
    }

    /// Checks the heap-order and position-map invariants.
    pub fn is_heap_ordered(&self) -> bool {
        let ordered = (2..self.heap.len()).all(|k| !self.prefers(k, k / 2));
        let indexed = self.positions.len() == self.len()
            && self
                .positions
                .iter()
                .all(|(key, &k)| self.heap.get(k).and_then(|e| e.key.as_ref()) == Some(key));
        ordered && indexed
    }

    /// Of positions `a` and `b`, the one whose priority is preferred; `a` on ties.
    fn priority_arg(&self, a: usize, b: usize) -> usize {
        let pa = self.heap[a].priority;
        if (self.priority)(pa, self.heap[b].priority) == pa {
            a
        } else {
            b
        }
    }

    /// Whether position `a` is strictly preferred over position `b`.
    fn prefers(&self, a: usize, b: usize) -> bool {
        let (pa, pb) = (self.heap[a].priority, self.heap[b].priority);
        pa != pb && (self.priority)(pa, pb) == pa
    }

    fn float_index(&mut self, mut k: usize) {
        while k > 1 && self.prefers(k, k / 2) {
            self.swap(k, k / 2);
            k /= 2;
        }
    }

    fn sink_index(&mut self, mut k: usize) {
        let len = self.len();
        loop {
            let left = 2 * k;
            if left > len {
                break;
            }
            let child = if left < len {
                self.priority_arg(left, left + 1)
            } else {
                left
            };
            if !self.prefers(child, k) {
                break;
            }
            self.swap(k, child);
            k = child;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.reindex(a);
        self.reindex(b);
    }

    fn reindex(&mut self, k: usize) {
        if let Some(key) = &self.heap[k].key {
            if let Some(position) = self.positions.get_mut(key) {
                *position = k;
            }
        }
    }
}
