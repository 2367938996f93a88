//! Priority queue used by the shortest-path engine.
//!
//! [`PriorityQueue`] is an indexed binary heap: besides `insert` and `pop`
//! it can change the priority of an entry that is already queued
//! (decrease-key) without removing and re-inserting it.

mod binary_heap;


pub use binary_heap::{
    max_priority, min_priority, PriorityFn, PriorityQueue, QueueError, QueueResult,
};
