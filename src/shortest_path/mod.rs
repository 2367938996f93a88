//! Shortest-path engine.
//!
//! [`Graph::dijkstra`](crate::graph::Graph::dijkstra) settles nodes out of a
//! [`PriorityQueue`](crate::queue::PriorityQueue) seeded with every node,
//! lowering queued priorities in place as shorter routes are found.
//! [`Graph::shortest_path`](crate::graph::Graph::shortest_path) rebuilds one
//! route from the resulting predecessor map.

mod dijkstra;


pub use dijkstra::{ShortestPaths, WeightedPath};
