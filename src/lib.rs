//! Trellis - in-memory directed graph engine
//!
//! This crate stores weighted or unweighted directed graphs and runs the
//! classical algorithms over them: depth-first and lockstep breadth-first
//! traversal, multi-source convergence, topological sort, Kosaraju strongly
//! connected components and Dijkstra shortest paths backed by an indexed
//! priority queue.
//!
//! # Example
//!
//! ```rust
//! use trellis::graph::Graph;
//!
//! let graph: Graph = Graph::from_weighted_edges(
//!     &["A", "B", "C"],
//!     &[("A", "B", 1.0), ("B", "C", 2.0), ("A", "C", 5.0)],
//! ).unwrap();
//!
//! let path = graph.shortest_path("A", "C").unwrap().unwrap();
//! assert_eq!(path.nodes, vec!["A", "B", "C"]);
//! assert_eq!(path.weight, 3.0);
//! ```

pub mod algorithms;
pub mod export;
pub mod graph;
pub mod logging;
pub mod queue;
pub mod shortest_path;
pub mod spec;
pub mod traversal;
