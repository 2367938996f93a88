//! Graph storage.
//!
//! This module provides the [`Graph`] struct: an arena of nodes addressed by
//! [`NodeIndex`], keyed by string ids, with reciprocal parent/child
//! adjacency and an optional payload per node. Shape validators for trees
//! live in [`shape`].
//!
//! # Example
//!
//! ```rust
//! use trellis::graph::Graph;
//!
//! let mut graph: Graph = Graph::unweighted();
//! graph.insert("a");
//! graph.insert("b");
//! graph.make_edge("a", "b", None).unwrap();
//!
//! assert_eq!(graph.node_count(), 2);
//! assert_eq!(graph.edge_count(), 1);
//! ```

mod error;
mod ids;
pub mod shape;
mod store;

pub use error::{GraphError, GraphResult};
pub use ids::IdGenerator;
pub use store::{Direction, Graph, Neighbor, NeighborRef, Node, NodeIndex};

#[cfg(test)]
pub(crate) use store::fixtures;
