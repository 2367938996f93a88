//! Graph algorithms.
//!
//! Every algorithm is a method on [`Graph`](crate::graph::Graph) that borrows
//! it immutably and returns owned ids:
//!
//! - [`topological`]: `topological_sort`, `try_topological_sort`, `has_cycle`
//! - [`kosaraju`]: `strongly_connected_components`
//! - [`convergence`]: `converge`, the lockstep multi-source meeting search
//!
//! Transposition mutates the graph and lives on the store
//! ([`Graph::transpose`](crate::graph::Graph::transpose)).
//!
//! A missing ordering, meeting point or component is a normal outcome and
//! is reported as `None` or an empty result, never as an error.

pub mod convergence;
pub mod kosaraju;
pub mod topological;


pub use convergence::Convergence;
