//! Traversal engine.
//!
//! Two walkers drive every search in the crate:
//!
//! - [`depth`]: an iterative depth-first walk from one start node that asks a
//!   policy, on entering each node, whether to descend, skip the branch or
//!   halt, and tells it when a node is finished (post-order).
//! - [`breadth`]: a lockstep breadth-first walk from N start nodes with N
//!   independent frontiers and visited sets, advancing one node per source
//!   per round so that the sources progress at the same pace.
//!
//! The public searches on [`Graph`](crate::graph::Graph) accept a visitor
//! returning `Result<Visit, E>`: `Ok(Visit::Continue)` keeps going,
//! `Ok(Visit::Stop)` ends the traversal early with what has been recorded so
//! far, and `Err(e)` aborts it with the visitor's error.
//!
//! # Example
//!
//! ```rust
//! use trellis::graph::Graph;
//! use trellis::traversal::stop_when;
//!
//! let graph: Graph = Graph::from_pairs(
//!     &["A", "B", "C", "D"],
//!     &[("A", "B"), ("B", "C"), ("C", "D")],
//! ).unwrap();
//!
//! let walk = graph.depth_first_search_with("A", stop_when(|id| id == "C")).unwrap();
//! assert_eq!(walk.order, vec!["A", "B", "C"]);
//! assert!(walk.stopped);
//! ```

pub mod breadth;
pub mod depth;

use std::convert::Infallible;

use crate::graph::GraphError;

/// A visitor's decision after seeing a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visit {
    /// Keep traversing.
    #[default]
    Continue,
    /// End the whole traversal now; the current node stays recorded.
    Stop,
}

impl From<bool> for Visit {
    /// `true` means stop.
    fn from(stop: bool) -> Self {
        if stop {
            Visit::Stop
        } else {
            Visit::Continue
        }
    }
}

/// Result of a single-source traversal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Traversal {
    /// Ids in visit order.
    pub order: Vec<String>,
    /// Whether the visitor ended the traversal early.
    pub stopped: bool,
}

/// Result of a lockstep multi-source traversal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MultiTraversal {
    /// Visit order per source, in the order the sources were given.
    pub orders: Vec<Vec<String>>,
    /// Completed or interrupted lockstep rounds after the start nodes were visited.
    pub rounds: usize,
    /// Whether the visitor ended the traversal early.
    pub stopped: bool,
}

/// Errors returned by traversals that run a caller-supplied visitor.
#[derive(Debug, thiserror::Error)]
pub enum TraversalError<E> {
    /// The traversal referenced a node that does not exist.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// The visitor returned an error.
    #[error("visitor aborted traversal: {0}")]
    Visitor(E),
}

impl From<TraversalError<Infallible>> for GraphError {
    fn from(err: TraversalError<Infallible>) -> Self {
        match err {
            TraversalError::Graph(err) => err,
            TraversalError::Visitor(never) => match never {},
        }
    }
}

/// Adapts an early-stop predicate (`true` = stop) into a visitor.
pub fn stop_when<P>(mut predicate: P) -> impl FnMut(&str) -> Result<Visit, Infallible>
where
    P: FnMut(&str) -> bool,
{
    move |id| Ok(Visit::from(predicate(id)))
}

/// Visitor that never stops.
pub(crate) fn visit_all(_: &str) -> Result<Visit, Infallible> {
    Ok(Visit::Continue)
}

pub(crate) fn into_ok<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}
