//! Breadth-first traversal.
//!
//! [`lockstep`] runs N breadth-first searches side by side, one per start
//! node. Each source owns its frontier and visited set. The start nodes are
//! visited first, in source order; after that every round lets each source,
//! again in source order, dequeue one node and visit its unvisited
//! children. The interleaving is deterministic, which is what makes
//! convergence results reproducible.

use std::collections::{HashSet, VecDeque};

use super::{visit_all, MultiTraversal, Traversal, TraversalError, Visit};
use crate::graph::{Direction, Graph, GraphResult, NodeIndex};

/// Decisions plugged into [`lockstep`].
pub(crate) trait BreadthPolicy<E> {
    /// Called on the first visit of `ix` by `source`.
    ///
    /// `from` is the node whose expansion reached `ix`, `None` for a start.
    fn visit(&mut self, source: usize, ix: NodeIndex, from: Option<NodeIndex>) -> Result<Visit, E>;
}

/// How a lockstep walk ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Outcome {
    pub rounds: usize,
    pub stopped: bool,
}

pub(crate) fn lockstep<T, E, P>(
    graph: &Graph<T>,
    starts: &[NodeIndex],
    policy: &mut P,
) -> Result<Outcome, E>
where
    P: BreadthPolicy<E>,
{
    let sources = starts.len();
    let mut frontiers: Vec<VecDeque<NodeIndex>> = vec![VecDeque::new(); sources];
    let mut visited: Vec<HashSet<NodeIndex>> = vec![HashSet::new(); sources];
    let mut rounds = 0;

    for (source, &start) in starts.iter().enumerate() {
        visited[source].insert(start);
        frontiers[source].push_back(start);
        if policy.visit(source, start, None)? == Visit::Stop {
            return Ok(Outcome { rounds, stopped: true });
        }
    }

    while frontiers.iter().any(|frontier| !frontier.is_empty()) {
        rounds += 1;
        for source in 0..sources {
            let Some(current) = frontiers[source].pop_front() else {
                continue;
            };
            for neighbor in graph.neighbors(current, Direction::Outgoing) {
                let next = neighbor.node();
                if !visited[source].insert(next) {
                    continue;
                }
                frontiers[source].push_back(next);
                if policy.visit(source, next, Some(current))? == Visit::Stop {
                    return Ok(Outcome { rounds, stopped: true });
                }
            }
        }
    }
    Ok(Outcome { rounds, stopped: false })
}

/// Records each source's visit order and consults a caller visitor.
struct Orders<'g, T, F> {
    graph: &'g Graph<T>,
    orders: Vec<Vec<NodeIndex>>,
    visit: F,
}

impl<T, F, E> BreadthPolicy<E> for Orders<'_, T, F>
where
    F: FnMut(usize, &str) -> Result<Visit, E>,
{
    fn visit(&mut self, source: usize, ix: NodeIndex, _from: Option<NodeIndex>) -> Result<Visit, E> {
        self.orders[source].push(ix);
        let id = self.graph.id_of(ix);
        tracing::trace!(source, id, "bfs visit");
        (self.visit)(source, id)
    }
}

impl<T> Graph<T> {
    /// Breadth-first search from `start`, returning ids in visit order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use trellis::graph::Graph;
    ///
    /// let graph: Graph = Graph::from_pairs(
    ///     &["A", "B", "C", "D"],
    ///     &[("A", "B"), ("A", "C"), ("B", "D")],
    /// ).unwrap();
    /// assert_eq!(graph.breadth_first_search("A").unwrap(), vec!["A", "B", "C", "D"]);
    /// ```
    pub fn breadth_first_search(&self, start: &str) -> GraphResult<Vec<String>> {
        Ok(self.breadth_first_search_with(start, visit_all)?.order)
    }

    /// Breadth-first search from `start`, calling `visit` on each new node.
    pub fn breadth_first_search_with<E, F>(
        &self,
        start: &str,
        mut visit: F,
    ) -> Result<Traversal, TraversalError<E>>
    where
        F: FnMut(&str) -> Result<Visit, E>,
    {
        let mut walk = self.multi_source_bfs_with(&[start], |_, id| visit(id))?;
        Ok(Traversal {
            order: walk.orders.pop().unwrap_or_default(),
            stopped: walk.stopped,
        })
    }

    /// Lockstep breadth-first search from every id in `starts`.
    ///
    /// Returns one visit order per start. Sources do not share visited
    /// sets, so the same node may appear in several orders.
    pub fn multi_source_bfs(&self, starts: &[&str]) -> GraphResult<Vec<Vec<String>>> {
        Ok(self
            .multi_source_bfs_with(starts, |_, id| visit_all(id))?
            .orders)
    }

    /// Lockstep breadth-first search calling `visit(source, id)` on every
    /// first visit of a node by a source.
    ///
    /// # Arguments
    ///
    /// * `starts` - Start ids; `source` is the position in this slice
    /// * `visit` - Visitor deciding whether to continue
    ///
    /// # Returns
    ///
    /// Per-source visit orders, the number of rounds run and whether the
    /// visitor stopped the search.
    #[tracing::instrument(level = "debug", skip(self, visit), fields(graph = %self.name()))]
    pub fn multi_source_bfs_with<E, F>(
        &self,
        starts: &[&str],
        visit: F,
    ) -> Result<MultiTraversal, TraversalError<E>>
    where
        F: FnMut(usize, &str) -> Result<Visit, E>,
    {
        let starts = starts
            .iter()
            .map(|id| self.index_of(id))
            .collect::<GraphResult<Vec<_>>>()?;
        let mut policy = Orders {
            graph: self,
            orders: vec![Vec::new(); starts.len()],
            visit,
        };
        let outcome = lockstep(self, &starts, &mut policy).map_err(TraversalError::Visitor)?;
        tracing::debug!(rounds = outcome.rounds, stopped = outcome.stopped, "bfs finished");
        Ok(MultiTraversal {
            orders: policy
                .orders
                .iter()
                .map(|order| order.iter().map(|&ix| self.id_of(ix).to_string()).collect())
                .collect(),
            rounds: outcome.rounds,
            stopped: outcome.stopped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::fixtures;
    use crate::graph::GraphError;
    use crate::traversal::stop_when;

    #[test]
    fn test_bfs_order() {
        let graph = fixtures::example();
        assert_eq!(
            graph.breadth_first_search("A").unwrap(),
            vec!["A", "D", "B", "H", "E", "G"]
        );
    }

    #[test]
    fn test_bfs_self_loop_only() {
        let graph = fixtures::example();
        assert_eq!(graph.breadth_first_search("H").unwrap(), vec!["H"]);
    }

    #[test]
    fn test_bfs_stop() {
        let graph = fixtures::example();
        let walk = graph
            .breadth_first_search_with("A", stop_when(|id| id == "B"))
            .unwrap();
        assert_eq!(walk.order, vec!["A", "D", "B"]);
        assert!(walk.stopped);
    }

    #[test]
    fn test_multi_source_bfs_independent_orders() {
        let graph = fixtures::example();
        let orders = graph.multi_source_bfs(&["C", "F"]).unwrap();
        assert_eq!(
            orders,
            vec![
                vec!["C", "B", "A", "E", "D", "H", "G"],
                vec!["F", "D", "A", "B", "E", "G", "H"],
            ]
        );
    }

    #[test]
    fn test_multi_source_bfs_interleaves_sources() {
        let graph = fixtures::example();
        let mut seen = Vec::new();
        let walk = graph
            .multi_source_bfs_with(&["C", "F"], |source, id| {
                seen.push((source, id.to_string()));
                Ok::<_, std::convert::Infallible>(Visit::Continue)
            })
            .unwrap();
        assert_eq!(
            &seen[..5],
            &[
                (0, "C".to_string()),
                (1, "F".to_string()),
                (0, "B".to_string()),
                (0, "A".to_string()),
                (1, "D".to_string()),
            ]
        );
        assert!(!walk.stopped);
    }

    #[test]
    fn test_multi_source_bfs_rounds() {
        let graph: Graph = Graph::from_pairs(&["a", "b", "c"], &[("a", "b"), ("b", "c")]).unwrap();
        let walk = graph
            .multi_source_bfs_with(&["a"], |_, id| visit_all(id))
            .unwrap();
        assert_eq!(walk.rounds, 3);
        assert_eq!(walk.orders, vec![vec!["a", "b", "c"]]);
    }

    #[test]
    fn test_multi_source_bfs_empty_starts() {
        let graph = fixtures::example();
        assert!(graph.multi_source_bfs(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_multi_source_bfs_missing_start() {
        let graph = fixtures::example();
        assert_eq!(
            graph.multi_source_bfs(&["A", "Q"]),
            Err(GraphError::NodeNotFound { id: "Q".into() })
        );
    }
}
