//! Topological ordering and cycle detection.

use std::collections::HashMap;
use std::convert::Infallible;

use crate::graph::{Direction, Graph, GraphError, GraphResult, NodeIndex};
use crate::traversal::depth::{walk, DepthPolicy, Step};
use crate::traversal::into_ok;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Active,
    Done,
}

/// Depth-first finishing order with back-edge detection.
///
/// `path` mirrors the walk's stack, so hitting an active node means the
/// path from that node onwards is a cycle.
#[derive(Default)]
struct Ordering {
    marks: HashMap<NodeIndex, Mark>,
    path: Vec<NodeIndex>,
    finished: Vec<NodeIndex>,
    cycle: Option<Vec<NodeIndex>>,
}

impl DepthPolicy<Infallible> for Ordering {
    fn enter(&mut self, ix: NodeIndex) -> Result<Step, Infallible> {
        match self.marks.get(&ix) {
            Some(Mark::Done) => Ok(Step::Skip),
            Some(Mark::Active) => {
                let from = self.path.iter().position(|&p| p == ix).unwrap_or(0);
                self.cycle = Some(self.path[from..].to_vec());
                Ok(Step::Halt)
            }
            None => {
                self.marks.insert(ix, Mark::Active);
                self.path.push(ix);
                Ok(Step::Descend)
            }
        }
    }

    fn leave(&mut self, ix: NodeIndex) {
        self.path.pop();
        self.marks.insert(ix, Mark::Done);
        self.finished.push(ix);
    }
}

impl<T> Graph<T> {
    /// Orders every node so that each parent precedes all of its children.
    ///
    /// Returns `None` if the graph has a cycle; a partial order is never
    /// returned. Self-loops count as cycles.
    ///
    /// # Example
    ///
    /// ```rust
    /// use trellis::graph::Graph;
    ///
    /// let graph: Graph = Graph::from_pairs(
    ///     &["shirt", "tie", "jacket"],
    ///     &[("shirt", "tie"), ("tie", "jacket")],
    /// ).unwrap();
    /// assert_eq!(graph.topological_sort().unwrap(), vec!["shirt", "tie", "jacket"]);
    /// ```
    pub fn topological_sort(&self) -> Option<Vec<String>> {
        self.try_topological_sort().ok()
    }

    /// Like [`topological_sort`](Self::topological_sort), but names the cycle
    /// that prevented an ordering.
    ///
    /// # Errors
    ///
    /// `GraphError::Cycle` with the nodes of the first cycle found, in edge
    /// order.
    #[tracing::instrument(level = "debug", skip(self), fields(graph = %self.name()))]
    pub fn try_topological_sort(&self) -> GraphResult<Vec<String>> {
        let mut policy = Ordering::default();
        for ix in self.indices() {
            if policy.marks.contains_key(&ix) {
                continue;
            }
            if into_ok(walk(self, ix, Direction::Outgoing, &mut policy)) {
                let path: Vec<String> = policy
                    .cycle
                    .take()
                    .unwrap_or_default()
                    .into_iter()
                    .map(|ix| self.id_of(ix).to_string())
                    .collect();
                tracing::debug!(cycle = ?path, "no topological order");
                return Err(GraphError::Cycle { path });
            }
        }
        Ok(policy
            .finished
            .iter()
            .rev()
            .map(|&ix| self.id_of(ix).to_string())
            .collect())
    }

    /// Checks whether any directed cycle (self-loops included) exists.
    pub fn has_cycle(&self) -> bool {
        self.try_topological_sort().is_err()
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::{fixtures, Graph, GraphError};

    fn assert_parents_first(graph: &Graph, order: &[String]) {
        let position = |id: &str| order.iter().position(|o| o == id).unwrap();
        for (parent, child, _) in graph.edges() {
            assert!(
                position(parent) < position(child),
                "{parent} must come before {child} in {order:?}"
            );
        }
    }

    #[test]
    fn test_topological_sort_projects() {
        let graph = fixtures::projects();
        let order = graph.topological_sort().unwrap();
        assert_eq!(order, vec!["F", "E", "B", "A", "D", "C"]);
        assert_parents_first(&graph, &order);
    }

    #[test]
    fn test_topological_sort_cyclic_is_none() {
        let graph = fixtures::example();
        assert_eq!(graph.topological_sort(), None);
        assert!(graph.has_cycle());
    }

    #[test]
    fn test_try_topological_sort_self_loop() {
        let graph = fixtures::example();
        assert_eq!(
            graph.try_topological_sort(),
            Err(GraphError::Cycle {
                path: vec!["A".into()]
            })
        );
    }

    #[test]
    fn test_try_topological_sort_names_cycle() {
        let graph: Graph = Graph::from_pairs(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("b", "c"), ("c", "d"), ("d", "b")],
        )
        .unwrap();
        assert_eq!(
            graph.try_topological_sort(),
            Err(GraphError::Cycle {
                path: vec!["b".into(), "c".into(), "d".into()]
            })
        );
    }

    #[test]
    fn test_topological_sort_empty_graph() {
        let graph: Graph = Graph::unweighted();
        assert_eq!(graph.topological_sort(), Some(vec![]));
        assert!(!graph.has_cycle());
    }

    #[test]
    fn test_topological_sort_after_removing_back_edge() {
        let mut graph: Graph = Graph::from_pairs(
            &["a", "b", "c"],
            &[("a", "b"), ("b", "c"), ("c", "a")],
        )
        .unwrap();
        assert!(graph.has_cycle());
        assert!(graph.remove_edge("c", "a"));
        assert_eq!(graph.topological_sort().unwrap(), vec!["a", "b", "c"]);
    }
}
