//! Strongly connected components (Kosaraju).
//!
//! The first pass is the post-order depth-first forest of the graph. The
//! second pass takes nodes in reverse finish order and collects, for each
//! one not yet assigned, everything that can reach it through unassigned
//! nodes. Walking parent lists stands in for walking the transposed graph,
//! so the graph is never mutated.

use std::collections::HashSet;
use std::convert::Infallible;

use crate::graph::{Direction, Graph, NodeIndex};
use crate::traversal::depth::{walk, DepthPolicy, Step};
use crate::traversal::into_ok;

/// Collects unassigned nodes into the current component.
#[derive(Default)]
struct Assign {
    assigned: HashSet<NodeIndex>,
    component: Vec<NodeIndex>,
}

impl DepthPolicy<Infallible> for Assign {
    fn enter(&mut self, ix: NodeIndex) -> Result<Step, Infallible> {
        if !self.assigned.insert(ix) {
            return Ok(Step::Skip);
        }
        self.component.push(ix);
        Ok(Step::Descend)
    }
}

impl<T> Graph<T> {
    /// Partitions the nodes into strongly connected components.
    ///
    /// Two nodes share a component iff each is reachable from the other.
    /// Components come out in reverse finish order of their first node;
    /// within a component nodes are listed in discovery order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use trellis::graph::Graph;
    ///
    /// let graph: Graph = Graph::from_pairs(
    ///     &["a", "b", "c"],
    ///     &[("a", "b"), ("b", "a"), ("b", "c")],
    /// ).unwrap();
    /// assert_eq!(
    ///     graph.strongly_connected_components(),
    ///     vec![vec!["b", "a"], vec!["c"]],
    /// );
    /// ```
    #[tracing::instrument(level = "debug", skip(self), fields(graph = %self.name()))]
    pub fn strongly_connected_components(&self) -> Vec<Vec<String>> {
        let finished: Vec<NodeIndex> = self.forest_post_order().into_iter().flatten().collect();

        let mut policy = Assign::default();
        let mut components = Vec::new();
        for &seed in finished.iter().rev() {
            if policy.assigned.contains(&seed) {
                continue;
            }
            into_ok(walk(self, seed, Direction::Incoming, &mut policy));
            components.push(
                policy
                    .component
                    .drain(..)
                    .map(|ix| self.id_of(ix).to_string())
                    .collect::<Vec<_>>(),
            );
        }
        tracing::debug!(components = components.len(), "scc finished");
        components
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::{fixtures, Graph};

    #[test]
    fn test_scc_example_graph() {
        let graph = fixtures::example();
        assert_eq!(
            graph.strongly_connected_components(),
            vec![
                vec!["C"],
                vec!["F"],
                vec!["D", "A"],
                vec!["G"],
                vec!["H"],
                vec!["B"],
                vec!["E"],
            ]
        );
    }

    #[test]
    fn test_scc_every_node_once() {
        let graph = fixtures::example();
        let mut all: Vec<String> = graph
            .strongly_connected_components()
            .into_iter()
            .flatten()
            .collect();
        all.sort();
        assert_eq!(all, fixtures::NODES);
    }

    #[test]
    fn test_scc_matches_after_transpose() {
        let mut graph = fixtures::example();
        let mut before: Vec<Vec<String>> = graph
            .strongly_connected_components()
            .into_iter()
            .map(|mut c| {
                c.sort();
                c
            })
            .collect();
        graph.transpose();
        let mut after: Vec<Vec<String>> = graph
            .strongly_connected_components()
            .into_iter()
            .map(|mut c| {
                c.sort();
                c
            })
            .collect();
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn test_scc_single_cycle() {
        let graph: Graph = Graph::from_pairs(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("b", "c"), ("c", "d"), ("d", "a")],
        )
        .unwrap();
        let components = graph.strongly_connected_components();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].len(), 4);
    }

    #[test]
    fn test_scc_empty_graph() {
        let graph: Graph = Graph::unweighted();
        assert!(graph.strongly_connected_components().is_empty());
    }
}
