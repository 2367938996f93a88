//! Dijkstra's single-source shortest paths.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Serialize;

use crate::graph::{Direction, Graph, GraphResult, NodeIndex};
use crate::queue::PriorityQueue;

/// Distances and predecessors computed by [`Graph::dijkstra`].
///
/// Only nodes reachable from the source are recorded; they are kept in the
/// order they were settled, so distances never decrease along
/// [`reached`](Self::reached).
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPaths {
    source: String,
    distances: IndexMap<String, f64>,
    predecessors: HashMap<String, String>,
}

impl ShortestPaths {
    /// The node distances are measured from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Shortest distance from the source, `None` if unreachable.
    pub fn distance(&self, id: &str) -> Option<f64> {
        self.distances.get(id).copied()
    }

    /// The node before `id` on its shortest path. The source is its own
    /// predecessor.
    pub fn predecessor(&self, id: &str) -> Option<&str> {
        self.predecessors.get(id).map(String::as_str)
    }

    /// Reachable nodes with their distances, in settle order.
    pub fn reached(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.distances.iter().map(|(id, &d)| (id.as_str(), d))
    }

    /// Number of reachable nodes, the source included.
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    /// Always false: the source reaches itself.
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Ids on the shortest path from the source to `target`.
    ///
    /// Returns `None` if `target` was not reached.
    pub fn path_to(&self, target: &str) -> Option<Vec<String>> {
        let mut path = vec![target.to_string()];
        let mut current = target;
        while current != self.source {
            current = self.predecessor(current)?;
            path.push(current.to_string());
        }
        path.reverse();
        Some(path)
    }
}

/// A path with its total edge weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedPath {
    /// Ids from start to end.
    pub nodes: Vec<String>,
    /// Sum of the edge weights along `nodes`.
    pub weight: f64,
}

impl<T> Graph<T> {
    /// Computes shortest distances from `source` to every reachable node.
    ///
    /// Edge weights are non-negative by construction, so the first time a
    /// node leaves the queue its distance is final. Unweighted graphs count
    /// every edge as 1.
    ///
    /// # Example
    ///
    /// ```rust
    /// use trellis::graph::Graph;
    ///
    /// let graph: Graph = Graph::from_weighted_edges(
    ///     &["a", "b", "c"],
    ///     &[("a", "b", 4.0), ("a", "c", 1.0), ("c", "b", 1.0)],
    /// ).unwrap();
    /// let paths = graph.dijkstra("a").unwrap();
    /// assert_eq!(paths.distance("b"), Some(2.0));
    /// assert_eq!(paths.predecessor("b"), Some("c"));
    /// ```
    #[tracing::instrument(level = "debug", skip(self), fields(graph = %self.name()))]
    pub fn dijkstra(&self, source: &str) -> GraphResult<ShortestPaths> {
        let source_ix = self.index_of(source)?;

        let mut distance: HashMap<NodeIndex, f64> = self
            .indices()
            .map(|ix| (ix, if ix == source_ix { 0.0 } else { f64::INFINITY }))
            .collect();
        let mut previous: HashMap<NodeIndex, NodeIndex> = HashMap::from([(source_ix, source_ix)]);
        let mut queue: PriorityQueue<NodeIndex> =
            self.indices().map(|ix| (ix, distance[&ix])).collect();

        let mut settled = IndexMap::new();
        while let Some((current, dist)) = queue.pop() {
            if dist.is_infinite() {
                // Everything left is unreachable.
                break;
            }
            settled.insert(self.id_of(current).to_string(), dist);
            for neighbor in self.neighbors(current, Direction::Outgoing) {
                let next = neighbor.node();
                let candidate = dist + neighbor.cost();
                if candidate >= distance[&next] {
                    continue;
                }
                // Weights are finite and non-negative, so a settled node holds
                // a distance of at most `dist` and never gets past the check
                // above. Only queued nodes are relaxed.
                if let Err(err) = queue.update_node(&next, candidate) {
                    debug_assert!(false, "relaxed a node the queue rejects: {err}");
                    tracing::warn!(node = self.id_of(next), %err, "relaxation skipped");
                    continue;
                }
                distance.insert(next, candidate);
                previous.insert(next, current);
                tracing::trace!(node = self.id_of(next), candidate, "relaxed");
            }
        }
        tracing::debug!(reached = settled.len(), "dijkstra finished");

        Ok(ShortestPaths {
            source: source.to_string(),
            predecessors: previous
                .into_iter()
                .map(|(node, pred)| (self.id_of(node).to_string(), self.id_of(pred).to_string()))
                .collect(),
            distances: settled,
        })
    }

    /// Shortest path from `start` to `end` with its total weight.
    ///
    /// # Returns
    ///
    /// `Ok(None)` if `end` is unreachable, `NodeNotFound` if either id is
    /// unknown.
    pub fn shortest_path(&self, start: &str, end: &str) -> GraphResult<Option<WeightedPath>> {
        self.index_of(end)?;
        let paths = self.dijkstra(start)?;
        let Some(nodes) = paths.path_to(end) else {
            return Ok(None);
        };
        let weight = nodes
            .windows(2)
            .filter_map(|pair| self.edge(&pair[0], &pair[1]))
            .map(|edge| edge.weight.unwrap_or(1.0))
            .sum();
        Ok(Some(WeightedPath { nodes, weight }))
    }
}
