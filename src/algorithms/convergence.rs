//! Multi-source convergence ("meet in the middle") search.

use std::collections::HashMap;
use std::convert::Infallible;

use serde::Serialize;

use crate::graph::{Graph, GraphResult, NodeIndex};
use crate::traversal::breadth::{lockstep, BreadthPolicy};
use crate::traversal::{into_ok, Visit};

/// Where a set of lockstep searches first met.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Convergence {
    /// The first node visited by every source.
    pub meeting: String,
    /// Lockstep round in which the meeting happened; 0 means the start nodes
    /// already met.
    pub round: usize,
    /// One path per source, from its start to `meeting`.
    pub paths: Vec<Vec<String>>,
}

struct Meet {
    sources: usize,
    visits: HashMap<NodeIndex, usize>,
    predecessors: Vec<HashMap<NodeIndex, NodeIndex>>,
    meeting: Option<NodeIndex>,
}

impl BreadthPolicy<Infallible> for Meet {
    fn visit(
        &mut self,
        source: usize,
        ix: NodeIndex,
        from: Option<NodeIndex>,
    ) -> Result<Visit, Infallible> {
        if let Some(from) = from {
            self.predecessors[source].insert(ix, from);
        }
        // A source visits a node at most once, so the count tells how many
        // sources have reached it.
        let count = self.visits.entry(ix).or_insert(0);
        *count += 1;
        if *count == self.sources {
            self.meeting = Some(ix);
            return Ok(Visit::Stop);
        }
        Ok(Visit::Continue)
    }
}

impl Meet {
    fn path(&self, source: usize, meeting: NodeIndex) -> Vec<NodeIndex> {
        let mut path = vec![meeting];
        let mut current = meeting;
        while let Some(&previous) = self.predecessors[source].get(&current) {
            path.push(previous);
            current = previous;
        }
        path.reverse();
        path
    }
}

impl<T> Graph<T> {
    /// Runs a lockstep breadth-first search from every id in `starts` and
    /// stops at the first node that all of them have reached.
    ///
    /// The meeting node is the first one whose visit completes the set of
    /// sources, so no source has to be the one that gets there last. A
    /// single start converges on itself in round 0.
    ///
    /// # Arguments
    ///
    /// * `starts` - Ids to search from; duplicates are allowed
    ///
    /// # Returns
    ///
    /// `Ok(None)` if the searches never meet or `starts` is empty,
    /// `NodeNotFound` if a start id is unknown.
    ///
    /// # Example
    ///
    /// ```rust
    /// use trellis::graph::Graph;
    ///
    /// let graph: Graph = Graph::from_pairs(
    ///     &["a", "b", "m"],
    ///     &[("a", "m"), ("b", "m")],
    /// ).unwrap();
    /// let meet = graph.converge(&["a", "b"]).unwrap().unwrap();
    /// assert_eq!(meet.meeting, "m");
    /// assert_eq!(meet.paths, vec![vec!["a", "m"], vec!["b", "m"]]);
    /// ```
    #[tracing::instrument(level = "debug", skip(self), fields(graph = %self.name()))]
    pub fn converge(&self, starts: &[&str]) -> GraphResult<Option<Convergence>> {
        let starts = starts
            .iter()
            .map(|id| self.index_of(id))
            .collect::<GraphResult<Vec<_>>>()?;
        if starts.is_empty() {
            return Ok(None);
        }

        let mut policy = Meet {
            sources: starts.len(),
            visits: HashMap::new(),
            predecessors: vec![HashMap::new(); starts.len()],
            meeting: None,
        };
        let outcome = into_ok(lockstep(self, &starts, &mut policy));
        let Some(meeting) = policy.meeting else {
            tracing::debug!(rounds = outcome.rounds, "sources never met");
            return Ok(None);
        };

        let paths = (0..starts.len())
            .map(|source| {
                policy
                    .path(source, meeting)
                    .into_iter()
                    .map(|ix| self.id_of(ix).to_string())
                    .collect()
            })
            .collect();
        tracing::debug!(meeting = self.id_of(meeting), round = outcome.rounds, "sources met");
        Ok(Some(Convergence {
            meeting: self.id_of(meeting).to_string(),
            round: outcome.rounds,
            paths,
        }))
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::{fixtures, GraphError};

    #[test]
    fn test_converge_a_and_e() {
        let graph = fixtures::example();
        let meet = graph.converge(&["A", "E"]).unwrap().unwrap();
        assert_eq!(meet.meeting, "E");
        assert_eq!(meet.round, 2);
        assert_eq!(meet.paths, vec![vec!["A", "D", "E"], vec!["E"]]);
    }

    #[test]
    fn test_converge_paths_end_at_meeting() {
        let graph = fixtures::example();
        let meet = graph.converge(&["C", "F"]).unwrap().unwrap();
        for (path, start) in meet.paths.iter().zip(["C", "F"]) {
            assert_eq!(path.first().map(String::as_str), Some(start));
            assert_eq!(path.last(), Some(&meet.meeting));
            for pair in path.windows(2) {
                assert!(graph.has_edge(&pair[0], &pair[1]));
            }
        }
    }

    #[test]
    fn test_converge_symmetric_in_source_order() {
        let graph = fixtures::example();
        let forward = graph.converge(&["A", "E"]).unwrap().unwrap();
        let backward = graph.converge(&["E", "A"]).unwrap().unwrap();
        assert_eq!(forward.meeting, backward.meeting);
        assert_eq!(forward.round, backward.round);
    }

    #[test]
    fn test_converge_single_source() {
        let graph = fixtures::example();
        let meet = graph.converge(&["B"]).unwrap().unwrap();
        assert_eq!(meet.meeting, "B");
        assert_eq!(meet.round, 0);
        assert_eq!(meet.paths, vec![vec!["B"]]);
    }

    #[test]
    fn test_converge_no_meeting() {
        let graph = fixtures::example();
        // E and H only reach themselves.
        assert_eq!(graph.converge(&["E", "H"]).unwrap(), None);
        assert_eq!(
            graph.converge(&["C", "E"]).unwrap().map(|m| m.meeting),
            Some("E".to_string())
        );
    }

    #[test]
    fn test_converge_empty_and_missing() {
        let graph = fixtures::example();
        assert_eq!(graph.converge(&[]).unwrap(), None);
        assert_eq!(
            graph.converge(&["A", "Z"]),
            Err(GraphError::NodeNotFound { id: "Z".into() })
        );
    }
}
