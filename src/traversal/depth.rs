//! Depth-first traversal.
//!
//! [`walk`] is the single iterative DFS loop used by every depth-first
//! operation in the crate. It keeps an explicit stack of `(node, next child)`
//! frames, so deep graphs never exhaust the call stack, and defers every
//! decision to a [`DepthPolicy`].

use std::collections::HashSet;
use std::convert::Infallible;

use super::{into_ok, visit_all, Traversal, TraversalError, Visit};
use crate::graph::{Direction, Graph, GraphResult, NodeIndex};

/// What the walk does with a node it just entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// Push the node and walk its neighbors.
    Descend,
    /// Leave the node alone; `leave` is not called for it.
    Skip,
    /// Stop the whole walk immediately.
    Halt,
}

/// Decisions plugged into [`walk`].
pub(crate) trait DepthPolicy<E> {
    /// Called each time the walk reaches `ix`, including already seen nodes.
    fn enter(&mut self, ix: NodeIndex) -> Result<Step, E>;

    /// Called once every neighbor of a descended node has been handled.
    fn leave(&mut self, _ix: NodeIndex) {}
}

/// Walks from `start` along `direction`, in adjacency order.
///
/// Returns `Ok(true)` if the policy halted the walk. A halt unwinds at once:
/// nodes still on the stack are not left.
pub(crate) fn walk<T, E, P>(
    graph: &Graph<T>,
    start: NodeIndex,
    direction: Direction,
    policy: &mut P,
) -> Result<bool, E>
where
    P: DepthPolicy<E>,
{
    match policy.enter(start)? {
        Step::Descend => {}
        Step::Skip => return Ok(false),
        Step::Halt => return Ok(true),
    }

    let mut stack: Vec<(NodeIndex, usize)> = vec![(start, 0)];
    while let Some(frame) = stack.last_mut() {
        let (ix, next) = *frame;
        let neighbors = graph.neighbors(ix, direction);
        if next < neighbors.len() {
            frame.1 += 1;
            let target = neighbors[next].node();
            match policy.enter(target)? {
                Step::Descend => stack.push((target, 0)),
                Step::Skip => {}
                Step::Halt => return Ok(true),
            }
        } else {
            stack.pop();
            policy.leave(ix);
        }
    }
    Ok(false)
}

/// Records first visits in pre-order and consults a caller visitor.
struct Preorder<'g, T, F> {
    graph: &'g Graph<T>,
    seen: HashSet<NodeIndex>,
    order: Vec<NodeIndex>,
    visit: F,
}

impl<'g, T, F> Preorder<'g, T, F> {
    fn new(graph: &'g Graph<T>, visit: F) -> Self {
        Self {
            graph,
            seen: HashSet::new(),
            order: Vec::new(),
            visit,
        }
    }
}

impl<T, F, E> DepthPolicy<E> for Preorder<'_, T, F>
where
    F: FnMut(&str) -> Result<Visit, E>,
{
    fn enter(&mut self, ix: NodeIndex) -> Result<Step, E> {
        if !self.seen.insert(ix) {
            return Ok(Step::Skip);
        }
        self.order.push(ix);
        let id = self.graph.id_of(ix);
        tracing::trace!(id, "dfs visit");
        Ok(match (self.visit)(id)? {
            Visit::Continue => Step::Descend,
            Visit::Stop => Step::Halt,
        })
    }
}

/// Records nodes as they finish.
#[derive(Default)]
struct Postorder {
    seen: HashSet<NodeIndex>,
    order: Vec<NodeIndex>,
}

impl DepthPolicy<Infallible> for Postorder {
    fn enter(&mut self, ix: NodeIndex) -> Result<Step, Infallible> {
        Ok(if self.seen.insert(ix) {
            Step::Descend
        } else {
            Step::Skip
        })
    }

    fn leave(&mut self, ix: NodeIndex) {
        self.order.push(ix);
    }
}

/// Tracks the deepest node of the walk, first one wins on ties.
struct Deepest {
    seen: HashSet<NodeIndex>,
    depth: usize,
    best: (usize, NodeIndex),
}

impl DepthPolicy<Infallible> for Deepest {
    fn enter(&mut self, ix: NodeIndex) -> Result<Step, Infallible> {
        if !self.seen.insert(ix) {
            return Ok(Step::Skip);
        }
        self.depth += 1;
        if self.depth > self.best.0 {
            self.best = (self.depth, ix);
        }
        Ok(Step::Descend)
    }

    fn leave(&mut self, _ix: NodeIndex) {
        self.depth -= 1;
    }
}

fn to_ids<T>(graph: &Graph<T>, order: &[NodeIndex]) -> Vec<String> {
    order.iter().map(|&ix| graph.id_of(ix).to_string()).collect()
}

impl<T> Graph<T> {
    /// Depth-first search from `start`, returning ids in visit order.
    ///
    /// Children are explored in insertion order and every node is visited
    /// at most once.
    ///
    /// # Arguments
    ///
    /// * `start` - Id of the node to start from
    ///
    /// # Returns
    ///
    /// Ids reachable from `start` in pre-order, or `NodeNotFound`.
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
    /// assert_eq!(graph.depth_first_search("A").unwrap(), vec!["A", "B", "D", "C"]);
    /// ```
    pub fn depth_first_search(&self, start: &str) -> GraphResult<Vec<String>> {
        Ok(self.depth_first_search_with(start, visit_all)?.order)
    }

    /// Depth-first search from `start`, calling `visit` on each new node.
    ///
    /// The visitor runs after the node is recorded. `Visit::Stop` ends the
    /// search with the nodes recorded so far and `stopped` set; an error
    /// aborts it.
    #[tracing::instrument(level = "debug", skip(self, visit), fields(graph = %self.name()))]
    pub fn depth_first_search_with<E, F>(
        &self,
        start: &str,
        visit: F,
    ) -> Result<Traversal, TraversalError<E>>
    where
        F: FnMut(&str) -> Result<Visit, E>,
    {
        let start = self.index_of(start)?;
        let mut policy = Preorder::new(self, visit);
        let stopped = walk(self, start, Direction::Outgoing, &mut policy)
            .map_err(TraversalError::Visitor)?;
        tracing::debug!(visited = policy.order.len(), stopped, "dfs finished");
        Ok(Traversal {
            order: to_ids(self, &policy.order),
            stopped,
        })
    }

    /// Nodes reachable from `start` in the order they finish.
    ///
    /// A node finishes once all of its children have finished, so `start`
    /// always comes last.
    pub fn post_order_dfs(&self, start: &str) -> GraphResult<Vec<String>> {
        let start = self.index_of(start)?;
        let mut policy = Postorder::default();
        into_ok(walk(self, start, Direction::Outgoing, &mut policy));
        Ok(to_ids(self, &policy.order))
    }

    /// The deepest node reachable from `id` by following parent edges.
    ///
    /// Depth is measured along the depth-first walk over parents, each node
    /// counted once; the first node found at the greatest depth wins. A node
    /// without parents is its own furthest ancestor.
    pub fn furthest_ancestor(&self, id: &str) -> GraphResult<String> {
        let ix = self.index_of(id)?;
        Ok(self.id_of(self.deepest_ancestor(ix)).to_string())
    }

    pub(crate) fn deepest_ancestor(&self, ix: NodeIndex) -> NodeIndex {
        let mut policy = Deepest {
            seen: HashSet::new(),
            depth: 0,
            best: (0, ix),
        };
        into_ok(walk(self, ix, Direction::Incoming, &mut policy));
        policy.best.1
    }

    /// Pre-order depth-first forest covering every node.
    ///
    /// Each tree is rooted at the furthest ancestor of the first id (in
    /// insertion order) not yet covered, and trees never revisit nodes of
    /// earlier ones.
    pub fn forest_dfs(&self) -> Vec<Vec<String>> {
        let mut policy = Preorder::new(self, visit_all);
        let mut forest = Vec::new();
        for ix in self.indices() {
            if policy.seen.contains(&ix) {
                continue;
            }
            let root = self.deepest_ancestor(ix);
            into_ok(walk(self, root, Direction::Outgoing, &mut policy));
            forest.push(to_ids(self, &std::mem::take(&mut policy.order)));
        }
        forest
    }

    /// Post-order depth-first forest covering every node.
    ///
    /// Trees are rooted as in [`forest_dfs`](Self::forest_dfs); each tree
    /// lists its nodes in finish order.
    pub fn forest_post_order_dfs(&self) -> Vec<Vec<String>> {
        self.forest_post_order()
            .iter()
            .map(|tree| to_ids(self, tree))
            .collect()
    }

    pub(crate) fn forest_post_order(&self) -> Vec<Vec<NodeIndex>> {
        let mut policy = Postorder::default();
        let mut forest = Vec::new();
        for ix in self.indices() {
            if policy.seen.contains(&ix) {
                continue;
            }
            let root = self.deepest_ancestor(ix);
            into_ok(walk(self, root, Direction::Outgoing, &mut policy));
            forest.push(std::mem::take(&mut policy.order));
        }
        tracing::debug!(trees = forest.len(), "post-order forest");
        forest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::fixtures;
    use crate::graph::GraphError;
    use crate::traversal::stop_when;

    #[test]
    fn test_dfs_order() {
        let graph = fixtures::example();
        assert_eq!(
            graph.depth_first_search("A").unwrap(),
            vec!["A", "D", "B", "E", "G", "H"]
        );
    }

    #[test]
    fn test_dfs_from_sink() {
        let graph = fixtures::example();
        assert_eq!(graph.depth_first_search("E").unwrap(), vec!["E"]);
    }

    #[test]
    fn test_dfs_missing_start() {
        let graph = fixtures::example();
        assert_eq!(
            graph.depth_first_search("Z"),
            Err(GraphError::NodeNotFound { id: "Z".into() })
        );
    }

    #[test]
    fn test_dfs_stop_keeps_current_node() {
        let graph = fixtures::example();
        let walk = graph
            .depth_first_search_with("A", stop_when(|id| id == "E"))
            .unwrap();
        assert_eq!(walk.order, vec!["A", "D", "B", "E"]);
        assert!(walk.stopped);
    }

    #[test]
    fn test_dfs_visitor_error() {
        let graph = fixtures::example();
        let mut budget = 2;
        let result = graph.depth_first_search_with("A", |_| {
            if budget == 0 {
                return Err("out of budget");
            }
            budget -= 1;
            Ok(Visit::Continue)
        });
        assert!(matches!(result, Err(TraversalError::Visitor("out of budget"))));
    }

    #[test]
    fn test_dfs_deep_chain_does_not_overflow() {
        let mut graph: Graph = Graph::unweighted();
        let ids: Vec<String> = (0..100_000).map(|i| format!("n{i}")).collect();
        for id in &ids {
            graph.insert(id);
        }
        for pair in ids.windows(2) {
            graph.make_edge(&pair[0], &pair[1], None).unwrap();
        }
        let order = graph.depth_first_search("n0").unwrap();
        assert_eq!(order.len(), ids.len());
        assert_eq!(order.last().map(String::as_str), Some("n99999"));
    }

    #[test]
    fn test_post_order_dfs() {
        let graph = fixtures::example();
        assert_eq!(
            graph.post_order_dfs("A").unwrap(),
            vec!["E", "B", "H", "G", "D", "A"]
        );
    }

    #[test]
    fn test_furthest_ancestor() {
        let graph = fixtures::example();
        assert_eq!(graph.furthest_ancestor("A").unwrap(), "F");
        assert_eq!(graph.furthest_ancestor("C").unwrap(), "C");
        assert_eq!(graph.furthest_ancestor("F").unwrap(), "F");
    }

    #[test]
    fn test_forest_post_order_dfs() {
        let graph = fixtures::example();
        assert_eq!(
            graph.forest_post_order_dfs(),
            vec![
                vec!["E", "B", "H", "A", "G", "D", "F"],
                vec!["C"],
            ]
        );
    }

    #[test]
    fn test_forest_dfs_covers_every_node_once() {
        let graph = fixtures::example();
        let forest = graph.forest_dfs();
        assert_eq!(
            forest,
            vec![
                vec!["F", "D", "A", "B", "E", "H", "G"],
                vec!["C"],
            ]
        );
    }

    #[test]
    fn test_forest_of_empty_graph() {
        let graph: Graph = Graph::unweighted();
        assert!(graph.forest_dfs().is_empty());
        assert!(graph.forest_post_order_dfs().is_empty());
    }
}
