//! Shape constraints layered over [`Graph`].
//!
//! Trees are ordinary graphs that satisfy extra rules: one root, at most one
//! parent per node, no cycles, and every node reachable from the root. The
//! validators check those rules after the fact; [`Tree`] keeps them true
//! while the tree is being built.

use super::error::{GraphError, GraphResult};
use super::store::{Graph, Node, NodeIndex};

/// Checks that `graph` is a rooted tree and returns its root.
///
/// # Errors
///
/// * [`GraphError::MultipleParents`] if a node has more than one parent
/// * [`GraphError::Cycle`] if the graph has a cycle, self-loops included
/// * [`GraphError::Disconnected`] if some node is not reachable from the
///   root (an empty graph has no root and fails the same way)
///
/// # Example
///
/// ```rust
/// use trellis::graph::{shape, Graph};
///
/// let graph: Graph = Graph::from_pairs(&["r", "a", "b"], &[("r", "a"), ("r", "b")]).unwrap();
/// assert_eq!(shape::validate_tree(&graph).unwrap(), "r");
/// ```
pub fn validate_tree<T>(graph: &Graph<T>) -> GraphResult<String> {
    for id in graph.ids() {
        if let Some(second) = graph.parents(id)?.nth(1) {
            return Err(GraphError::MultipleParents {
                child: id.to_string(),
                parent: second.id.to_string(),
            });
        }
    }
    graph.try_topological_sort()?;

    let total = graph.node_count();
    let root = graph
        .ids()
        .find(|id| graph.node(id).is_some_and(|node| node.parents().is_empty()))
        .ok_or(GraphError::Disconnected { reached: 0, total })?;
    let reached = graph.depth_first_search(root)?.len();
    if reached != total {
        return Err(GraphError::Disconnected { reached, total });
    }
    Ok(root.to_string())
}

/// Checks that `graph` is a tree in which no node has more than two children.
///
/// # Errors
///
/// Everything [`validate_tree`] reports, plus
/// [`GraphError::TooManyChildren`].
pub fn validate_binary_tree<T>(graph: &Graph<T>) -> GraphResult<String> {
    const LIMIT: usize = 2;

    let root = validate_tree(graph)?;
    for id in graph.ids() {
        if graph.children(id)?.count() > LIMIT {
            return Err(GraphError::TooManyChildren {
                id: id.to_string(),
                limit: LIMIT,
            });
        }
    }
    Ok(root)
}

/// A graph that stays a rooted tree.
///
/// Nodes can only be added as new children of existing nodes and only
/// leaves can be removed, so every state the wrapper allows passes
/// [`validate_tree`].
#[derive(Debug, Clone)]
pub struct Tree<T = ()> {
    graph: Graph<T>,
    root: Option<String>,
}

impl<T> Tree<T> {
    /// Creates a tree holding only `root`.
    pub fn new(root: &str, weighted: bool) -> Self {
        let mut graph = Graph::new("tree", weighted);
        graph.insert(root);
        Self {
            graph,
            root: Some(root.to_string()),
        }
    }

    /// Wraps an existing graph after validating it.
    pub fn from_graph(graph: Graph<T>) -> GraphResult<Self> {
        let root = validate_tree(&graph)?;
        Ok(Self {
            graph,
            root: Some(root),
        })
    }

    /// The root id, `None` once the root has been removed.
    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    /// Adds `child` as a new leaf under `parent`.
    ///
    /// # Errors
    ///
    /// * [`GraphError::DuplicateNode`] if `child` is already in the tree
    /// * [`GraphError::WeightMode`], [`GraphError::InvalidWeight`] or
    ///   [`GraphError::NodeNotFound`] as for [`Graph::make_edge`]
    pub fn insert_child(&mut self, parent: &str, child: &str, weight: Option<f64>) -> GraphResult<NodeIndex> {
        if self.graph.contains(child) {
            return Err(GraphError::DuplicateNode {
                id: child.to_string(),
            });
        }
        self.graph.insert_edge(parent, child, weight)?;
        self.graph.index_of(child)
    }

    /// Removes a leaf and returns it.
    ///
    /// Removing the root (when it is the last node) leaves an empty tree.
    pub fn remove_leaf(&mut self, id: &str) -> GraphResult<Node<T>> {
        if self.graph.children(id)?.next().is_some() {
            return Err(GraphError::HasChildren { id: id.to_string() });
        }
        if self.root.as_deref() == Some(id) {
            self.root = None;
        }
        self.graph.remove_node(id).ok_or_else(|| GraphError::not_found(id))
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Checks if the root has been removed.
    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    /// The underlying graph.
    pub fn graph(&self) -> &Graph<T> {
        &self.graph
    }

    /// Gives back the underlying graph.
    pub fn into_graph(self) -> Graph<T> {
        self.graph
    }
}
