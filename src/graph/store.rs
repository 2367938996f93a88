//! Arena-backed directed graph storage.
//!
//! Nodes live in a dense arena and point at each other through [`NodeIndex`]
//! values. The graph owns every node through its id → index map, which also
//! fixes the iteration order of ids (insertion order). Every edge is stored
//! twice, once in the parent's `children` and once in the child's `parents`,
//! and both halves are always created and removed together.

use indexmap::IndexMap;

use super::error::{GraphError, GraphResult};
use super::ids::IdGenerator;

/// Position of a node in the graph's arena.
///
/// Indices stay valid until a node is removed; removal compacts the arena
/// and may move the last node into the freed slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(usize);

impl NodeIndex {
    /// Returns the raw arena position.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Which adjacency list a walk follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Parent to child (`children` lists).
    #[default]
    Outgoing,
    /// Child to parent (`parents` lists), i.e. the transposed graph.
    Incoming,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Self::Outgoing => Self::Incoming,
            Self::Incoming => Self::Outgoing,
        }
    }
}

/// One half of an edge: the node on the other end plus the edge weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    node: NodeIndex,
    weight: Option<f64>,
}

impl Neighbor {
    /// Index of the node on the other end of the edge.
    pub fn node(&self) -> NodeIndex {
        self.node
    }

    /// Edge weight; `Some` exactly when the graph is weighted.
    pub fn weight(&self) -> Option<f64> {
        self.weight
    }

    /// Cost of traversing this edge. Unweighted edges cost 1.
    pub fn cost(&self) -> f64 {
        self.weight.unwrap_or(1.0)
    }
}

/// A neighbor resolved to its id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborRef<'a> {
    /// Id of the neighboring node.
    pub id: &'a str,
    /// Edge weight, if the graph is weighted.
    pub weight: Option<f64>,
}

/// A node with its payload and both adjacency lists.
#[derive(Debug, Clone)]
pub struct Node<T> {
    id: String,
    payload: Option<T>,
    children: Vec<Neighbor>,
    parents: Vec<Neighbor>,
}

impl<T> Node<T> {
    fn new(id: String, payload: Option<T>) -> Self {
        Self {
            id,
            payload,
            children: Vec::new(),
            parents: Vec::new(),
        }
    }

    /// The node's id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The node's payload, if any.
    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    /// Consumes the node and returns its payload.
    pub fn into_payload(self) -> Option<T> {
        self.payload
    }

    /// Outgoing edges in insertion order.
    pub fn children(&self) -> &[Neighbor] {
        &self.children
    }

    /// Incoming edges in insertion order.
    pub fn parents(&self) -> &[Neighbor] {
        &self.parents
    }

    /// Adjacency list for the given direction.
    pub fn neighbors(&self, direction: Direction) -> &[Neighbor] {
        match direction {
            Direction::Outgoing => &self.children,
            Direction::Incoming => &self.parents,
        }
    }
}

/// A directed graph keyed by string ids, weighted or unweighted.
///
/// The weight mode is fixed at construction: in a weighted graph every edge
/// must carry a weight, in an unweighted graph none may.
///
/// # Example
///
/// ```rust
/// use trellis::graph::Graph;
///
/// let mut graph: Graph = Graph::weighted();
/// graph.insert("A");
/// graph.insert("B");
/// graph.make_edge("A", "B", Some(2.5)).unwrap();
///
/// assert_eq!(graph.edge_count(), 1);
/// assert!(graph.make_edge("A", "B", None).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Graph<T = ()> {
    name: String,
    weighted: bool,
    nodes: Vec<Node<T>>,
    index: IndexMap<String, NodeIndex>,
    edge_count: usize,
}

impl<T> Default for Graph<T> {
    fn default() -> Self {
        Self::unweighted()
    }
}

impl<T> Graph<T> {
    /// Creates an empty graph.
    ///
    /// # Arguments
    ///
    /// * `name` - Title used in logs and exports
    /// * `weighted` - Whether edges carry weights; fixed for the graph's lifetime
    pub fn new(name: impl Into<String>, weighted: bool) -> Self {
        Self::with_capacity(name, weighted, 0)
    }

    /// Creates an empty unweighted graph named `graph`.
    pub fn unweighted() -> Self {
        Self::new("graph", false)
    }

    /// Creates an empty weighted graph named `graph`.
    pub fn weighted() -> Self {
        Self::new("graph", true)
    }

    /// Creates an empty graph with room for `nodes` nodes.
    pub fn with_capacity(name: impl Into<String>, weighted: bool, nodes: usize) -> Self {
        Self {
            name: name.into(),
            weighted,
            nodes: Vec::with_capacity(nodes),
            index: IndexMap::with_capacity(nodes),
            edge_count: 0,
        }
    }

    /// Creates an empty graph named by `ids`.
    pub fn with_generated_name(ids: &mut IdGenerator, weighted: bool) -> Self {
        Self::new(ids.next_id(), weighted)
    }

    /// The graph's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether edges carry weights.
    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Checks if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Checks if a node exists.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Looks up the arena index of `id`.
    pub fn index_of(&self, id: &str) -> GraphResult<NodeIndex> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::not_found(id))
    }

    /// Returns the id stored at `ix`.
    ///
    /// # Panics
    ///
    /// Panics if `ix` does not belong to this graph.
    pub fn id_of(&self, ix: NodeIndex) -> &str {
        &self.nodes[ix.0].id
    }

    /// Gets a node by id.
    pub fn node(&self, id: &str) -> Option<&Node<T>> {
        self.index.get(id).map(|&ix| &self.nodes[ix.0])
    }

    /// Gets a node's payload.
    pub fn payload(&self, id: &str) -> Option<&T> {
        self.node(id).and_then(Node::payload)
    }

    /// Gets a mutable reference to a node's payload.
    pub fn payload_mut(&mut self, id: &str) -> Option<&mut T> {
        let ix = *self.index.get(id)?;
        self.nodes[ix.0].payload.as_mut()
    }

    /// Node ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.index.keys().map(String::as_str)
    }

    /// Node indices in insertion order of their ids.
    pub(crate) fn indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.index.values().copied()
    }

    pub(crate) fn neighbors(&self, ix: NodeIndex, direction: Direction) -> &[Neighbor] {
        self.nodes[ix.0].neighbors(direction)
    }

    fn resolve<'a>(&'a self, list: &'a [Neighbor]) -> impl Iterator<Item = NeighborRef<'a>> + 'a {
        list.iter().map(move |nb| NeighborRef {
            id: self.id_of(nb.node),
            weight: nb.weight,
        })
    }

    /// Outgoing neighbors of `id` in insertion order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use trellis::graph::Graph;
    ///
    /// let graph: Graph = Graph::from_pairs(&["A", "B", "C"], &[("A", "C"), ("A", "B")]).unwrap();
    /// let children: Vec<&str> = graph.children("A").unwrap().map(|n| n.id).collect();
    /// assert_eq!(children, vec!["C", "B"]);
    /// ```
    pub fn children(&self, id: &str) -> GraphResult<impl Iterator<Item = NeighborRef<'_>> + '_> {
        let ix = self.index_of(id)?;
        Ok(self.resolve(&self.nodes[ix.0].children))
    }

    /// Incoming neighbors of `id` in insertion order.
    pub fn parents(&self, id: &str) -> GraphResult<impl Iterator<Item = NeighborRef<'_>> + '_> {
        let ix = self.index_of(id)?;
        Ok(self.resolve(&self.nodes[ix.0].parents))
    }

    /// Returns the edge `parent -> child`, resolved from the parent's side.
    pub fn edge(&self, parent: &str, child: &str) -> Option<NeighborRef<'_>> {
        let p = *self.index.get(parent)?;
        let c = *self.index.get(child)?;
        self.nodes[p.0]
            .children
            .iter()
            .find(|nb| nb.node == c)
            .map(|nb| NeighborRef {
                id: self.id_of(c),
                weight: nb.weight,
            })
    }

    /// Checks if the edge `parent -> child` exists.
    pub fn has_edge(&self, parent: &str, child: &str) -> bool {
        self.edge(parent, child).is_some()
    }

    /// Weight of the edge `parent -> child`; `None` if the edge is absent or
    /// the graph is unweighted.
    pub fn edge_weight(&self, parent: &str, child: &str) -> Option<f64> {
        self.edge(parent, child).and_then(|nb| nb.weight)
    }

    /// All edges as `(parent, child, weight)`, grouped by parent in id order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, Option<f64>)> + '_ {
        self.indices().flat_map(move |p| {
            let parent = self.id_of(p);
            self.nodes[p.0]
                .children
                .iter()
                .map(move |nb| (parent, self.id_of(nb.node), nb.weight))
        })
    }

    /// Creates a node.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateNode`] if `id` already exists.
    pub fn create_node(&mut self, id: impl Into<String>, payload: Option<T>) -> GraphResult<NodeIndex> {
        let id = id.into();
        if self.index.contains_key(&id) {
            return Err(GraphError::DuplicateNode { id });
        }
        let ix = NodeIndex(self.nodes.len());
        tracing::debug!(graph = %self.name, id = %id, "create node");
        self.index.insert(id.clone(), ix);
        self.nodes.push(Node::new(id, payload));
        Ok(ix)
    }

    /// Creates a node without payload unless it already exists.
    ///
    /// Returns the index of the new or existing node.
    pub fn insert(&mut self, id: &str) -> NodeIndex {
        if let Some(&ix) = self.index.get(id) {
            return ix;
        }
        let ix = NodeIndex(self.nodes.len());
        self.index.insert(id.to_string(), ix);
        self.nodes.push(Node::new(id.to_string(), None));
        ix
    }

    fn check_weight(&self, parent: &str, child: &str, weight: Option<f64>) -> GraphResult<()> {
        if weight.is_some() != self.weighted {
            return Err(GraphError::WeightMode {
                parent: parent.to_string(),
                child: child.to_string(),
                weighted: self.weighted,
            });
        }
        match weight {
            Some(w) if !w.is_finite() || w < 0.0 => Err(GraphError::InvalidWeight {
                parent: parent.to_string(),
                child: child.to_string(),
                weight: w,
            }),
            _ => Ok(()),
        }
    }

    /// Creates the edge `parent -> child`.
    ///
    /// Both endpoints must exist. Creating an edge that already exists is a
    /// no-op, whatever weight is passed the second time.
    ///
    /// # Returns
    ///
    /// `true` if a new edge was created, `false` if it already existed.
    ///
    /// # Errors
    ///
    /// * [`GraphError::WeightMode`] if `weight.is_some()` differs from [`Graph::is_weighted`]
    /// * [`GraphError::InvalidWeight`] if the weight is negative or not finite
    /// * [`GraphError::NodeNotFound`] if either endpoint is missing
    pub fn make_edge(&mut self, parent: &str, child: &str, weight: Option<f64>) -> GraphResult<bool> {
        self.check_weight(parent, child, weight)?;
        let p = self.index_of(parent)?;
        let c = self.index_of(child)?;
        Ok(self.link(p, c, weight))
    }

    /// Creates the edge `parent -> child`, creating `child` first if needed.
    ///
    /// The parent must already exist.
    pub fn insert_edge(&mut self, parent: &str, child: &str, weight: Option<f64>) -> GraphResult<bool> {
        self.check_weight(parent, child, weight)?;
        let p = self.index_of(parent)?;
        let c = self.insert(child);
        Ok(self.link(p, c, weight))
    }

    fn link(&mut self, p: NodeIndex, c: NodeIndex, weight: Option<f64>) -> bool {
        if self.nodes[p.0].children.iter().any(|nb| nb.node == c) {
            return false;
        }
        self.nodes[p.0].children.push(Neighbor { node: c, weight });
        self.nodes[c.0].parents.push(Neighbor { node: p, weight });
        self.edge_count += 1;
        tracing::trace!(parent = %self.nodes[p.0].id, child = %self.nodes[c.0].id, ?weight, "link");
        true
    }

    fn unlink(&mut self, p: NodeIndex, c: NodeIndex) -> bool {
        let children = &mut self.nodes[p.0].children;
        let before = children.len();
        children.retain(|nb| nb.node != c);
        let removed = children.len() != before;
        self.nodes[c.0].parents.retain(|nb| nb.node != p);
        if removed {
            self.edge_count -= 1;
        }
        removed
    }

    /// Removes the edge `parent -> child`.
    ///
    /// Returns `false` if either node or the edge does not exist.
    pub fn remove_edge(&mut self, parent: &str, child: &str) -> bool {
        match (self.index.get(parent), self.index.get(child)) {
            (Some(&p), Some(&c)) => self.unlink(p, c),
            _ => false,
        }
    }

    /// Removes a node and every edge touching it.
    ///
    /// Returns the removed node (with empty adjacency), or `None` if it did
    /// not exist. The last node in the arena moves into the freed slot, so
    /// previously obtained [`NodeIndex`] values may be invalidated.
    pub fn remove_node(&mut self, id: &str) -> Option<Node<T>> {
        let ix = *self.index.get(id)?;

        let children: Vec<NodeIndex> = self.nodes[ix.0].children.iter().map(|nb| nb.node).collect();
        for c in children {
            self.unlink(ix, c);
        }
        let parents: Vec<NodeIndex> = self.nodes[ix.0].parents.iter().map(|nb| nb.node).collect();
        for p in parents {
            self.unlink(p, ix);
        }

        self.index.shift_remove(id);
        let last = NodeIndex(self.nodes.len() - 1);
        let removed = self.nodes.swap_remove(ix.0);
        if ix != last {
            self.relocate(last, ix);
        }
        tracing::debug!(graph = %self.name, id, "remove node");
        Some(removed)
    }

    /// Re-targets every reference to a node that moved from `from` to `to`.
    fn relocate(&mut self, from: NodeIndex, to: NodeIndex) {
        let moved = |nb: &Neighbor| if nb.node == from { to } else { nb.node };
        let children: Vec<NodeIndex> = self.nodes[to.0].children.iter().map(moved).collect();
        let parents: Vec<NodeIndex> = self.nodes[to.0].parents.iter().map(moved).collect();

        let retarget = |list: &mut Vec<Neighbor>| {
            for nb in list.iter_mut().filter(|nb| nb.node == from) {
                nb.node = to;
            }
        };
        for c in children {
            retarget(&mut self.nodes[c.0].parents);
        }
        for p in parents {
            retarget(&mut self.nodes[p.0].children);
        }

        if let Some(slot) = self.index.get_mut(self.nodes[to.0].id.as_str()) {
            *slot = to;
        }
    }

    /// Exchanges the labels of two nodes.
    ///
    /// Payload and adjacency stay together in their arena slot, so after the
    /// swap `id1` names the node that used to be `id2` (its payload and its
    /// edges) and vice versa. The positions of both ids in iteration order are
    /// unchanged.
    ///
    /// # Example
    ///
    /// ```rust
    /// use trellis::graph::Graph;
    ///
    /// let mut graph: Graph<u8> = Graph::unweighted();
    /// graph.create_node("A", Some(1)).unwrap();
    /// graph.create_node("B", Some(2)).unwrap();
    /// graph.create_node("C", None).unwrap();
    /// graph.make_edge("A", "C", None).unwrap();
    /// graph.swap_identity("A", "B").unwrap();
    ///
    /// assert!(graph.has_edge("B", "C"));
    /// assert!(!graph.has_edge("A", "C"));
    /// assert_eq!(graph.payload("B"), Some(&1));
    /// ```
    pub fn swap_identity(&mut self, id1: &str, id2: &str) -> GraphResult<()> {
        let a = self.index_of(id1)?;
        let b = self.index_of(id2)?;
        if a == b {
            return Ok(());
        }

        let id_a = std::mem::take(&mut self.nodes[a.0].id);
        let id_b = std::mem::replace(&mut self.nodes[b.0].id, id_a);
        self.nodes[a.0].id = id_b;

        if let Some(slot) = self.index.get_mut(id1) {
            *slot = b;
        }
        if let Some(slot) = self.index.get_mut(id2) {
            *slot = a;
        }
        Ok(())
    }

    /// Renames a node, keeping its position in iteration order.
    ///
    /// # Errors
    ///
    /// [`GraphError::NodeNotFound`] if `old` is missing, [`GraphError::DuplicateNode`]
    /// if `new` is already taken.
    pub fn rename_node(&mut self, old: &str, new: &str) -> GraphResult<()> {
        if old == new {
            return self.index_of(old).map(|_| ());
        }
        if self.index.contains_key(new) {
            return Err(GraphError::DuplicateNode { id: new.to_string() });
        }
        let (position, _, ix) = self
            .index
            .shift_remove_full(old)
            .ok_or_else(|| GraphError::not_found(old))?;
        self.index.shift_insert(position, new.to_string(), ix);
        self.nodes[ix.0].id = new.to_string();
        Ok(())
    }

    /// Reverses every edge in place by swapping each node's children and parents.
    pub fn transpose(&mut self) {
        for node in &mut self.nodes {
            std::mem::swap(&mut node.children, &mut node.parents);
        }
        tracing::debug!(graph = %self.name, nodes = self.nodes.len(), "transposed");
    }
}

impl<T> Graph<T> {
    /// Builds an unweighted graph from a node list and `(parent, child)` pairs.
    ///
    /// Repeated node ids and repeated edges are ignored.
    ///
    /// # Example
    ///
    /// ```rust
    /// use trellis::graph::Graph;
    ///
    /// let graph: Graph = Graph::from_pairs(&["A", "B"], &[("A", "B"), ("A", "B")]).unwrap();
    /// assert_eq!(graph.edge_count(), 1);
    /// ```
    pub fn from_pairs(nodes: &[&str], edges: &[(&str, &str)]) -> GraphResult<Self> {
        let mut graph = Self::with_capacity("graph", false, nodes.len());
        for id in nodes {
            graph.insert(id);
        }
        for (parent, child) in edges {
            graph.make_edge(parent, child, None)?;
        }
        Ok(graph)
    }

    /// Builds an unweighted graph from a node list and a flat
    /// `[parent, child, parent, child, ...]` edge list.
    ///
    /// # Errors
    ///
    /// [`GraphError::UnpairedEdge`] if the edge list has odd length.
    pub fn from_flat_edges(nodes: &[&str], edges: &[&str]) -> GraphResult<Self> {
        if edges.len() % 2 == 1 {
            return Err(GraphError::UnpairedEdge {
                id: edges[edges.len() - 1].to_string(),
            });
        }
        let pairs: Vec<(&str, &str)> = edges.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect();
        Self::from_pairs(nodes, &pairs)
    }

    /// Builds a weighted graph from a node list and `(parent, child, weight)` triples.
    pub fn from_weighted_edges(nodes: &[&str], edges: &[(&str, &str, f64)]) -> GraphResult<Self> {
        let mut graph = Self::with_capacity("graph", true, nodes.len());
        for id in nodes {
            graph.insert(id);
        }
        for &(parent, child, weight) in edges {
            graph.make_edge(parent, child, Some(weight))?;
        }
        Ok(graph)
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    fn assert_reciprocal<T>(graph: &Graph<T>) {
        for (parent, child, weight) in graph.edges() {
            let back: Vec<_> = graph
                .parents(child)
                .unwrap()
                .filter(|n| n.id == parent)
                .collect();
            assert_eq!(back.len(), 1, "{parent} -> {child} missing its parent half");
            assert_eq!(back[0].weight, weight);
        }
        let parent_halves: usize = graph.ids().map(|id| graph.parents(id).unwrap().count()).sum();
        assert_eq!(parent_halves, graph.edge_count());
    }

    #[test]
    fn test_create_empty_graph() {
        let graph: Graph = Graph::unweighted();
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.is_empty());
        assert!(!graph.is_weighted());
        assert_eq!(graph.name(), "graph");
    }

    #[test]
    fn test_create_node() {
        let mut graph: Graph<u32> = Graph::unweighted();
        let ix = graph.create_node("A", Some(7)).unwrap();

        assert_eq!(graph.id_of(ix), "A");
        assert_eq!(graph.payload("A"), Some(&7));
        assert_eq!(
            graph.create_node("A", None),
            Err(GraphError::DuplicateNode { id: "A".into() })
        );
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_payload_mut() {
        let mut graph: Graph<String> = Graph::unweighted();
        graph.create_node("A", Some("old".into())).unwrap();
        if let Some(payload) = graph.payload_mut("A") {
            payload.push_str("-new");
        }
        assert_eq!(graph.payload("A").map(String::as_str), Some("old-new"));
        assert!(graph.payload_mut("missing").is_none());
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut graph: Graph = Graph::unweighted();
        let first = graph.insert("A");
        let second = graph.insert("A");
        assert_eq!(first, second);
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_make_edge_reciprocal() {
        let graph = example();
        assert_eq!(graph.edge_count(), EDGES.len());
        assert_reciprocal(&graph);

        let weighted = weighted_example();
        assert_reciprocal(&weighted);
        assert_eq!(weighted.edge("D", "C").and_then(|e| e.weight), Some(0.0));
    }

    #[test]
    fn test_make_edge_idempotent() {
        let mut graph: Graph = Graph::from_pairs(&["A", "B"], &[]).unwrap();
        assert!(graph.make_edge("A", "B", None).unwrap());
        assert!(!graph.make_edge("A", "B", None).unwrap());
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.children("A").unwrap().count(), 1);
        assert_eq!(graph.parents("B").unwrap().count(), 1);
    }

    #[test]
    fn test_make_edge_weight_mode() {
        let mut unweighted: Graph = Graph::from_pairs(&["A", "B"], &[]).unwrap();
        let err = unweighted.make_edge("A", "B", Some(1.0)).unwrap_err();
        assert!(matches!(err, GraphError::WeightMode { weighted: false, .. }));

        let mut weighted: Graph = Graph::from_weighted_edges(&["A", "B"], &[]).unwrap();
        let err = weighted.make_edge("A", "B", None).unwrap_err();
        assert!(matches!(err, GraphError::WeightMode { weighted: true, .. }));

        assert_eq!(unweighted.edge_count(), 0);
        assert_eq!(weighted.edge_count(), 0);
    }

    #[test]
    fn test_make_edge_rejects_bad_weights() {
        let mut graph: Graph = Graph::from_weighted_edges(&["A", "B"], &[]).unwrap();
        for weight in [-1.0, f64::NAN, f64::INFINITY] {
            let err = graph.make_edge("A", "B", Some(weight)).unwrap_err();
            assert!(matches!(err, GraphError::InvalidWeight { .. }));
        }
        assert!(graph.make_edge("A", "B", Some(0.0)).unwrap());
    }

    #[test]
    fn test_make_edge_missing_node() {
        let mut graph: Graph = Graph::from_pairs(&["A"], &[]).unwrap();
        assert_eq!(
            graph.make_edge("A", "Z", None),
            Err(GraphError::NodeNotFound { id: "Z".into() })
        );
        assert_eq!(
            graph.make_edge("Z", "A", None),
            Err(GraphError::NodeNotFound { id: "Z".into() })
        );
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.children("A").unwrap().count(), 0);
    }

    #[test]
    fn test_insert_edge_creates_child() {
        let mut graph: Graph = Graph::from_pairs(&["A"], &[]).unwrap();
        assert!(graph.insert_edge("A", "B", None).unwrap());
        assert!(graph.contains("B"));
        assert!(graph.has_edge("A", "B"));
        assert!(graph.insert_edge("Z", "B", None).is_err());
    }

    #[test]
    fn test_remove_edge() {
        let mut graph = example();
        assert!(graph.remove_edge("A", "D"));
        assert!(!graph.has_edge("A", "D"));
        assert!(graph.parents("D").unwrap().all(|n| n.id != "A"));
        assert_eq!(graph.edge_count(), EDGES.len() - 1);
        assert_reciprocal(&graph);

        assert!(!graph.remove_edge("A", "D"));
        assert!(!graph.remove_edge("A", "missing"));
    }

    #[test]
    fn test_remove_node_drops_incident_edges() {
        let mut graph = example();
        let removed = graph.remove_node("A").unwrap();
        assert_eq!(removed.id(), "A");

        assert!(!graph.contains("A"));
        assert_eq!(graph.node_count(), 7);
        // A had A->A, A->D, A->B, A->H, C->A, D->A
        assert_eq!(graph.edge_count(), EDGES.len() - 6);
        assert_reciprocal(&graph);
        for id in graph.ids() {
            assert!(graph.children(id).unwrap().all(|n| n.id != "A"));
        }
        // The node moved into A's slot keeps its edges.
        assert!(graph.has_edge("H", "H"));
        assert!(graph.has_edge("G", "H"));

        assert!(graph.remove_node("A").is_none());
    }

    #[test]
    fn test_remove_node_keeps_id_order() {
        let mut graph = example();
        graph.remove_node("C");
        let ids: Vec<&str> = graph.ids().collect();
        assert_eq!(ids, vec!["A", "B", "D", "E", "F", "G", "H"]);
        for id in ids {
            assert_eq!(graph.id_of(graph.index_of(id).unwrap()), id);
        }
    }

    #[test]
    fn test_swap_identity() {
        let mut graph: Graph<u8> = Graph::unweighted();
        graph.create_node("A", Some(1)).unwrap();
        graph.create_node("B", Some(2)).unwrap();
        graph.create_node("C", None).unwrap();
        graph.make_edge("A", "C", None).unwrap();

        graph.swap_identity("A", "B").unwrap();

        assert!(graph.has_edge("B", "C"));
        assert!(!graph.has_edge("A", "C"));
        assert_eq!(graph.payload("A"), Some(&2));
        assert_eq!(graph.payload("B"), Some(&1));
        assert_eq!(graph.ids().collect::<Vec<_>>(), vec!["A", "B", "C"]);
        assert_eq!(graph.parents("C").unwrap().next().map(|n| n.id), Some("B"));
        assert!(graph.swap_identity("A", "Z").is_err());
    }

    #[test]
    fn test_swap_identity_keeps_payload_with_edges() {
        let mut graph: Graph<u8> = Graph::unweighted();
        graph.create_node("A", Some(0)).unwrap();
        graph.create_node("D", Some(3)).unwrap();
        graph.make_edge("D", "D", None).unwrap();
        graph.make_edge("D", "A", None).unwrap();

        graph.swap_identity("A", "D").unwrap();

        assert!(graph.has_edge("A", "A"));
        assert!(graph.has_edge("A", "D"));
        assert!(!graph.has_edge("D", "A"));
        assert_eq!(graph.payload("A"), Some(&3));
        assert_eq!(graph.payload("D"), Some(&0));
        assert_reciprocal(&graph);

        let removed = graph.remove_node("A").unwrap();
        assert_eq!(removed.into_payload(), Some(3));
        assert_eq!(graph.payload("D"), Some(&0));
        assert_eq!(graph.edge_count(), 0);
        assert_reciprocal(&graph);
    }

    #[test]
    fn test_rename_node() {
        let mut graph = example();
        graph.rename_node("D", "Delta").unwrap();

        assert!(!graph.contains("D"));
        assert!(graph.has_edge("A", "Delta"));
        assert!(graph.has_edge("Delta", "G"));
        assert_eq!(graph.ids().nth(3), Some("Delta"));
        assert_eq!(
            graph.rename_node("Delta", "A"),
            Err(GraphError::DuplicateNode { id: "A".into() })
        );
        assert!(graph.rename_node("missing", "Z").is_err());
    }

    #[test]
    fn test_transpose_round_trip() {
        let mut graph = example();
        let original = adjacency(&graph);

        graph.transpose();
        assert!(graph.has_edge("D", "A"));
        assert!(graph.has_edge("E", "B"));
        assert!(!graph.has_edge("B", "E"));
        assert_eq!(graph.edge_count(), EDGES.len());
        assert_reciprocal(&graph);

        graph.transpose();
        assert_eq!(adjacency(&graph), original);
    }

    #[test]
    fn test_from_flat_edges() {
        let graph: Graph = Graph::from_flat_edges(&["A", "B"], &["A", "B", "B", "A"]).unwrap();
        assert!(graph.has_edge("A", "B"));
        assert!(graph.has_edge("B", "A"));

        let err = Graph::<()>::from_flat_edges(&["A", "B"], &["A", "B", "A"]).unwrap_err();
        assert_eq!(err, GraphError::UnpairedEdge { id: "A".into() });
    }

    #[test]
    fn test_edges_iteration_order() {
        let graph = projects();
        let edges: Vec<(&str, &str)> = graph.edges().map(|(p, c, _)| (p, c)).collect();
        assert_eq!(
            edges,
            vec![("A", "D"), ("B", "C"), ("B", "D"), ("D", "C"), ("F", "A"), ("F", "B")]
        );
    }

    #[test]
    fn test_direction_reversed() {
        assert_eq!(Direction::Outgoing.reversed(), Direction::Incoming);
        assert_eq!(Direction::default(), Direction::Outgoing);
    }
}
