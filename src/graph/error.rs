//! Errors raised by graph construction, mutation and shape validation.

/// Errors that can occur while building, mutating or validating a graph.
///
/// Structural errors are returned before any mutation happens, so a failed
/// call always leaves the graph exactly as it was.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// An operation referenced an id that is not in the graph.
    #[error("node not found: {id}")]
    NodeNotFound { id: String },

    /// A node with this id already exists.
    #[error("node already exists: {id}")]
    DuplicateNode { id: String },

    /// Edge weight presence does not match the graph's weight mode.
    #[error(
        "edge {parent} -> {child} does not match the graph's weight mode (weighted = {weighted})"
    )]
    WeightMode {
        parent: String,
        child: String,
        weighted: bool,
    },

    /// Edge weights must be finite and non-negative.
    #[error("invalid weight {weight} for edge {parent} -> {child}")]
    InvalidWeight {
        parent: String,
        child: String,
        weight: f64,
    },

    /// A flat edge list had an odd number of entries.
    #[error("edge list ends with an unpaired id: {id}")]
    UnpairedEdge { id: String },

    /// The graph contains a cycle where an acyclic graph was required.
    ///
    /// `path` lists the cycle in edge order; the last node links back to the first.
    #[error("graph contains a cycle: {}", path.join(" -> "))]
    Cycle { path: Vec<String> },

    /// Not every node is reachable from the root.
    #[error("graph is disconnected: {reached} of {total} nodes reachable from the root")]
    Disconnected { reached: usize, total: usize },

    /// A tree node was given a second parent.
    #[error("node {child} already has parent {parent}")]
    MultipleParents { child: String, parent: String },

    /// A node has more children than the shape allows.
    #[error("node {id} has more than {limit} children")]
    TooManyChildren { id: String, limit: usize },

    /// Only leaves can be removed from a tree.
    #[error("node {id} still has children")]
    HasChildren { id: String },
}

impl GraphError {
    pub(crate) fn not_found(id: impl Into<String>) -> Self {
        Self::NodeNotFound { id: id.into() }
    }
}

/// Result type alias for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
