//! Loading graph descriptions from JSON.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde_json::Value;

use super::types::GraphSpec;
use crate::graph::{Graph, GraphError, IdGenerator};

/// Errors that can occur while loading a graph description.
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    /// Failed to read the file from disk.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse JSON content.
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The described graph could not be built.
    #[error("Invalid graph: {0}")]
    Graph(#[from] GraphError),

    /// The description is inconsistent.
    #[error("Invalid graph description: {0}")]
    Invalid(String),
}

/// Result type alias for description loading.
pub type SpecResult<T> = Result<T, SpecError>;

/// Parses a graph description file.
///
/// # Arguments
///
/// * `path` - Path to the JSON file
pub fn parse_file(path: &Path) -> SpecResult<GraphSpec> {
    let content = fs::read_to_string(path)?;
    parse_str(&content)
}

/// Parses a graph description from a string.
///
/// # Example
///
/// ```
/// use trellis::spec::parse_str;
///
/// let spec = parse_str(r#"{"nodes": ["A", "B"], "edges": [["A", "B"]]}"#).unwrap();
/// assert_eq!(spec.nodes.len(), 2);
/// assert!(!spec.weighted);
/// ```
pub fn parse_str(content: &str) -> SpecResult<GraphSpec> {
    let spec: GraphSpec = serde_json::from_str(content)?;
    Ok(spec)
}

/// Checks a description for problems that would otherwise surface halfway
/// through building it.
///
/// Rejects duplicate node ids and edges whose weight presence does not
/// match `weighted`.
pub fn validate(spec: &GraphSpec) -> SpecResult<()> {
    let mut seen = HashSet::new();
    for id in spec.node_ids() {
        if !seen.insert(id) {
            return Err(SpecError::Invalid(format!("node {id} is declared twice")));
        }
    }
    for edge in &spec.edges {
        if edge.weight().is_some() != spec.weighted {
            let expected = if spec.weighted { "needs" } else { "must not have" };
            return Err(SpecError::Invalid(format!(
                "edge {} -> {} {expected} a weight",
                edge.from(),
                edge.to()
            )));
        }
    }
    Ok(())
}

impl GraphSpec {
    /// Validates the description and builds the graph it describes.
    ///
    /// Edge endpoints that are not declared as nodes are created without a
    /// payload. An unnamed graph is named by a fresh [`IdGenerator`].
    ///
    /// # Example
    ///
    /// ```
    /// use trellis::spec::parse_str;
    ///
    /// let spec = parse_str(r#"{
    ///     "weighted": true,
    ///     "nodes": [{"id": "A", "payload": 1}, "B"],
    ///     "edges": [["A", "B", 3]]
    /// }"#).unwrap();
    /// let graph = spec.build().unwrap();
    /// assert_eq!(graph.edge_weight("A", "B"), Some(3.0));
    /// assert_eq!(graph.payload("A"), Some(&serde_json::json!(1)));
    /// ```
    pub fn build(&self) -> SpecResult<Graph<Value>> {
        self.build_with(&mut IdGenerator::default())
    }

    /// Like [`build`](Self::build), naming an unnamed graph from `ids`.
    pub fn build_with(&self, ids: &mut IdGenerator) -> SpecResult<Graph<Value>> {
        validate(self)?;
        let name = match &self.name {
            Some(name) => name.clone(),
            None => ids.next_id(),
        };
        let mut graph = Graph::with_capacity(name, self.weighted, self.nodes.len());
        for node in &self.nodes {
            graph.create_node(node.id(), node.payload().cloned())?;
        }
        for edge in &self.edges {
            graph.insert(edge.from());
            graph.insert_edge(edge.from(), edge.to(), edge.weight())?;
        }
        tracing::debug!(
            graph = graph.name(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built graph from description"
        );
        Ok(graph)
    }
}
