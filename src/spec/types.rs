//! Serde types for graph descriptions.
//!
//! A description is a small JSON document listing nodes and edges:
//!
//! ```json
//! {
//!   "name": "roads",
//!   "weighted": true,
//!   "nodes": ["A", {"id": "B", "payload": {"city": "Berlin"}}],
//!   "edges": [["A", "B", 2.5], {"from": "B", "to": "A", "weight": 1}]
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A whole graph description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GraphSpec {
    /// Graph name; generated when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Whether every edge carries a weight.
    #[serde(default)]
    pub weighted: bool,

    /// Declared nodes, in insertion order.
    #[serde(default)]
    pub nodes: Vec<NodeSpec>,

    /// Edges, in insertion order.
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

impl GraphSpec {
    /// Returns true if any edge has a weight.
    pub fn has_weights(&self) -> bool {
        self.edges.iter().any(|edge| edge.weight().is_some())
    }

    /// Ids of declared nodes, in order.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(NodeSpec::id)
    }
}

/// A node given either as a bare id or with a payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeSpec {
    /// `"A"`
    Id(String),
    /// `{"id": "A", "payload": ...}`
    Detailed {
        id: String,
        #[serde(default)]
        payload: Option<Value>,
    },
}

impl NodeSpec {
    pub fn id(&self) -> &str {
        match self {
            NodeSpec::Id(id) | NodeSpec::Detailed { id, .. } => id,
        }
    }

    pub fn payload(&self) -> Option<&Value> {
        match self {
            NodeSpec::Id(_) => None,
            NodeSpec::Detailed { payload, .. } => payload.as_ref(),
        }
    }
}

/// An edge as a `[parent, child]` pair, a `[parent, child, weight]` triple
/// or an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EdgeSpec {
    Weighted(String, String, f64),
    Pair(String, String),
    Detailed {
        from: String,
        to: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        weight: Option<f64>,
    },
}

impl EdgeSpec {
    /// The parent id.
    pub fn from(&self) -> &str {
        match self {
            EdgeSpec::Weighted(from, ..) | EdgeSpec::Pair(from, _) => from,
            EdgeSpec::Detailed { from, .. } => from,
        }
    }

    /// The child id.
    pub fn to(&self) -> &str {
        match self {
            EdgeSpec::Weighted(_, to, _) | EdgeSpec::Pair(_, to) => to,
            EdgeSpec::Detailed { to, .. } => to,
        }
    }

    pub fn weight(&self) -> Option<f64> {
        match self {
            EdgeSpec::Weighted(_, _, weight) => Some(*weight),
            EdgeSpec::Pair(..) => None,
            EdgeSpec::Detailed { weight, .. } => *weight,
        }
    }
}
