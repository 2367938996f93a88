//! Graph descriptions.
//!
//! This module reads JSON descriptions of graphs (nodes with optional
//! payloads, weighted or unweighted edges) and builds
//! [`Graph`](crate::graph::Graph)s from them. It is how the command line
//! tool gets its input.
//!
//! # Example
//!
//! ```
//! use trellis::spec;
//!
//! let description = spec::parse_str(r#"{
//!     "nodes": ["A", "B", "C"],
//!     "edges": [["A", "B"], {"from": "B", "to": "C"}]
//! }"#).unwrap();
//! spec::validate(&description).unwrap();
//!
//! let graph = description.build().unwrap();
//! assert_eq!(graph.topological_sort().unwrap(), vec!["A", "B", "C"]);
//! ```

pub mod loader;
pub mod types;

pub use loader::{parse_file, parse_str, validate, SpecError, SpecResult};
pub use types::{EdgeSpec, GraphSpec, NodeSpec};
