//! Export functionality for algorithm results.
//!
//! This module provides exporters for printing the result of one algorithm
//! run in various formats: JSON and plain text.

pub mod json;
pub mod text;

use serde::Serialize;
use std::io::{self, Write};

use crate::algorithms::Convergence;
use crate::graph::Graph;
use crate::shortest_path::WeightedPath;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// JSON format - machine-readable, full data
    Json,
    /// Text format - one short line per result
    #[default]
    Text,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "text" | "txt" => Ok(ExportFormat::Text),
            _ => Err(format!(
                "Unknown export format: '{}'. Valid formats: json, text",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Text => write!(f, "text"),
        }
    }
}

/// The outcome of one algorithm run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum Report {
    /// Depth-first visit order.
    DepthFirst { start: String, order: Vec<String> },
    /// Lockstep breadth-first visit orders, one per start.
    BreadthFirst {
        starts: Vec<String>,
        orders: Vec<Vec<String>>,
    },
    /// A topological order.
    Topological { order: Vec<String> },
    /// The cycle that prevented a topological order.
    Cycle { path: Vec<String> },
    /// Strongly connected components.
    Components { components: Vec<Vec<String>> },
    /// Where lockstep searches from `starts` met, if they did.
    Convergence {
        starts: Vec<String>,
        convergence: Option<Convergence>,
    },
    /// Shortest path between two nodes, if one exists.
    ShortestPath {
        from: String,
        to: String,
        path: Option<WeightedPath>,
    },
}

/// Data container for export operations.
///
/// Holds the report together with a summary of the graph it was computed on.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportData {
    /// Graph name
    pub graph_name: String,
    /// Number of nodes
    pub node_count: usize,
    /// Number of edges
    pub edge_count: usize,
    /// Whether the graph is weighted
    pub weighted: bool,
    /// The algorithm result
    pub report: Report,
}

impl ExportData {
    /// Create new export data for a result computed on `graph`.
    pub fn new<T>(graph: &Graph<T>, report: Report) -> Self {
        Self {
            graph_name: graph.name().to_string(),
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            weighted: graph.is_weighted(),
            report,
        }
    }
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the data to the given writer.
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()>;
}

/// Export data in the specified format.
pub fn export<W: Write>(
    format: ExportFormat,
    data: &ExportData,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        ExportFormat::Json => json::JsonExporter.export(data, writer),
        ExportFormat::Text => text::TextExporter.export(data, writer),
    }
}

/// Export data to a string.
pub fn export_to_string(format: ExportFormat, data: &ExportData) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(format, data, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
