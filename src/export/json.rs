//! JSON export implementation.
//!
//! Exports algorithm results in JSON format for machine-readable output.

use super::{ExportData, Exporter, Report};
use serde::Serialize;
use std::io::{self, Write};

/// JSON exporter implementation.
pub struct JsonExporter;

/// Graph summary for JSON output.
#[derive(Serialize)]
struct JsonGraph<'a> {
    name: &'a str,
    nodes: usize,
    edges: usize,
    weighted: bool,
}

/// Root JSON export structure.
#[derive(Serialize)]
struct JsonExport<'a> {
    graph: JsonGraph<'a>,
    result: &'a Report,
}

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        let export = JsonExport {
            graph: JsonGraph {
                name: &data.graph_name,
                nodes: data.node_count,
                edges: data.edge_count,
                weighted: data.weighted,
            },
            result: &data.report,
        };

        let json = serde_json::to_string_pretty(&export)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        writeln!(writer, "{}", json)
    }
}
