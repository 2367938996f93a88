//! Plain text export implementation.
//!
//! Exports algorithm results as short human-readable lines.

use super::{ExportData, Exporter, Report};
use std::io::{self, Write};

/// Text exporter implementation.
pub struct TextExporter;

fn chain(ids: &[String]) -> String {
    ids.join(" -> ")
}

fn group(ids: &[String]) -> String {
    format!("{{{}}}", ids.join(", "))
}

impl Exporter for TextExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        match &data.report {
            Report::DepthFirst { start, order } => {
                writeln!(writer, "dfs from {}: {}", start, chain(order))?;
            }
            Report::BreadthFirst { starts, orders } => {
                for (start, order) in starts.iter().zip(orders) {
                    writeln!(writer, "bfs from {}: {}", start, chain(order))?;
                }
            }
            Report::Topological { order } => {
                writeln!(writer, "topological order: {}", order.join(", "))?;
            }
            Report::Cycle { path } => {
                writeln!(writer, "no topological order, cycle: {}", chain(path))?;
            }
            Report::Components { components } => {
                writeln!(writer, "{} strongly connected components", components.len())?;
                for component in components {
                    writeln!(writer, "  {}", group(component))?;
                }
            }
            Report::Convergence { starts, convergence } => match convergence {
                Some(meet) => {
                    writeln!(writer, "met at {} in round {}", meet.meeting, meet.round)?;
                    for path in &meet.paths {
                        writeln!(writer, "  {}", chain(path))?;
                    }
                }
                None => writeln!(writer, "no meeting point for {}", group(starts))?,
            },
            Report::ShortestPath { from, to, path } => match path {
                Some(path) => writeln!(writer, "{} (weight {})", chain(&path.nodes), path.weight)?,
                None => writeln!(writer, "{} is unreachable from {}", to, from)?,
            },
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::fixtures;

    fn render(report: Report) -> String {
        let data = ExportData::new(&fixtures::example(), report);
        let mut output = Vec::new();
        TextExporter.export(&data, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_text_export_depth_first() {
        let text = render(Report::DepthFirst {
            start: "A".into(),
            order: fixtures::example().depth_first_search("A").unwrap(),
        });
        assert_eq!(text, "dfs from A: A -> D -> B -> E -> G -> H\n");
    }

    #[test]
    fn test_text_export_components() {
        let text = render(Report::Components {
            components: vec![vec!["D".into(), "A".into()], vec!["E".into()]],
        });
        assert_eq!(text, "2 strongly connected components\n  {D, A}\n  {E}\n");
    }

    #[test]
    fn test_text_export_convergence() {
        let graph = fixtures::example();
        let text = render(Report::Convergence {
            starts: vec!["A".into(), "E".into()],
            convergence: graph.converge(&["A", "E"]).unwrap(),
        });
        assert_eq!(text, "met at E in round 2\n  A -> D -> E\n  E\n");
    }

    #[test]
    fn test_text_export_unreachable_and_cycle() {
        let text = render(Report::ShortestPath {
            from: "H".into(),
            to: "A".into(),
            path: None,
        });
        assert_eq!(text, "A is unreachable from H\n");

        let text = render(Report::Cycle {
            path: vec!["A".into()],
        });
        assert_eq!(text, "no topological order, cycle: A\n");
    }

    #[test]
    fn test_text_export_shortest_path() {
        let graph = fixtures::weighted_example();
        let text = render(Report::ShortestPath {
            from: "A".into(),
            to: "H".into(),
            path: graph.shortest_path("A", "H").unwrap(),
        });
        assert_eq!(text, "A -> D -> C -> G -> H (weight 7)\n");
    }
}
