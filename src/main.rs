use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use trellis::export::{self, ExportData, ExportFormat, Report};
use trellis::graph::{Graph, GraphError};
use trellis::{logging, spec};

#[derive(Parser)]
#[command(name = "trellis")]
#[command(version)]
#[command(about = "Run graph algorithms over a JSON graph description", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log level or filter directive (overrides --verbose)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Input {
    /// Graph description file (JSON)
    file: PathBuf,

    /// Output format: json or text
    #[arg(short, long, default_value = "text")]
    format: ExportFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Depth-first search from one node
    Dfs {
        #[command(flatten)]
        input: Input,

        /// Start node
        #[arg(short, long)]
        start: String,
    },
    /// Breadth-first search, lockstep when several starts are given
    Bfs {
        #[command(flatten)]
        input: Input,

        /// Start node (repeatable)
        #[arg(short, long, required = true)]
        start: Vec<String>,
    },
    /// Topological order, or the cycle preventing one
    Topo {
        #[command(flatten)]
        input: Input,
    },
    /// Strongly connected components
    Scc {
        #[command(flatten)]
        input: Input,
    },
    /// First node reached by searches from every start
    Converge {
        #[command(flatten)]
        input: Input,

        /// Start node (repeatable)
        #[arg(short, long, required = true)]
        start: Vec<String>,
    },
    /// Weighted shortest path between two nodes
    ShortestPath {
        #[command(flatten)]
        input: Input,

        /// Source node
        #[arg(long)]
        from: String,

        /// Target node
        #[arg(long)]
        to: String,
    },
}

impl Commands {
    fn input(&self) -> &Input {
        match self {
            Commands::Dfs { input, .. }
            | Commands::Bfs { input, .. }
            | Commands::Topo { input }
            | Commands::Scc { input }
            | Commands::Converge { input, .. }
            | Commands::ShortestPath { input, .. } => input,
        }
    }
}

fn load(path: &Path) -> Result<Graph<serde_json::Value>> {
    let description = spec::parse_file(path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    let graph = description
        .build()
        .with_context(|| format!("failed to build graph from {}", path.display()))?;
    Ok(graph)
}

fn run(command: &Commands, graph: &Graph<serde_json::Value>) -> Result<Report> {
    let report = match command {
        Commands::Dfs { start, .. } => Report::DepthFirst {
            start: start.clone(),
            order: graph.depth_first_search(start)?,
        },
        Commands::Bfs { start, .. } => {
            let starts: Vec<&str> = start.iter().map(String::as_str).collect();
            Report::BreadthFirst {
                starts: start.clone(),
                orders: graph.multi_source_bfs(&starts)?,
            }
        }
        Commands::Topo { .. } => match graph.try_topological_sort() {
            Ok(order) => Report::Topological { order },
            Err(GraphError::Cycle { path }) => Report::Cycle { path },
            Err(err) => return Err(err.into()),
        },
        Commands::Scc { .. } => Report::Components {
            components: graph.strongly_connected_components(),
        },
        Commands::Converge { start, .. } => {
            let starts: Vec<&str> = start.iter().map(String::as_str).collect();
            Report::Convergence {
                starts: start.clone(),
                convergence: graph.converge(&starts)?,
            }
        }
        Commands::ShortestPath { from, to, .. } => Report::ShortestPath {
            from: from.clone(),
            to: to.clone(),
            path: graph.shortest_path(from, to)?,
        },
    };
    Ok(report)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    let input = cli.command.input();
    let graph = load(&input.file)?;
    tracing::debug!(
        graph = graph.name(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph loaded"
    );

    let report = run(&cli.command, &graph)?;
    let data = ExportData::new(&graph, report);
    export::export(input.format, &data, &mut io::stdout().lock())
        .context("failed to write result")?;
    Ok(())
}
