//! Build command - lower one network and query into a graph

use anyhow::{Context, Result};
use mplsg_core::{build_graph, BuildConfig, Network, Query};
use std::path::Path;

use crate::output::{render_graph, OutputFormat};

/// Run the build command
pub fn run(
    network: &Path,
    query: &str,
    k: u32,
    output: Option<&Path>,
    format: OutputFormat,
    config: &BuildConfig,
) -> Result<()> {
    let net = Network::load(network)
        .with_context(|| format!("Failed to load network from {}", network.display()))?;
    let query = Query::parse(query).context("Failed to parse query")?;
    let graph = build_graph(&net, &query, k, config).context("Failed to build graph")?;

    tracing::info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph built"
    );

    let rendered = render_graph(&graph, format)?;
    match output {
        Some(path) => std::fs::write(path, rendered + "\n")
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{}", rendered),
    }
    Ok(())
}
