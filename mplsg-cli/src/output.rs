//! Output formatting for graphs and batch results.
//!
//! Formats: `edges` (one `nlabel -- nlabel` line per edge), `json` (the flat
//! node/edge export) and `stats` (per-type node counts as a table).

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use mplsg_core::batch::JobOutcome;
use mplsg_core::MplsGraph;
use std::str::FromStr;
use tabled::{builder::Builder, settings::Style};

/// Output format for CLI results
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// One line per edge (default)
    #[default]
    Edges,
    /// JSON for machine consumption
    Json,
    /// Node counts per type
    Stats,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "edges" => Ok(OutputFormat::Edges),
            "json" => Ok(OutputFormat::Json),
            "stats" => Ok(OutputFormat::Stats),
            _ => Err(format!("Unknown output format: '{}'", s)),
        }
    }
}

/// Render a graph in the requested format.
pub fn render_graph(graph: &MplsGraph, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Edges => render_edges(graph),
        OutputFormat::Json => serde_json::to_string_pretty(&graph.to_export())?,
        OutputFormat::Stats => render_stats(graph),
    })
}

fn render_edges(graph: &MplsGraph) -> String {
    graph
        .edges()
        .into_iter()
        .map(|(a, b)| format!("{} {} {}", a.cyan(), "--".dimmed(), b.cyan()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_stats(graph: &MplsGraph) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Type", "Code", "Count"]);
    for (ntype, count) in graph.type_counts() {
        builder.push_record([
            ntype.name().to_string(),
            ntype.code().to_string(),
            count.to_string(),
        ]);
    }
    let mut table = builder.build();
    table.with(Style::rounded());

    let k = graph
        .k()
        .map(|k| k.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{}\n{} nodes, {} edges, k = {}",
        table,
        graph.node_count(),
        graph.edge_count(),
        k
    )
}

/// Render batch outcomes: JSON array for `json`, a table otherwise.
pub fn render_outcomes(outcomes: &[JobOutcome], format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(outcomes)?);
    }

    let mut builder = Builder::default();
    builder.push_record(["Job", "Status", "Nodes", "Edges", "Error"]);
    for outcome in outcomes {
        let row = match outcome {
            JobOutcome::Built { name, nodes, edges } => [
                name.clone(),
                "built".green().to_string(),
                nodes.to_string(),
                edges.to_string(),
                String::new(),
            ],
            JobOutcome::Failed { name, error } => [
                name.clone(),
                "failed".red().to_string(),
                String::new(),
                String::new(),
                error.clone(),
            ],
        };
        builder.push_record(row);
    }
    let mut table = builder.build();
    table.with(Style::rounded());

    let built = outcomes.iter().filter(|o| o.is_built()).count();
    Ok(format!(
        "{}\n{} built, {} failed",
        table,
        built,
        outcomes.len() - built
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mplsg_core::{build_graph, BuildConfig, Network, Query};

    fn sample_graph() -> MplsGraph {
        let network = Network::from_json(
            r#"{ "topology": { "routers": [{ "name": "R1", "interfaces": [{ "name": "i0" }] }] } }"#,
        )
        .unwrap();
        let query = Query::parse("<> R1 <>").unwrap();
        build_graph(&network, &query, 1, &BuildConfig::default()).unwrap()
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("stats".parse::<OutputFormat>(), Ok(OutputFormat::Stats));
        assert!("table".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_render_edges() {
        colored::control::set_override(false);
        let out = render_graph(&sample_graph(), OutputFormat::Edges).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "router:R1 -- intf:R1:i0");
        assert!(lines.contains(&"query -- label:empty"));
        assert!(lines.contains(&"atom:router:R1 -- router:R1"));
    }

    #[test]
    fn test_render_json() {
        let out = render_graph(&sample_graph(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(value["nodes"].as_array().unwrap().len() >= 5);
    }

    #[test]
    fn test_render_stats() {
        let out = render_graph(&sample_graph(), OutputFormat::Stats).unwrap();
        assert!(out.contains("QueryAtom"));
        assert!(out.contains("k = 1"));
    }

    #[test]
    fn test_render_outcomes() {
        colored::control::set_override(false);
        let outcomes = vec![
            JobOutcome::Built {
                name: "a".to_string(),
                nodes: 4,
                edges: 3,
            },
            JobOutcome::Failed {
                name: "b".to_string(),
                error: "boom".to_string(),
            },
        ];
        let table = render_outcomes(&outcomes, OutputFormat::Edges).unwrap();
        assert!(table.contains("boom"));
        assert!(table.ends_with("1 built, 1 failed"));

        let json = render_outcomes(&outcomes, OutputFormat::Json).unwrap();
        assert!(json.contains("\"status\": \"failed\""));
    }
}
