//! Lowering of a network and a query into one typed graph.
//!
//! Encoders run in a fixed order over a single [`GraphBuilder`]:
//!
//! 1. topology: routers, interfaces, links
//! 2. labels: "no label" sentinel plus every routing label
//! 3. forwarding: primary rules and their action chains
//! 4. query-only labels
//! 5. the query root carrying `k`
//! 6. constructing pattern, router path, destructing pattern

pub mod forwarding;
pub mod path;
pub mod pattern;
pub mod topology;

use petgraph::graph::NodeIndex;
use tracing::debug;

use crate::config::BuildConfig;
use crate::error::Result;
use crate::graph::{GraphBuilder, MplsGraph, Node, NodeKey};
use crate::model::{Label, Network};
use crate::query::{PatternPart, Query};

/// Where a chain ends: one node, or the arms of a branch not yet merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Terminal {
    Single(NodeIndex),
    Branch(Vec<NodeIndex>),
}

impl Terminal {
    pub fn nodes(&self) -> &[NodeIndex] {
        match self {
            Terminal::Single(idx) => std::slice::from_ref(idx),
            Terminal::Branch(arms) => arms,
        }
    }
}

/// Join every node of `from` to `to`.
fn connect(builder: &mut GraphBuilder, from: &Terminal, to: NodeIndex) {
    for &node in from.nodes() {
        builder.ensure_edge(node, to);
    }
}

/// Build the graph for one (network, query, k) triple.
///
/// Construction either succeeds completely or fails with the first error;
/// there is no partial graph.
pub fn build_graph(
    network: &Network,
    query: &Query,
    k: u32,
    config: &BuildConfig,
) -> Result<MplsGraph> {
    let mut builder = GraphBuilder::new();

    topology::encode(&mut builder, &network.topology)?;
    forwarding::register_labels(&mut builder, &network.routing);
    forwarding::encode(&mut builder, network, config)?;

    let query_labels = [&query.constructing, &query.destructing]
        .into_iter()
        .flatten()
        .flat_map(|p| p.symbols());
    for name in query_labels {
        builder.ensure_label(&Label::new(name));
    }

    let root = builder.insert_node(NodeKey::Query, Node::query(k));
    let after_constructing = pattern::encode(
        &mut builder,
        PatternPart::Constructing,
        Terminal::Single(root),
        query.constructing.as_ref(),
    )?;
    let after_path = path::encode(
        &mut builder,
        &network.topology,
        &query.network,
        after_constructing,
        config,
    )?;
    pattern::encode(
        &mut builder,
        PatternPart::Destructing,
        after_path,
        query.destructing.as_ref(),
    )?;

    debug!(
        nodes = builder.node_count(),
        edges = builder.edge_count(),
        k,
        "graph built"
    );
    Ok(builder.finish())
}
