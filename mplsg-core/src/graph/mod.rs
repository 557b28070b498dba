//! Typed graph produced by the lowering pass.
//!
//! The graph is undirected and simple: a pair of nodes shares at most one
//! edge. Edges carry no payload; all semantics live in node types and in the
//! shape of the graph.
//!
//! # Architecture
//!
//! ```text
//! Network + Query -> GraphBuilder (arena + key map) -> MplsGraph (immutable)
//! ```

mod builder;
mod node;

pub use builder::GraphBuilder;
pub use node::{Node, NodeKey, NodeType};

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Immutable graph handed to the verifier or a feature encoder.
#[derive(Debug, Clone)]
pub struct MplsGraph {
    graph: UnGraph<Node, ()>,
    index: HashMap<NodeKey, NodeIndex>,
}

impl MplsGraph {
    pub(crate) fn new(graph: UnGraph<Node, ()>, index: HashMap<NodeKey, NodeIndex>) -> Self {
        Self { graph, index }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Node payload at `idx`.
    ///
    /// Panics if `idx` does not belong to this graph.
    pub fn node(&self, idx: NodeIndex) -> &Node {
        &self.graph[idx]
    }

    /// Index of the node registered under `key`.
    pub fn find(&self, key: &NodeKey) -> Option<NodeIndex> {
        self.index.get(key).copied()
    }

    pub fn has_edge(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.graph.find_edge(a, b).is_some()
    }

    pub fn neighbors(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.graph.neighbors(idx).collect()
    }

    /// Indices of every node tagged `ntype`, in insertion order.
    pub fn nodes_of_type(&self, ntype: NodeType) -> Vec<NodeIndex> {
        self.graph
            .node_indices()
            .filter(|&idx| self.graph[idx].ntype == ntype)
            .collect()
    }

    /// The query root, if the graph was built from a query.
    pub fn query_node(&self) -> Option<NodeIndex> {
        self.find(&NodeKey::Query)
    }

    /// Failure budget carried by the query root.
    pub fn k(&self) -> Option<u32> {
        self.query_node().and_then(|idx| self.graph[idx].k)
    }

    /// Number of nodes per type; types with no nodes are omitted.
    pub fn type_counts(&self) -> BTreeMap<NodeType, usize> {
        let mut counts = BTreeMap::new();
        for node in self.graph.node_weights() {
            *counts.entry(node.ntype).or_insert(0) += 1;
        }
        counts
    }

    /// Display labels of both ends of every edge, in insertion order.
    pub fn edges(&self) -> Vec<(&str, &str)> {
        self.graph
            .edge_references()
            .map(|e| {
                (
                    self.graph[e.source()].nlabel.as_str(),
                    self.graph[e.target()].nlabel.as_str(),
                )
            })
            .collect()
    }

    /// Serializable node/edge listing.
    pub fn to_export(&self) -> GraphExport {
        let nodes = self
            .graph
            .node_indices()
            .map(|idx| {
                let node = &self.graph[idx];
                ExportNode {
                    id: idx.index(),
                    ntype: node.ntype,
                    code: node.ntype.code(),
                    nlabel: node.nlabel.clone(),
                    k: node.k,
                }
            })
            .collect();
        let edges = self
            .graph
            .edge_references()
            .map(|e| (e.source().index(), e.target().index()))
            .collect();
        GraphExport { nodes, edges }
    }

    /// Underlying petgraph graph, for algorithms this type does not wrap.
    pub fn inner(&self) -> &UnGraph<Node, ()> {
        &self.graph
    }
}

/// Flat export format: nodes with dense ids and undirected edge pairs.
#[derive(Debug, Clone, Serialize)]
pub struct GraphExport {
    pub nodes: Vec<ExportNode>,
    pub edges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportNode {
    pub id: usize,
    pub ntype: NodeType,
    pub code: u8,
    pub nlabel: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub k: Option<u32>,
}
