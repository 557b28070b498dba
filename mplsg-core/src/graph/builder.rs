//! Node identity registry over a growing graph.

use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::HashMap;

use super::node::{Node, NodeKey, NodeType};
use super::MplsGraph;
use crate::error::{BuildError, Result};
use crate::model::Label;

/// Mutable graph under construction.
///
/// Only additive operations exist. Each build owns its own builder; keys are
/// positions in one network and one query and mean nothing across builds.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: UnGraph<Node, ()>,
    index: HashMap<NodeKey, NodeIndex>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the node registered under `key`, creating it if absent.
    ///
    /// An existing node keeps its original attributes.
    pub fn ensure_node(
        &mut self,
        key: NodeKey,
        ntype: NodeType,
        nlabel: impl Into<String>,
    ) -> NodeIndex {
        self.insert_node(key, Node::new(ntype, nlabel))
    }

    /// Like [`ensure_node`](Self::ensure_node) with a prepared payload.
    pub fn insert_node(&mut self, key: NodeKey, node: Node) -> NodeIndex {
        if let Some(&idx) = self.index.get(&key) {
            return idx;
        }
        let idx = self.graph.add_node(node);
        self.index.insert(key, idx);
        idx
    }

    /// Add an undirected edge unless one already joins `a` and `b`.
    pub fn ensure_edge(&mut self, a: NodeIndex, b: NodeIndex) {
        if self.graph.find_edge(a, b).is_none() {
            self.graph.add_edge(a, b, ());
        }
    }

    /// Register the Label node for `label`.
    pub fn ensure_label(&mut self, label: &Label) -> NodeIndex {
        self.ensure_node(
            NodeKey::Label(label.clone()),
            NodeType::Label,
            format!("label:{}", label),
        )
    }

    /// Look up a registered Label node.
    ///
    /// Labels must be registered before any edge refers to them.
    pub fn label(&self, label: &Label) -> Result<NodeIndex> {
        self.lookup(&NodeKey::Label(label.clone()))
            .ok_or_else(|| BuildError::UnregisteredLabel {
                label: label.to_string(),
            })
    }

    pub fn lookup(&self, key: &NodeKey) -> Option<NodeIndex> {
        self.index.get(key).copied()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Freeze the builder into an immutable graph.
    pub fn finish(self) -> MplsGraph {
        MplsGraph::new(self.graph, self.index)
    }
}
