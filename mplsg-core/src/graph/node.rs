//! Node types and node identity keys.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::Label;
use crate::query::PatternPart;

/// Closed set of node type tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeType {
    Router,
    Interface,
    Label,
    Rule,
    PushAction,
    SwapAction,
    PopAction,
    Query,
    QueryAtom,
    Any,
    OneOrMore,
    ZeroOrMore,
}

impl NodeType {
    /// All node types, ordered by [`NodeType::code`].
    pub const ALL: [NodeType; 12] = [
        NodeType::Router,
        NodeType::Interface,
        NodeType::Label,
        NodeType::Rule,
        NodeType::PushAction,
        NodeType::SwapAction,
        NodeType::PopAction,
        NodeType::Query,
        NodeType::QueryAtom,
        NodeType::Any,
        NodeType::OneOrMore,
        NodeType::ZeroOrMore,
    ];

    /// Stable 1-based numeric code, used by feature encoders downstream.
    pub fn code(self) -> u8 {
        self as u8 + 1
    }

    pub fn name(self) -> &'static str {
        match self {
            NodeType::Router => "Router",
            NodeType::Interface => "Interface",
            NodeType::Label => "Label",
            NodeType::Rule => "Rule",
            NodeType::PushAction => "PushAction",
            NodeType::SwapAction => "SwapAction",
            NodeType::PopAction => "PopAction",
            NodeType::Query => "Query",
            NodeType::QueryAtom => "QueryAtom",
            NodeType::Any => "Any",
            NodeType::OneOrMore => "OneOrMore",
            NodeType::ZeroOrMore => "ZeroOrMore",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Node payload: type tag and display label.
///
/// `nlabel` is informational; identity lives in [`NodeKey`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub ntype: NodeType,
    pub nlabel: String,
    /// Failure budget, set on the query node only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k: Option<u32>,
}

impl Node {
    pub fn new(ntype: NodeType, nlabel: impl Into<String>) -> Self {
        Self {
            ntype,
            nlabel: nlabel.into(),
            k: None,
        }
    }

    pub fn query(k: u32) -> Self {
        Self {
            ntype: NodeType::Query,
            nlabel: "query".to_string(),
            k: Some(k),
        }
    }
}

/// Identity of a graph node.
///
/// Domain objects are addressed by their position in the model or query,
/// labels by value. Keys are only meaningful within a single build.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKey {
    Router(usize),
    Interface { router: usize, iface: usize },
    Label(Label),
    /// The "no label" sentinel of rules that match unlabelled traffic.
    NoLabel,
    /// Stand-in for an absent constructing/destructing pattern.
    EmptyLabel,
    Rule { table: usize, destination: usize },
    Action {
        table: usize,
        destination: usize,
        index: usize,
    },
    Query,
    Atom { part: PatternPart, position: usize },
    /// Router named in the query but missing from the topology.
    UnknownRouter(String),
}
