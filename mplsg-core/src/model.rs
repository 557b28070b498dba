//! Network model: topology, links and MPLS routing tables.
//!
//! These types are the in-memory shape the graph builder consumes. They decode
//! from JSON so a model can be produced by any external reader:
//!
//! ```json
//! {
//!   "topology": {
//!     "routers": [{ "name": "R1", "interfaces": [{ "name": "i0" }] }],
//!     "links": [{ "from": { "router": "R1", "interface": "i0" },
//!                 "to":   { "router": "R2", "interface": "i0" } }]
//!   },
//!   "routing": {
//!     "tables": [{
//!       "router": "R1",
//!       "destinations": [{ "te_groups": [{ "rules": [{
//!         "from": "i0", "label": "L1",
//!         "actions": [{ "op": "swap", "label": "L2" }],
//!         "to": "i1"
//!       }]}]}]
//!     }]
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use crate::error::ModelError;

/// An MPLS label value.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Label {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Router {
    pub name: String,
    #[serde(default)]
    pub interfaces: Vec<Interface>,
}

impl Router {
    /// Position of the interface called `name`, if the router owns one.
    pub fn interface_index(&self, name: &str) -> Option<usize> {
        self.interfaces.iter().position(|iface| iface.name == name)
    }
}

/// One end of a link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub router: String,
    pub interface: String,
}

/// A physical link. Direction is irrelevant to the graph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub from: Endpoint,
    pub to: Endpoint,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    pub routers: Vec<Router>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Topology {
    /// Position of the router called `name`.
    pub fn router_index(&self, name: &str) -> Option<usize> {
        self.routers.iter().position(|r| r.name == name)
    }
}

/// A label-stack operation performed by a rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "label", rename_all = "lowercase")]
pub enum Action {
    Push(Label),
    Swap(Label),
    Pop,
}

impl Action {
    /// The label the action manipulates. Pop carries none.
    pub fn label(&self) -> Option<&Label> {
        match self {
            Action::Push(label) | Action::Swap(label) => Some(label),
            Action::Pop => None,
        }
    }
}

/// A forwarding rule: `(from, label)` is matched, `actions` run in order, and
/// the packet leaves through `to`.
///
/// A missing `label` is the "no label" sentinel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub from: String,
    #[serde(default)]
    pub label: Option<Label>,
    #[serde(default)]
    pub actions: Vec<Action>,
    pub to: String,
}

/// Traffic-engineering group: rules in priority order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeGroup {
    #[serde(default)]
    pub rules: Vec<Rule>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    #[serde(default)]
    pub te_groups: Vec<TeGroup>,
}

impl Destination {
    /// First rule of the first traffic-engineering group.
    ///
    /// Backup groups and lower-priority rules are not part of the graph.
    pub fn primary_rule(&self) -> Option<&Rule> {
        self.te_groups.first().and_then(|group| group.rules.first())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingTable {
    pub router: String,
    #[serde(default)]
    pub destinations: Vec<Destination>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Routing {
    #[serde(default)]
    pub tables: Vec<RoutingTable>,
}

impl Routing {
    /// Every distinct label matched or written by any rule, in sorted order.
    ///
    /// All rules are scanned, including the ones the graph never encodes.
    pub fn collect_labels(&self) -> BTreeSet<Label> {
        let mut labels = BTreeSet::new();
        let rules = self
            .tables
            .iter()
            .flat_map(|t| &t.destinations)
            .flat_map(|d| &d.te_groups)
            .flat_map(|g| &g.rules);

        for rule in rules {
            if let Some(label) = &rule.label {
                labels.insert(label.clone());
            }
            labels.extend(rule.actions.iter().filter_map(Action::label).cloned());
        }
        labels
    }
}

/// Topology plus routing configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    pub topology: Topology,
    #[serde(default)]
    pub routing: Routing,
}

impl Network {
    /// Decode a network from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and decode a JSON network file.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "topology": {
            "routers": [
                { "name": "R1", "interfaces": [{ "name": "i0" }, { "name": "i1" }] },
                { "name": "R2", "interfaces": [{ "name": "i0" }] }
            ],
            "links": [
                { "from": { "router": "R1", "interface": "i1" },
                  "to": { "router": "R2", "interface": "i0" } }
            ]
        },
        "routing": {
            "tables": [{
                "router": "R1",
                "destinations": [
                    { "te_groups": [
                        { "rules": [
                            { "from": "i0", "label": "L1",
                              "actions": [{ "op": "swap", "label": "L2" }, { "op": "pop" }],
                              "to": "i1" },
                            { "from": "i0", "label": "L1",
                              "actions": [{ "op": "push", "label": "L9" }],
                              "to": "i1" }
                        ]}
                    ]},
                    { "te_groups": [] }
                ]
            }]
        }
    }"#;

    #[test]
    fn test_decode_network() {
        let net = Network::from_json(SAMPLE).unwrap();
        assert_eq!(net.topology.routers.len(), 2);
        assert_eq!(net.topology.links.len(), 1);
        assert_eq!(net.topology.router_index("R2"), Some(1));
        assert_eq!(net.topology.routers[0].interface_index("i1"), Some(1));
        assert_eq!(net.topology.router_index("R9"), None);

        let rule = net.routing.tables[0].destinations[0].primary_rule().unwrap();
        assert_eq!(rule.label, Some(Label::new("L1")));
        assert_eq!(
            rule.actions,
            vec![Action::Swap(Label::new("L2")), Action::Pop]
        );
    }

    #[test]
    fn test_primary_rule_missing() {
        let net = Network::from_json(SAMPLE).unwrap();
        assert!(net.routing.tables[0].destinations[1].primary_rule().is_none());
    }

    #[test]
    fn test_collect_labels_includes_backup_rules() {
        let net = Network::from_json(SAMPLE).unwrap();
        let labels: Vec<_> = net
            .routing
            .collect_labels()
            .into_iter()
            .map(|l| l.name().to_string())
            .collect();
        assert_eq!(labels, vec!["L1", "L2", "L9"]);
    }

    #[test]
    fn test_unknown_action_rejected() {
        let json = r#"{ "from": "i0", "actions": [{ "op": "rewrite", "label": "L1" }], "to": "i1" }"#;
        let err = serde_json::from_str::<Rule>(json).unwrap_err();
        assert!(err.to_string().contains("rewrite"));
    }

    #[test]
    fn test_rule_without_label_is_sentinel() {
        let json = r#"{ "from": "i0", "to": "i1" }"#;
        let rule: Rule = serde_json::from_str(json).unwrap();
        assert!(rule.label.is_none());
        assert!(rule.actions.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Network::load(Path::new("/nonexistent/net.json")).unwrap_err();
        assert!(matches!(err, ModelError::Io(_)));
    }
}
