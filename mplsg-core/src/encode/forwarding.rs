//! Labels and forwarding rules with their action chains.

use tracing::{debug, warn};

use super::topology::interface_node;
use crate::config::BuildConfig;
use crate::error::{BuildError, Result};
use crate::graph::{GraphBuilder, NodeKey, NodeType};
use crate::model::{Action, Network, Routing};

/// Register the "no label" sentinel and every label the routing uses.
pub fn register_labels(builder: &mut GraphBuilder, routing: &Routing) {
    builder.ensure_node(NodeKey::NoLabel, NodeType::Label, "label:none");
    for label in routing.collect_labels() {
        builder.ensure_label(&label);
    }
}

/// Encode the primary rule of every destination.
///
/// Shape per rule: `input -- Rule -- action_1 -- ... -- action_n -- output`,
/// plus `Rule -- label` for labelled rules and `action -- label` for push and
/// swap. Returns the number of rules encoded.
pub fn encode(
    builder: &mut GraphBuilder,
    network: &Network,
    config: &BuildConfig,
) -> Result<usize> {
    let topology = &network.topology;
    let mut encoded = 0;

    for (t, table) in network.routing.tables.iter().enumerate() {
        let r = topology
            .router_index(&table.router)
            .ok_or_else(|| BuildError::UnknownRouter {
                name: table.router.clone(),
            })?;
        let rname = &topology.routers[r].name;
        let mut seq = 0;

        for (d, dest) in table.destinations.iter().enumerate() {
            let Some(rule) = dest.primary_rule() else {
                if config.strict_destinations {
                    return Err(BuildError::NoPrimaryRule {
                        router: rname.clone(),
                        destination: d,
                    });
                }
                warn!(router = %rname, destination = d, "Destination has no rule, skipping");
                continue;
            };

            let rule_node = builder.ensure_node(
                NodeKey::Rule {
                    table: t,
                    destination: d,
                },
                NodeType::Rule,
                format!("{}:rule{}", rname, seq),
            );
            let input = interface_node(builder, topology, r, &rule.from)?;
            builder.ensure_edge(rule_node, input);
            if let Some(label) = &rule.label {
                let label_node = builder.label(label)?;
                builder.ensure_edge(rule_node, label_node);
            }

            let mut last = rule_node;
            for (j, action) in rule.actions.iter().enumerate() {
                let (ntype, op) = match action {
                    Action::Push(_) => (NodeType::PushAction, "PUSH"),
                    Action::Swap(_) => (NodeType::SwapAction, "SWAP"),
                    Action::Pop => (NodeType::PopAction, "POP"),
                };
                let action_node = builder.ensure_node(
                    NodeKey::Action {
                        table: t,
                        destination: d,
                        index: j,
                    },
                    ntype,
                    format!("{}:rule{}:action{}:{}", rname, seq, j, op),
                );
                if let Some(label) = action.label() {
                    let label_node = builder.label(label)?;
                    builder.ensure_edge(action_node, label_node);
                }
                builder.ensure_edge(last, action_node);
                last = action_node;
            }

            let output = interface_node(builder, topology, r, &rule.to)?;
            builder.ensure_edge(last, output);
            seq += 1;
        }
        encoded += seq;
    }

    debug!(rules = encoded, nodes = builder.node_count(), "forwarding encoded");
    Ok(encoded)
}
