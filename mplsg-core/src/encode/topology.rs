//! Routers, interfaces and links.

use petgraph::graph::NodeIndex;
use tracing::debug;

use crate::error::{BuildError, Result};
use crate::graph::{GraphBuilder, NodeKey, NodeType};
use crate::model::{Endpoint, Topology};

/// One Router node per router, one Interface node per interface joined to its
/// router, and one edge per link between the two endpoint interfaces.
pub fn encode(builder: &mut GraphBuilder, topology: &Topology) -> Result<()> {
    for (r, router) in topology.routers.iter().enumerate() {
        let router_node = builder.ensure_node(
            NodeKey::Router(r),
            NodeType::Router,
            format!("router:{}", router.name),
        );
        for (i, iface) in router.interfaces.iter().enumerate() {
            let iface_node = builder.ensure_node(
                NodeKey::Interface { router: r, iface: i },
                NodeType::Interface,
                format!("intf:{}:{}", router.name, iface.name),
            );
            builder.ensure_edge(router_node, iface_node);
        }
    }

    for link in &topology.links {
        let a = endpoint_node(builder, topology, &link.from)?;
        let b = endpoint_node(builder, topology, &link.to)?;
        builder.ensure_edge(a, b);
    }

    debug!(
        routers = topology.routers.len(),
        links = topology.links.len(),
        nodes = builder.node_count(),
        "topology encoded"
    );
    Ok(())
}

fn endpoint_node(
    builder: &GraphBuilder,
    topology: &Topology,
    endpoint: &Endpoint,
) -> Result<NodeIndex> {
    let router = topology
        .router_index(&endpoint.router)
        .ok_or_else(|| BuildError::UnknownRouter {
            name: endpoint.router.clone(),
        })?;
    interface_node(builder, topology, router, &endpoint.interface)
}

/// Interface node for `name` on the router at position `router`.
///
/// Requires the topology to be encoded already.
pub(crate) fn interface_node(
    builder: &GraphBuilder,
    topology: &Topology,
    router: usize,
    name: &str,
) -> Result<NodeIndex> {
    let owner = &topology.routers[router];
    owner
        .interface_index(name)
        .and_then(|iface| builder.lookup(&NodeKey::Interface { router, iface }))
        .ok_or_else(|| BuildError::UnknownInterface {
            router: owner.name.clone(),
            interface: name.to_string(),
        })
}
