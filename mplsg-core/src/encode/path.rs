//! Router-path pattern (the middle part of a query).

use tracing::debug;

use super::{connect, Terminal};
use crate::config::BuildConfig;
use crate::error::{BuildError, Result};
use crate::graph::{GraphBuilder, NodeKey, NodeType};
use crate::model::Topology;
use crate::query::{Atom, Pattern, PatternAtom, PatternPart, Quantifier};

/// Lower the router path as a chain hanging off `start`.
///
/// Each atom is joined to every node of the previous terminal, so an open
/// branch left by the constructing pattern is merged into the first atom.
pub fn encode(
    builder: &mut GraphBuilder,
    topology: &Topology,
    pattern: &Pattern,
    start: Terminal,
    config: &BuildConfig,
) -> Result<Terminal> {
    let mut last = start;

    for (position, atom) in pattern.atoms.iter().enumerate() {
        let key = NodeKey::Atom {
            part: PatternPart::Network,
            position,
        };

        let node = match atom {
            PatternAtom::Simple(Atom::Symbol(name)) => {
                let node =
                    builder.ensure_node(key, NodeType::QueryAtom, format!("atom:router:{}", name));
                let target = match topology.router_index(name) {
                    Some(r) => builder.ensure_node(
                        NodeKey::Router(r),
                        NodeType::Router,
                        format!("router:{}", name),
                    ),
                    None => builder.ensure_node(
                        NodeKey::UnknownRouter(name.clone()),
                        NodeType::Label,
                        name.as_str(),
                    ),
                };
                connect(builder, &last, node);
                builder.ensure_edge(node, target);
                node
            }
            PatternAtom::Simple(Atom::Any) => {
                let node = builder.ensure_node(key, NodeType::Any, "router:.");
                connect(builder, &last, node);
                node
            }
            PatternAtom::Quantified(
                Atom::Any,
                q @ (Quantifier::ZeroOrMore | Quantifier::OneOrMore),
            ) => {
                let (ntype, nlabel) = wildcard_type(*q, config.quantifier_path_types);
                let node = builder.ensure_node(key, ntype, nlabel);
                connect(builder, &last, node);
                node
            }
            PatternAtom::Quantified(..) => {
                return Err(BuildError::UnsupportedPathAtom {
                    position,
                    atom: atom.to_string(),
                });
            }
        };
        last = Terminal::Single(node);
    }

    debug!(atoms = pattern.atoms.len(), "router path encoded");
    Ok(last)
}

/// Node type for a quantified router-path wildcard.
///
/// Unless `by_quantifier` is set the tagging is swapped: `.+` maps to
/// ZeroOrMore and `.*` to OneOrMore.
fn wildcard_type(quantifier: Quantifier, by_quantifier: bool) -> (NodeType, &'static str) {
    let zero_or_more = matches!(quantifier, Quantifier::ZeroOrMore) == by_quantifier;
    if zero_or_more {
        (NodeType::ZeroOrMore, "atom:router:.*")
    } else {
        (NodeType::OneOrMore, "atom:router:.+")
    }
}
