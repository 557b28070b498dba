//! Label patterns (the constructing and destructing parts of a query).
//!
//! Only simple patterns are lowered. A one-or-more symbol `a+` opens a
//! two-way branch: one arm goes through `a`, the other goes straight to the
//! following plain atom. Both arms are merged into the next plain atom after
//! that, or handed to the caller as an open [`Terminal::Branch`].

use petgraph::graph::NodeIndex;
use tracing::debug;

use super::{connect, Terminal};
use crate::error::{BuildError, Result};
use crate::graph::{GraphBuilder, NodeKey, NodeType};
use crate::model::Label;
use crate::query::{Atom, Pattern, PatternAtom, PatternPart, Quantifier};

/// Lower `pattern` starting from `start`.
///
/// An absent pattern becomes a single edge to the shared "empty" Label node.
pub fn encode(
    builder: &mut GraphBuilder,
    part: PatternPart,
    start: Terminal,
    pattern: Option<&Pattern>,
) -> Result<Terminal> {
    let Some(pattern) = pattern else {
        let empty =
            builder.ensure_node(NodeKey::EmptyLabel, NodeType::Label, "label:empty");
        connect(builder, &start, empty);
        return Ok(Terminal::Single(empty));
    };

    let mut current = start;
    let mut branch: Vec<NodeIndex> = Vec::new();
    let mut pending_branch = false;
    let mut last_atom: Option<&PatternAtom> = None;

    for (position, atom) in pattern.atoms.iter().enumerate() {
        let key = NodeKey::Atom { part, position };
        let unsupported = |reason| BuildError::UnsupportedPattern {
            part,
            position,
            atom: atom.to_string(),
            reason,
        };

        if matches!(atom, PatternAtom::Quantified(..))
            && last_atom.is_some_and(PatternAtom::is_plain_symbol)
        {
            return Err(unsupported("quantified atom directly after a label atom"));
        }

        match atom {
            PatternAtom::Quantified(Atom::Any, Quantifier::ZeroOrMore) => {
                let node = builder.ensure_node(key, NodeType::ZeroOrMore, "atom:label:.*");
                connect(builder, &current, node);
                current = Terminal::Single(node);
            }
            PatternAtom::Quantified(Atom::Any, Quantifier::OneOrMore) => {
                let node = builder.ensure_node(key, NodeType::OneOrMore, "atom:label:.+");
                connect(builder, &current, node);
                current = Terminal::Single(node);
            }
            PatternAtom::Quantified(inner @ Atom::Symbol(_), Quantifier::OneOrMore) => {
                let node = atom_node(builder, key, inner)?;
                connect(builder, &current, node);
                branch.push(node);
                pending_branch = true;
            }
            PatternAtom::Quantified(..) => {
                return Err(unsupported("quantifier not supported on this atom"));
            }
            PatternAtom::Simple(inner) => {
                let node = atom_node(builder, key, inner)?;
                if pending_branch {
                    // Skip arm: bypass the repeatable atom.
                    connect(builder, &current, node);
                    branch.push(node);
                    pending_branch = false;
                } else if !branch.is_empty() {
                    for arm in branch.drain(..) {
                        builder.ensure_edge(arm, node);
                    }
                    current = Terminal::Single(node);
                } else {
                    connect(builder, &current, node);
                    current = Terminal::Single(node);
                }
            }
        }
        last_atom = Some(atom);
    }

    debug!(
        %part,
        atoms = pattern.atoms.len(),
        open_branch = !branch.is_empty(),
        "label pattern encoded"
    );
    if branch.is_empty() {
        Ok(current)
    } else {
        Ok(Terminal::Branch(branch))
    }
}

/// Node for a plain label-pattern atom.
///
/// A symbol becomes a QueryAtom tied to its Label node; the wildcard becomes
/// a Label-typed `atom:any` node.
fn atom_node(builder: &mut GraphBuilder, key: NodeKey, atom: &Atom) -> Result<NodeIndex> {
    match atom {
        Atom::Symbol(name) => {
            let label = builder.label(&Label::new(name.as_str()))?;
            let node =
                builder.ensure_node(key, NodeType::QueryAtom, format!("atom:label:{}", name));
            builder.ensure_edge(node, label);
            Ok(node)
        }
        Atom::Any => Ok(builder.ensure_node(key, NodeType::Label, "atom:any")),
    }
}
