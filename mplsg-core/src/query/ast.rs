//! Query abstract syntax tree.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::QueryError;

/// The three parts of a query, in textual order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternPart {
    Constructing,
    Network,
    Destructing,
}

impl fmt::Display for PatternPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PatternPart::Constructing => "constructing",
            PatternPart::Network => "router-path",
            PatternPart::Destructing => "destructing",
        };
        f.write_str(name)
    }
}

/// A single pattern symbol: a named label/router, or the wildcard `.`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Atom {
    Symbol(String),
    Any,
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Symbol(name) => f.write_str(name),
            Atom::Any => f.write_str("."),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quantifier {
    /// `*`
    ZeroOrMore,
    /// `+`
    OneOrMore,
    /// `?`
    ZeroOrOne,
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sym = match self {
            Quantifier::ZeroOrMore => "*",
            Quantifier::OneOrMore => "+",
            Quantifier::ZeroOrOne => "?",
        };
        f.write_str(sym)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatternAtom {
    Simple(Atom),
    Quantified(Atom, Quantifier),
}

impl PatternAtom {
    pub fn atom(&self) -> &Atom {
        match self {
            PatternAtom::Simple(atom) | PatternAtom::Quantified(atom, _) => atom,
        }
    }

    pub fn quantifier(&self) -> Option<Quantifier> {
        match self {
            PatternAtom::Simple(_) => None,
            PatternAtom::Quantified(_, q) => Some(*q),
        }
    }

    /// True for an unquantified named symbol.
    pub fn is_plain_symbol(&self) -> bool {
        matches!(self, PatternAtom::Simple(Atom::Symbol(_)))
    }
}

impl fmt::Display for PatternAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternAtom::Simple(atom) => write!(f, "{}", atom),
            PatternAtom::Quantified(atom, q) => write!(f, "{}{}", atom, q),
        }
    }
}

/// An ordered sequence of atoms.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pub atoms: Vec<PatternAtom>,
}

impl Pattern {
    pub fn new(atoms: Vec<PatternAtom>) -> Self {
        Self { atoms }
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Named symbols in the pattern, quantified or not.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.atoms.iter().filter_map(|a| match a.atom() {
            Atom::Symbol(name) => Some(name.as_str()),
            Atom::Any => None,
        })
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.atoms.iter().map(|a| a.to_string()).collect();
        f.write_str(&parts.join(" "))
    }
}

/// A parsed reachability query.
///
/// `None` constructing/destructing patterns stand for `<>`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub constructing: Option<Pattern>,
    pub network: Pattern,
    pub destructing: Option<Pattern>,
}

impl Query {
    pub fn parse(input: &str) -> Result<Self, QueryError> {
        super::parser::parse(input)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = |p: &Option<Pattern>| p.as_ref().map(|p| p.to_string()).unwrap_or_default();
        write!(
            f,
            "<{}> {} <{}>",
            side(&self.constructing),
            self.network,
            side(&self.destructing)
        )
    }
}
