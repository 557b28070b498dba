//! Reachability queries: AST and parser.
//!
//! A query has the textual form `<constructing> path <destructing>`, e.g.
//! `<ip> R1 .* R4 <smpls? ip>`. The bracketed parts are patterns over labels,
//! the middle part is a pattern over router names.

pub mod ast;
mod parser;

pub use ast::{Atom, Pattern, PatternAtom, PatternPart, Quantifier, Query};
pub use parser::parse;
