//! Query parser - converts query strings to AST.

use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

use super::ast::{Atom, Pattern, PatternAtom, Quantifier, Query};
use crate::error::QueryError;

#[derive(Parser)]
#[grammar = "query/grammar.pest"]
struct QueryParser;

/// Parse a query of the form `<labels> routers <labels>`.
pub fn parse(input: &str) -> Result<Query, QueryError> {
    let mut pairs =
        QueryParser::parse(Rule::query, input).map_err(|e| QueryError::Syntax(e.to_string()))?;
    let root = pairs
        .next()
        .ok_or_else(|| QueryError::Syntax("empty query".to_string()))?;

    let mut parts = root.into_inner().filter(|p| p.as_rule() != Rule::EOI);
    let mut next_part = |name: &str| {
        parts
            .next()
            .ok_or_else(|| QueryError::Syntax(format!("missing {} part", name)))
    };

    let constructing = build_pattern(next_part("constructing")?)?;
    let network = build_pattern(next_part("router path")?)?;
    let destructing = build_pattern(next_part("destructing")?)?;

    Ok(Query {
        constructing: (!constructing.is_empty()).then_some(constructing),
        network,
        destructing: (!destructing.is_empty()).then_some(destructing),
    })
}

fn build_pattern(pair: Pair<'_, Rule>) -> Result<Pattern, QueryError> {
    pair.into_inner()
        .map(build_atom)
        .collect::<Result<Vec<_>, _>>()
        .map(Pattern::new)
}

fn build_atom(pair: Pair<'_, Rule>) -> Result<PatternAtom, QueryError> {
    let text = pair.as_str().to_string();
    let mut atom = None;
    let mut quantifier = None;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::any => atom = Some(Atom::Any),
            Rule::symbol => atom = Some(Atom::Symbol(inner.as_str().to_string())),
            Rule::quantifier => {
                quantifier = Some(match inner.as_str() {
                    "*" => Quantifier::ZeroOrMore,
                    "+" => Quantifier::OneOrMore,
                    _ => Quantifier::ZeroOrOne,
                })
            }
            _ => {}
        }
    }

    let atom = atom.ok_or_else(|| QueryError::Syntax(format!("malformed atom '{}'", text)))?;
    Ok(match quantifier {
        Some(q) => PatternAtom::Quantified(atom, q),
        None => PatternAtom::Simple(atom),
    })
}
