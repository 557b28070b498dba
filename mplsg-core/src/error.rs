//! Error types for mplsg-core.

use thiserror::Error;

use crate::query::ast::PatternPart;

/// Result type alias for graph construction.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Errors that abort construction of a graph.
///
/// None of these are recovered internally: a failed build produces no graph.
#[derive(Error, Debug)]
pub enum BuildError {
    /// A label pattern uses a construct outside the supported simple grammar.
    #[error("Unsupported {part} pattern at atom {position} ({atom}): {reason}")]
    UnsupportedPattern {
        /// Which part of the query the pattern belongs to.
        part: PatternPart,
        /// Zero-based atom position within the pattern.
        position: usize,
        /// Textual form of the offending atom.
        atom: String,
        /// Why the construct is rejected.
        reason: &'static str,
    },

    /// The router path contains an atom kind the path encoder does not lower.
    #[error("Unsupported router-path atom at position {position}: {atom}")]
    UnsupportedPathAtom {
        /// Zero-based atom position within the router path.
        position: usize,
        /// Textual form of the offending atom.
        atom: String,
    },

    /// An edge was requested against a label that was never registered.
    #[error("Label node not registered: {label}")]
    UnregisteredLabel {
        /// Label value that was looked up.
        label: String,
    },

    /// A routing table or link names a router missing from the topology.
    #[error("Unknown router: {name}")]
    UnknownRouter {
        /// Router name as written in the model.
        name: String,
    },

    /// A rule or link names an interface the router does not own.
    #[error("Unknown interface {interface} on router {router}")]
    UnknownInterface {
        /// Owning router name.
        router: String,
        /// Interface name as written in the model.
        interface: String,
    },

    /// A destination has no rule to encode and strict mode is on.
    #[error("Destination {destination} of router {router} has no primary rule")]
    NoPrimaryRule {
        /// Router owning the routing table.
        router: String,
        /// Zero-based destination position within the table.
        destination: usize,
    },
}

/// Errors raised while loading a network model.
#[derive(Error, Debug)]
pub enum ModelError {
    /// IO error reading the model file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The model is not valid JSON or does not match the schema.
    #[error("Invalid network model: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while parsing a query string.
#[derive(Error, Debug)]
pub enum QueryError {
    /// The query does not match the grammar.
    #[error("Query syntax error: {0}")]
    Syntax(String),
}

/// Any failure of a load-parse-build pipeline.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Build(#[from] BuildError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BuildError::UnsupportedPattern {
            part: PatternPart::Constructing,
            position: 1,
            atom: "b+".to_string(),
            reason: "one-or-more atom directly after a label atom",
        };
        let msg = err.to_string();
        assert!(msg.contains("constructing"));
        assert!(msg.contains("b+"));

        let err = BuildError::UnknownInterface {
            router: "R1".to_string(),
            interface: "eth9".to_string(),
        };
        assert!(err.to_string().contains("eth9"));
        assert!(err.to_string().contains("R1"));
    }

    #[test]
    fn test_pipeline_error_is_transparent() {
        let err: Error = QueryError::Syntax("expected '<'".to_string()).into();
        assert_eq!(err.to_string(), "Query syntax error: expected '<'");
    }
}
