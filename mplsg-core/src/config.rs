//! Build options.
//!
//! Every field has a default, so a partial `[build]` table (or none at all)
//! deserializes cleanly:
//!
//! ```toml
//! [build]
//! quantifier_path_types = false
//! strict_destinations = false
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Tag quantified wildcards in the router path by their own quantifier.
    ///
    /// Off by default: router-path `.+` becomes a ZeroOrMore node and `.*` a
    /// OneOrMore node, the mirror image of the label patterns. Graphs built
    /// for existing downstream models rely on that tagging.
    pub quantifier_path_types: bool,

    /// Fail the build when a destination has no rule to encode, instead of
    /// skipping it with a warning.
    pub strict_destinations: bool,
}
