//! mplsg core - lowers MPLS networks and reachability queries into a typed graph.
//!
//! The input is a network model (routers, interfaces, links and per-router
//! MPLS forwarding tables) together with a query of the form
//! `<constructing> router-path <destructing>` and a failure budget `k`. The
//! output is a single undirected graph whose nodes are tagged with a
//! [`NodeType`] and whose structure encodes topology, forwarding rules and
//! the query pattern. Downstream verifiers and feature encoders consume it.
//!
//! # Features
//!
//! - **Stable identity**: one node per domain object, one node per label value
//! - **Quantified patterns**: `.*`, `.+` and `a+` lowered to branch/merge shapes
//! - **Batch builds**: many (network, query) pairs in parallel via Rayon
//!
//! # Usage
//!
//! ```rust,no_run
//! use mplsg_core::{build_graph, BuildConfig, Network, Query};
//!
//! let network = Network::load("net.json".as_ref())?;
//! let query = Query::parse("<ip> R1 .* R4 <ip>")?;
//! let graph = build_graph(&network, &query, 1, &BuildConfig::default())?;
//!
//! for (a, b) in graph.edges() {
//!     println!("{} -- {}", a, b);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod batch;
pub mod config;
pub mod encode;
pub mod error;
pub mod graph;
pub mod model;
pub mod query;

pub use config::BuildConfig;
pub use encode::{build_graph, Terminal};
pub use error::{BuildError, Error, ModelError, QueryError, Result};
pub use graph::{GraphBuilder, MplsGraph, Node, NodeKey, NodeType};
pub use model::{Label, Network};
pub use query::Query;

/// Get the version of mplsg-core.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
