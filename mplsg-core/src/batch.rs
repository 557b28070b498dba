//! Parallel construction over many (network, query, k) jobs.
//!
//! Jobs are independent: each one loads its own network and owns its own
//! builder. A failing job is reported and the others carry on.
//!
//! # Manifest
//!
//! ```json
//! { "jobs": [
//!     { "name": "ring-0", "network": "nets/ring.json", "query": "<ip> R1 .* R4 <ip>", "k": 1 }
//! ] }
//! ```
//!
//! Relative network paths are resolved against the manifest's directory.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::BuildConfig;
use crate::encode::build_graph;
use crate::error::{Error, ModelError};
use crate::graph::MplsGraph;
use crate::model::Network;
use crate::query::Query;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub name: String,
    pub network: PathBuf,
    pub query: String,
    #[serde(default)]
    pub k: u32,
}

impl Job {
    /// Load, parse and build this job's graph.
    pub fn build(&self, config: &BuildConfig) -> Result<MplsGraph, Error> {
        let network = Network::load(&self.network)?;
        let query = Query::parse(&self.query)?;
        Ok(build_graph(&network, &query, self.k, config)?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub jobs: Vec<Job>,
}

impl Manifest {
    /// Read a JSON manifest, resolving network paths against its directory.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let content = std::fs::read_to_string(path)?;
        let mut manifest: Manifest = serde_json::from_str(&content)?;
        if let Some(base) = path.parent() {
            for job in &mut manifest.jobs {
                if job.network.is_relative() {
                    job.network = base.join(&job.network);
                }
            }
        }
        Ok(manifest)
    }
}

/// Result of one job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum JobOutcome {
    Built {
        name: String,
        nodes: usize,
        edges: usize,
    },
    Failed {
        name: String,
        error: String,
    },
}

impl JobOutcome {
    pub fn name(&self) -> &str {
        match self {
            JobOutcome::Built { name, .. } | JobOutcome::Failed { name, .. } => name,
        }
    }

    pub fn is_built(&self) -> bool {
        matches!(self, JobOutcome::Built { .. })
    }
}

/// Build every job in parallel, preserving input order in the result.
///
/// `threads` of `None` or `Some(0)` uses rayon's global pool.
pub fn run(jobs: &[Job], threads: Option<usize>, config: &BuildConfig) -> Vec<JobOutcome> {
    let pool = match threads {
        Some(n) if n > 0 => rayon::ThreadPoolBuilder::new().num_threads(n).build().ok(),
        _ => None,
    };

    let run_one = |job: &Job| -> JobOutcome {
        match job.build(config) {
            Ok(graph) => {
                debug!(job = %job.name, nodes = graph.node_count(), "job built");
                JobOutcome::Built {
                    name: job.name.clone(),
                    nodes: graph.node_count(),
                    edges: graph.edge_count(),
                }
            }
            Err(e) => {
                warn!(job = %job.name, error = %e, "Job failed, skipping");
                JobOutcome::Failed {
                    name: job.name.clone(),
                    error: e.to_string(),
                }
            }
        }
    };

    match pool {
        Some(pool) => pool.install(|| jobs.par_iter().map(run_one).collect()),
        None => jobs.par_iter().map(run_one).collect(),
    }
}
