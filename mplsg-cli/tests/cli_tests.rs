//! Integration tests for the mplsg CLI
//!
//! Tests end-to-end command behavior using the CLI binary.
//! Uses tempfile for isolated test directories.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

/// Run mplsg with the given args in the specified directory
fn run_mplsg(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mplsg"))
        .current_dir(dir)
        .env_remove("MPLSG_CONFIG")
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute mplsg command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

const NETWORK: &str = r#"{
    "topology": {
        "routers": [
            { "name": "R1", "interfaces": [{ "name": "i0" }, { "name": "i1" }] },
            { "name": "R2", "interfaces": [{ "name": "i0" }, { "name": "i1" }] }
        ],
        "links": [
            { "from": { "router": "R1", "interface": "i1" },
              "to": { "router": "R2", "interface": "i0" } }
        ]
    },
    "routing": {
        "tables": [{
            "router": "R1",
            "destinations": [{ "te_groups": [{ "rules": [{
                "from": "i0", "label": "L1",
                "actions": [{ "op": "swap", "label": "L2" }],
                "to": "i1"
            }]}]}]
        }]
    }
}"#;

/// Write the sample network into the temp directory
fn setup_network(dir: &Path) {
    fs::write(dir.join("net.json"), NETWORK).expect("Failed to write network");
}

// ============================================================================
// Build Command
// ============================================================================

#[test]
fn test_build_prints_edges() {
    let dir = TempDir::new().unwrap();
    setup_network(dir.path());

    let output = run_mplsg(dir.path(), &["build", "net.json", "<> R1 <>", "0"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    let lines: Vec<_> = out.lines().collect();
    assert!(lines.contains(&"intf:R1:i1 -- intf:R2:i0"));
    assert!(lines.contains(&"R1:rule0 -- R1:rule0:action0:SWAP"));
    assert!(lines.contains(&"query -- label:empty"));
    assert!(lines.contains(&"atom:router:R1 -- router:R1"));
}

#[test]
fn test_build_json_to_file() {
    let dir = TempDir::new().unwrap();
    setup_network(dir.path());

    let output = run_mplsg(
        dir.path(),
        &[
            "build",
            "net.json",
            "<L1> R1 R2 <L2>",
            "2",
            "--format",
            "json",
            "-o",
            "graph.json",
        ],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let content = fs::read_to_string(dir.path().join("graph.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    let nodes = value["nodes"].as_array().unwrap();
    let query = nodes
        .iter()
        .find(|n| n["ntype"] == "Query")
        .expect("query node");
    assert_eq!(query["k"], 2);
    assert!(!value["edges"].as_array().unwrap().is_empty());
}

#[test]
fn test_build_stats() {
    let dir = TempDir::new().unwrap();
    setup_network(dir.path());

    let output = run_mplsg(
        dir.path(),
        &["build", "net.json", "<> R1 .* <>", "1", "--format", "stats"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("OneOrMore"));
    assert!(!out.contains("ZeroOrMore"));
    assert!(out.contains("SwapAction"));
    assert!(out.contains("k = 1"));
}

#[test]
fn test_build_quantifier_path_types_flag() {
    let dir = TempDir::new().unwrap();
    setup_network(dir.path());

    let output = run_mplsg(
        dir.path(),
        &[
            "build",
            "net.json",
            "<> R1 .* <>",
            "0",
            "--quantifier-path-types",
        ],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output)
        .lines()
        .any(|line| line == "atom:router:R1 -- atom:router:.*"));
}

#[test]
fn test_config_sets_default_format() {
    let dir = TempDir::new().unwrap();
    setup_network(dir.path());
    fs::write(
        dir.path().join(".mplsgrc.toml"),
        "[output]\nformat = \"stats\"\ncolor = false\n",
    )
    .unwrap();

    let output = run_mplsg(dir.path(), &["build", "net.json", "<> R1 <>", "0"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("nodes,"));
}

#[test]
fn test_build_rejects_bad_query() {
    let dir = TempDir::new().unwrap();
    setup_network(dir.path());

    let output = run_mplsg(dir.path(), &["build", "net.json", "<> R1", "0"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to parse query"));
}

#[test]
fn test_build_rejects_unsupported_pattern() {
    let dir = TempDir::new().unwrap();
    setup_network(dir.path());

    let output = run_mplsg(dir.path(), &["build", "net.json", "<L1*> R1 <>", "0"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to build graph"));
}

#[test]
fn test_build_missing_network() {
    let dir = TempDir::new().unwrap();

    let output = run_mplsg(dir.path(), &["build", "missing.json", "<> R1 <>", "0"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("missing.json"));
}

// ============================================================================
// Batch Command
// ============================================================================

#[test]
fn test_batch_reports_each_job() {
    let dir = TempDir::new().unwrap();
    setup_network(dir.path());
    fs::write(
        dir.path().join("jobs.json"),
        r#"{ "jobs": [
            { "name": "ok", "network": "net.json", "query": "<> R1 <>", "k": 1 },
            { "name": "plus", "network": "net.json", "query": "<L1+> R1 <>" },
            { "name": "gone", "network": "nope.json", "query": "<> R1 <>" }
        ] }"#,
    )
    .unwrap();

    let output = run_mplsg(
        dir.path(),
        &["batch", "jobs.json", "-j", "2", "--format", "json"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let outcomes = value.as_array().unwrap();
    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0]["name"], "ok");
    assert_eq!(outcomes[0]["status"], "built");
    assert_eq!(outcomes[1]["status"], "built");
    assert_eq!(outcomes[2]["status"], "failed");
}

#[test]
fn test_batch_table_summary() {
    let dir = TempDir::new().unwrap();
    setup_network(dir.path());
    fs::write(
        dir.path().join("jobs.json"),
        r#"{ "jobs": [{ "name": "ok", "network": "net.json", "query": "<> R2 <>" }] }"#,
    )
    .unwrap();

    let output = run_mplsg(dir.path(), &["batch", "jobs.json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("1 built, 0 failed"));
}
