//! Full command runs over the fixture tree.

use crate::common::Workspace;
use serde_json::Value;
use trellis_cli::commands::{run, LINT_FAILURE_CODE};

fn json(stdout: &str) -> Value {
    serde_json::from_str(stdout).expect("json output")
}

// ----------------------------------------------------------------------------
// graph
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_graph_json_over_tree() {
    let ws = Workspace::new();
    let output = run(&ws.cli(&["graph"])).await.unwrap();
    let graph = json(&output.stdout);

    assert_eq!(output.code, 0);
    assert_eq!(graph["stats"]["totalNodes"], 5);
    // Three parent edges plus the PRD-AUTH -> ARCH-AUTH mention.
    assert_eq!(graph["stats"]["totalEdges"], 4);
    assert_eq!(graph["integrity"]["orphanNodeIds"], serde_json::json!(["lonely"]));

    let ids: Vec<&str> = graph["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_str().unwrap())
        .collect();
    assert!(!ids.contains(&"SKIP-ME"));
}

#[tokio::test]
async fn test_graph_without_mentions() {
    let ws = Workspace::new();
    let output = run(&ws.cli(&["graph", "--no-mentions"])).await.unwrap();
    assert_eq!(json(&output.stdout)["stats"]["totalEdges"], 3);
}

#[tokio::test]
async fn test_graph_mermaid() {
    let ws = Workspace::new();
    let output = run(&ws.cli(&["graph", "--format", "mermaid"])).await.unwrap();
    assert!(output.stdout.starts_with("flowchart LR"));
    assert!(output.stdout.contains("PRD_CORE"));
}

// ----------------------------------------------------------------------------
// impact, related, describe
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_impact_by_path() {
    let ws = Workspace::new();
    let output = run(&ws.cli(&["impact", "product/auth.md", "--format", "json"]))
        .await
        .unwrap();
    let report = json(&output.stdout);

    assert_eq!(report["origin"]["id"], "PRD-AUTH");
    let task = report["findings"]
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["id"] == "TASK-1")
        .expect("TASK-1 is impacted");
    assert_eq!(task["hop"], 2);
    assert_eq!(task["priority"], "should-review");
    assert_eq!(task["direction"], "downstream");
}

#[tokio::test]
async fn test_impact_max_depth_flag() {
    let ws = Workspace::new();
    let output = run(&ws.cli(&["impact", "PRD-AUTH", "--max-depth", "1", "--format", "json"]))
        .await
        .unwrap();
    let report = json(&output.stdout);
    assert_eq!(report["maxDepth"], 1);
    assert!(
        report["findings"]
            .as_array()
            .unwrap()
            .iter()
            .all(|f| f["hop"] == 1)
    );
}

#[tokio::test]
async fn test_related_paths_downstream() {
    let ws = Workspace::new();
    let output = run(&ws.cli(&[
        "related",
        "PRD-CORE",
        "--all",
        "--direction",
        "downstream",
        "--relation",
        "parent",
        "--format",
        "paths",
    ]))
    .await
    .unwrap();
    assert_eq!(output.stdout, "product/auth.md\narch/auth.md\ntasks/one.md\n");
}

#[tokio::test]
async fn test_related_default_depth_is_one() {
    let ws = Workspace::new();
    let output = run(&ws.cli(&["related", "ARCH-AUTH", "--format", "json"]))
        .await
        .unwrap();
    let result = json(&output.stdout);
    assert_eq!(result["stats"]["maxHop"], 1);
    assert_eq!(result["stats"]["totalFound"], 2);
}

#[tokio::test]
async fn test_describe_unknown_document() {
    let ws = Workspace::new();
    let err = run(&ws.cli(&["describe", "NOPE-1"])).await.unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_describe_text_blocking() {
    let ws = Workspace::new();
    let output = tokio_test::block_on(run(&ws.cli(&["describe", "TASK-1"]))).unwrap();
    assert!(output.stdout.starts_with("TASK-1 [task] Wire up login\n"));
    assert!(output.stdout.contains("  status:  open\n"));
    assert!(output.stdout.contains("ARCH-AUTH --parent--> TASK-1"));
}

// ----------------------------------------------------------------------------
// lint
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_lint_strict_fails_on_orphan() {
    let ws = Workspace::new();
    let relaxed = run(&ws.cli(&["lint"])).await.unwrap();
    assert_eq!(relaxed.code, 0);
    assert!(relaxed.stdout.contains("warning[orphan-node] lonely"));
    assert!(relaxed.stdout.contains("info[document-warning]"));

    let strict = run(&ws.cli(&["lint", "--strict"])).await.unwrap();
    assert_eq!(strict.code, LINT_FAILURE_CODE);
}

// ----------------------------------------------------------------------------
// root and config
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_root_flag_overrides_config() {
    let ws = Workspace::new();
    let missing = ws.dir.path().join("nowhere");
    let err = run(&ws.cli(&["--root", missing.to_str().unwrap(), "graph"]))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("nowhere"));
}

#[tokio::test]
async fn test_config_set_then_get() {
    let ws = Workspace::new();
    run(&ws.cli(&["config", "set", "impact.max_depth", "2"]))
        .await
        .unwrap();
    let output = run(&ws.cli(&["config", "get", "impact.max_depth"]))
        .await
        .unwrap();
    assert_eq!(output.stdout, "2\n");

    let impact = run(&ws.cli(&["impact", "PRD-CORE", "--format", "json"]))
        .await
        .unwrap();
    assert_eq!(json(&impact.stdout)["maxDepth"], 2);
}
