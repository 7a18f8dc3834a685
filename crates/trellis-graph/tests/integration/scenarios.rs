//! End-to-end scenarios over small document sets.

use crate::common::{build, product_tree};
use trellis_core::ScannedDocument;
use trellis_graph::{
    analyze, analyze_impact, describe_node, lint, resolve, to_json, to_mermaid, Direction,
    ImpactOptions, LintKind, Priority, Relation, ResolveOptions, MAX_RELATED,
};

// ----------------------------------------------------------------------------
// Build scenarios
// ----------------------------------------------------------------------------

#[test]
fn test_basic_parent_edge() {
    let output = build(vec![
        ScannedDocument::new("PRD-CORE", "prd"),
        ScannedDocument::new("PRD-AUTH", "prd").with_parent("PRD-CORE"),
    ]);

    assert_eq!(output.graph.edges.len(), 1);
    assert_eq!(output.graph.edges[0].from, "PRD-CORE");
    assert_eq!(output.graph.edges[0].to, "PRD-AUTH");

    let findings = analyze("PRD-AUTH", &output.adjacency, &ImpactOptions { max_depth: 1 });
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].id, "PRD-CORE");
    assert_eq!(findings[0].hop, 1);
    assert_eq!(findings[0].direction, Direction::Upstream);
    assert_eq!(findings[0].priority, Priority::MustReview);
}

#[test]
fn test_dangling_parent() {
    let output = build(vec![
        ScannedDocument::new("BEH-AUTH", "behavior").with_parent("PRD-MISSING"),
    ]);

    assert_eq!(output.graph.node_count(), 1);
    assert_eq!(output.graph.edge_count(), 0);
    let dangling = &output.graph.integrity.dangling_edges;
    assert_eq!(dangling.len(), 1);
    assert_eq!((dangling[0].from.as_str(), dangling[0].to.as_str()), ("PRD-MISSING", "BEH-AUTH"));
    assert_eq!(output.graph.integrity.orphan_node_ids, vec!["BEH-AUTH"]);
}

#[test]
fn test_product_tree_stats() {
    let output = build(product_tree());
    let stats = &output.graph.stats;

    assert_eq!(stats.total_nodes, 5);
    assert_eq!(stats.total_edges, 5);
    assert_eq!(stats.by_relation["parent"], 3);
    assert_eq!(stats.by_relation["related"], 1);
    assert_eq!(stats.by_relation["mentions"], 1);
    assert_eq!(stats.by_feature["auth"], 2);
    assert!(output.graph.integrity.orphan_node_ids.is_empty());
}

// ----------------------------------------------------------------------------
// Traversal scenarios
// ----------------------------------------------------------------------------

#[test]
fn test_direction_filter() {
    let output = build(vec![
        ScannedDocument::new("PRD-CORE", "prd"),
        ScannedDocument::new("PRD-AUTH", "prd").with_parent("PRD-CORE"),
        ScannedDocument::new("BEH-AUTH", "behavior").with_parent("PRD-AUTH"),
    ]);
    let options = ResolveOptions {
        depth: 2,
        direction: Direction::Downstream,
        ..ResolveOptions::default()
    };

    let result = resolve(&output, "PRD-AUTH", &options).unwrap();
    let ids: Vec<_> = result.related.iter().map(|r| r.document.id.as_str()).collect();

    assert!(ids.contains(&"BEH-AUTH"));
    assert!(!ids.contains(&"PRD-CORE"));
}

#[test]
fn test_cycle_safety() {
    let output = build(vec![
        ScannedDocument::new("A", "prd").with_related("B"),
        ScannedDocument::new("B", "prd").with_related("A"),
    ]);
    let options = ResolveOptions {
        depth: 3,
        ..ResolveOptions::default()
    };

    let result = resolve(&output, "A", &options).unwrap();

    assert_eq!(result.related.len(), 1);
    assert_eq!(result.related[0].document.id, "B");
    let cycle_warnings: Vec<_> = result
        .warnings
        .iter()
        .filter(|w| w.contains("circular reference"))
        .collect();
    assert_eq!(cycle_warnings.len(), 1);
    assert!(cycle_warnings[0].contains('B'));
}

#[test]
fn test_cap_enforcement() {
    let mut docs = vec![ScannedDocument::new("ROOT", "prd")];
    for i in 0..(MAX_RELATED + 20) {
        docs.push(ScannedDocument::new(format!("TASK-{i:03}"), "task").with_parent("ROOT"));
    }
    let output = build(docs);
    let options = ResolveOptions {
        all: true,
        ..ResolveOptions::default()
    };

    let result = resolve(&output, "ROOT", &options).unwrap();

    assert_eq!(result.related.len(), MAX_RELATED);
    assert_eq!(result.stats.total_found, MAX_RELATED);
    assert_eq!(
        result.warnings.iter().filter(|w| w.contains("truncated")).count(),
        1
    );
}

#[test]
fn test_resolve_by_path_suffix() {
    let output = build(product_tree());
    let result = resolve(&output, "auth-login.md", &ResolveOptions::default()).unwrap();

    assert_eq!(result.origin.id, "BEH-AUTH");
    let ids: Vec<_> = result.related.iter().map(|r| r.document.id.as_str()).collect();
    assert_eq!(ids, vec!["PRD-AUTH", "TASK-1"]);
}

#[test]
fn test_impact_over_product_tree() {
    let output = build(product_tree());
    let report = analyze_impact(&output, "product/core.md", &ImpactOptions::default()).unwrap();

    let summary: Vec<_> = report
        .findings
        .iter()
        .map(|f| (f.id.as_str(), f.hop, f.via))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("PRD-AUTH", 1, Relation::Parent),
            ("ARCH-AUTH", 2, Relation::Related),
            ("BEH-AUTH", 2, Relation::Parent),
            ("TASK-1", 3, Relation::Mentions),
        ]
    );
    assert_eq!(report.counts.must_review, 1);
    assert_eq!(report.counts.should_review, 2);
    assert_eq!(report.counts.informational, 1);
}

#[test]
fn test_describe_and_lint_agree_on_orphans() {
    let mut docs = product_tree();
    docs.push(ScannedDocument::new("ADR-1", "adr"));
    let output = build(docs);

    assert!(describe_node(&output, "ADR-1").unwrap().is_orphan);
    let report = lint(&output.graph);
    let orphans: Vec<_> = report
        .findings
        .iter()
        .filter(|f| f.kind == LintKind::OrphanNode)
        .map(|f| f.subject.as_str())
        .collect();
    assert_eq!(orphans, vec!["ADR-1"]);
}

// ----------------------------------------------------------------------------
// Rendering scenarios
// ----------------------------------------------------------------------------

#[test]
fn test_json_round_trips_through_serde() {
    let output = build(product_tree());
    let json = to_json(&output.graph).unwrap();
    let parsed: trellis_graph::DocumentGraph = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, output.graph);
}

#[test]
fn test_mermaid_lists_every_node() {
    let output = build(product_tree());
    let chart = to_mermaid(&output.graph, 200);
    for node in &output.graph.nodes {
        assert!(chart.contains(&format!("[\"{}\"]", node.id)));
    }
    assert!(chart.contains("TASK_1 -.-|mentions| ARCH_AUTH"));
}
