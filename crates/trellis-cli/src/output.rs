//! Plain-text rendering of query results.

use std::fmt::Write as _;
use trellis_graph::{
    GraphEdge, ImpactReport, LintReport, NodeDescription, RelatedDocuments,
};

/// Impact findings, one per line, grouped by hop order.
pub fn impact_text(report: &ImpactReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Impact of {} ({}), max depth {}",
        report.origin.id, report.origin.path, report.max_depth
    );
    if report.findings.is_empty() {
        out.push_str("  no affected documents\n");
    }
    for finding in &report.findings {
        let _ = writeln!(
            out,
            "  {:<14} hop {}  {:<24} via {:<8} {}",
            finding.priority.name(),
            finding.hop,
            finding.id,
            finding.via.name(),
            finding.direction
        );
    }
    let counts = &report.counts;
    let _ = writeln!(
        out,
        "{} findings: {} must-review, {} should-review, {} informational",
        report.findings.len(),
        counts.must_review,
        counts.should_review,
        counts.informational
    );
    push_warnings(&mut out, &report.warnings);
    out
}

/// Related documents with hop, direction and relation.
pub fn related_text(result: &RelatedDocuments) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Related to {} ({})", result.origin.id, result.origin.path);
    if result.related.is_empty() {
        out.push_str("  no related documents\n");
    }
    for doc in &result.related {
        let _ = writeln!(
            out,
            "  hop {}  {:<10} {:<8} {:<24} {}",
            doc.hop,
            doc.direction,
            doc.via.name(),
            doc.document.id,
            doc.document.path
        );
    }
    let _ = writeln!(
        out,
        "{} found, max hop {}",
        result.stats.total_found, result.stats.max_hop
    );
    push_warnings(&mut out, &result.warnings);
    out
}

/// Stored paths only, one per line.
pub fn related_paths(result: &RelatedDocuments) -> String {
    result
        .related
        .iter()
        .map(|doc| format!("{}\n", doc.document.path))
        .collect()
}

/// A node's metadata and edges.
pub fn describe_text(description: &NodeDescription) -> String {
    let node = &description.node;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} [{}]{}",
        node.id,
        node.doc_type,
        node.title
            .as_deref()
            .map(|t| format!(" {t}"))
            .unwrap_or_default()
    );
    let _ = writeln!(out, "  path:    {}", node.path);
    if let Some(status) = &node.status {
        let _ = writeln!(out, "  status:  {status}");
    }
    if let Some(feature) = &node.feature {
        let _ = writeln!(out, "  feature: {feature}");
    }
    if !node.tags.is_empty() {
        let _ = writeln!(out, "  tags:    {}", node.tags.join(", "));
    }
    if !node.owners.is_empty() {
        let _ = writeln!(out, "  owners:  {}", node.owners.join(", "));
    }

    push_edges(&mut out, "Incoming", &description.incoming);
    push_edges(&mut out, "Outgoing", &description.outgoing);
    if description.is_orphan {
        out.push_str("Orphan: no relations to other documents\n");
    }
    push_warnings(&mut out, &node.warnings);
    push_warnings(&mut out, &description.warnings);
    out
}

/// Lint findings, one per line, with a summary.
pub fn lint_text(report: &LintReport) -> String {
    if report.is_empty() {
        return "No findings.\n".to_string();
    }
    let mut out = String::new();
    for finding in &report.findings {
        let _ = writeln!(
            out,
            "{}[{}] {}",
            finding.severity, finding.kind, finding.message
        );
    }
    let _ = writeln!(
        out,
        "{} findings ({} warnings)",
        report.findings.len(),
        report.warning_count()
    );
    out
}

fn push_edges(out: &mut String, heading: &str, edges: &[GraphEdge]) {
    let _ = writeln!(out, "{heading} ({}):", edges.len());
    for edge in edges {
        let _ = writeln!(out, "  {} --{}--> {}", edge.from, edge.relation, edge.to);
    }
}

fn push_warnings(out: &mut String, warnings: &[String]) {
    for warning in warnings {
        let _ = writeln!(out, "warning: {warning}");
    }
}
