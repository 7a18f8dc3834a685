//! Structural lint over a built graph.
//!
//! Turns integrity data and node warnings into findings a human or CI can
//! act on:
//!
//! - `dangling-edge` per dangling edge (warning)
//! - `orphan-node` per orphan (warning)
//! - `cycle` per directed cycle over valid edges (warning)
//! - `document-warning` per warning recorded on a node (info)
//!
//! Cycles are the strongly connected components of size > 1, plus
//! self-loops, found with petgraph's Tarjan SCC.

use crate::types::{DocumentGraph, GraphEdge};
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

// ============================================================================
// Finding types
// ============================================================================

/// Kind of lint finding. Findings sort in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LintKind {
    DanglingEdge,
    OrphanNode,
    Cycle,
    DocumentWarning,
}

impl LintKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::DanglingEdge => "dangling-edge",
            Self::OrphanNode => "orphan-node",
            Self::Cycle => "cycle",
            Self::DocumentWarning => "document-warning",
        }
    }
}

impl fmt::Display for LintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Info => "info",
            Self::Warning => "warning",
        })
    }
}

/// One structural defect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintFinding {
    pub kind: LintKind,
    pub severity: Severity,
    /// What the finding is about: a node id, an edge, or cycle members.
    pub subject: String,
    pub message: String,
}

/// All findings for one graph, ordered by kind, then subject.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintReport {
    pub findings: Vec<LintFinding>,
}

impl LintReport {
    pub fn warning_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
            .count()
    }

    pub fn has_warnings(&self) -> bool {
        self.warning_count() > 0
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}

// ============================================================================
// Lint
// ============================================================================

/// Lints a built graph.
pub fn lint(graph: &DocumentGraph) -> LintReport {
    let known: HashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    let mut findings = Vec::new();

    for edge in &graph.integrity.dangling_edges {
        findings.push(LintFinding {
            kind: LintKind::DanglingEdge,
            severity: Severity::Warning,
            subject: edge_subject(edge),
            message: dangling_message(edge, &known),
        });
    }

    for id in &graph.integrity.orphan_node_ids {
        findings.push(LintFinding {
            kind: LintKind::OrphanNode,
            severity: Severity::Warning,
            subject: id.clone(),
            message: format!("{id} has no relations to other documents"),
        });
    }

    for members in find_cycles(graph) {
        let subject = members.join(", ");
        findings.push(LintFinding {
            kind: LintKind::Cycle,
            severity: Severity::Warning,
            message: format!("cycle between: {subject}"),
            subject,
        });
    }

    for node in &graph.nodes {
        for warning in &node.warnings {
            findings.push(LintFinding {
                kind: LintKind::DocumentWarning,
                severity: Severity::Info,
                subject: node.id.clone(),
                message: format!("{} ({}): {warning}", node.id, node.path),
            });
        }
    }

    // Stable: warnings on one node keep their recorded order.
    findings.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.subject.cmp(&b.subject)));
    log::debug!("Lint produced {} findings", findings.len());
    LintReport { findings }
}

/// Directed cycles over the valid edges.
///
/// Each cycle is a sorted member list; the list of cycles is sorted too.
pub fn find_cycles(graph: &DocumentGraph) -> Vec<Vec<String>> {
    let mut digraph: DiGraph<&str, ()> = DiGraph::new();
    let mut indices: HashMap<&str, NodeIndex> = HashMap::new();
    for node in &graph.nodes {
        indices
            .entry(node.id.as_str())
            .or_insert_with(|| digraph.add_node(node.id.as_str()));
    }
    for edge in &graph.edges {
        if let (Some(&from), Some(&to)) = (indices.get(edge.from.as_str()), indices.get(edge.to.as_str())) {
            digraph.update_edge(from, to, ());
        }
    }

    let mut cycles: Vec<Vec<String>> = tarjan_scc(&digraph)
        .into_iter()
        .filter(|component| match component.as_slice() {
            [single] => digraph.contains_edge(*single, *single),
            members => members.len() > 1,
        })
        .map(|component| {
            let mut members: Vec<String> = component
                .into_iter()
                .map(|idx| digraph[idx].to_string())
                .collect();
            members.sort();
            members
        })
        .collect();
    cycles.sort();
    cycles
}

fn edge_subject(edge: &GraphEdge) -> String {
    format!("{} -> {} ({})", edge.from, edge.to, edge.relation)
}

fn dangling_message(edge: &GraphEdge, known: &HashSet<&str>) -> String {
    let missing: Vec<&str> = [edge.from.as_str(), edge.to.as_str()]
        .into_iter()
        .filter(|id| !known.contains(id))
        .collect();
    format!(
        "{} edge {} -> {} references missing document {}",
        edge.relation,
        edge.from,
        edge.to,
        missing.join(" and ")
    )
}

// ============================================================================
// Tests
// ============================================================================
