//! Graph rendering: JSON and Mermaid flowcharts.

use crate::types::{DocumentGraph, Relation};
use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;
use trellis_core::Result;

/// Default number of edges drawn in a Mermaid chart.
pub const DEFAULT_MERMAID_EDGE_LIMIT: usize = 200;

/// Pretty-printed JSON with camelCase keys.
pub fn to_json(graph: &DocumentGraph) -> Result<String> {
    Ok(serde_json::to_string_pretty(graph)?)
}

/// Renders a `flowchart LR` diagram.
///
/// Node ids are sanitised to `[A-Za-z0-9_]` and labelled with the original
/// id. At most `edge_limit` edges are drawn; the rest are summarised in a
/// trailing `%% truncated` comment.
///
/// # Example
///
/// ```rust
/// use trellis_core::ScannedDocument;
/// use trellis_graph::{build_graph, to_mermaid};
///
/// let output = build_graph(vec![
///     ScannedDocument::new("PRD-CORE", "prd"),
///     ScannedDocument::new("PRD-AUTH", "prd").with_parent("PRD-CORE"),
/// ]);
/// let chart = to_mermaid(&output.graph, 200);
///
/// assert!(chart.starts_with("flowchart LR"));
/// assert!(chart.contains("PRD_CORE[\"PRD-CORE\"]"));
/// assert!(chart.contains("PRD_CORE -->|parent| PRD_AUTH"));
/// ```
pub fn to_mermaid(graph: &DocumentGraph, edge_limit: usize) -> String {
    let names = mermaid_names(graph);
    let name = |id: &str| names.get(id).cloned().unwrap_or_else(|| sanitize(id));

    let mut out = String::from("flowchart LR\n");
    for node in &graph.nodes {
        let _ = writeln!(out, "    {}[\"{}\"]", name(&node.id), escape_label(&node.id));
    }

    for edge in graph.edges.iter().take(edge_limit) {
        let arrow = match edge.relation {
            Relation::Parent => "-->",
            Relation::Related => "-.->",
            Relation::Mentions => "-.-",
        };
        let _ = writeln!(
            out,
            "    {} {arrow}|{}| {}",
            name(&edge.from),
            edge.relation,
            name(&edge.to)
        );
    }

    let total = graph.edges.len();
    if total > edge_limit {
        let _ = writeln!(
            out,
            "%% truncated: {} of {total} edges not shown",
            total - edge_limit
        );
    }
    out
}

/// Assigns each node a unique Mermaid-safe name.
fn mermaid_names(graph: &DocumentGraph) -> HashMap<String, String> {
    let mut names = HashMap::new();
    let mut taken: HashSet<String> = HashSet::new();
    for node in &graph.nodes {
        let base = sanitize(&node.id);
        let mut candidate = base.clone();
        let mut n = 2;
        while !taken.insert(candidate.clone()) {
            candidate = format!("{base}_{n}");
            n += 1;
        }
        names.insert(node.id.clone(), candidate);
    }
    names
}

/// Words that start a Mermaid statement and cannot name a node.
const RESERVED: &[&str] = &[
    "end",
    "graph",
    "flowchart",
    "subgraph",
    "direction",
    "style",
    "class",
    "classdef",
    "click",
    "linkstyle",
];

fn sanitize(id: &str) -> String {
    let safe: String = id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if safe.is_empty() {
        "_".to_string()
    } else if RESERVED.iter().any(|word| safe.eq_ignore_ascii_case(word)) {
        format!("{safe}_node")
    } else {
        safe
    }
}

fn escape_label(text: &str) -> String {
    text.replace('"', "#quot;")
}
