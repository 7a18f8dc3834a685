//! Related document resolution.
//!
//! Given a document (by id or path), finds the documents connected to it:
//! filtered by direction and relation, bounded by depth or unbounded, and
//! capped at [`MAX_RELATED`] results. Structural surprises met on the way
//! (cycles, missing targets, truncation) are reported as warnings, never as
//! errors.

use crate::builder::BuildOutput;
use crate::origin::resolve_origin;
use crate::traversal::{traverse, TraversalParams};
use crate::types::{Direction, DocType, GraphNode, Relation, MAX_RELATED};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use trellis_core::Result;

/// Settings for one resolver query.
///
/// The CLI seeds `depth`, `limit` and `priority_filter` from its `[related]`
/// config table and takes the rest from flags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveOptions {
    /// Hop bound, ignored when `all` is set.
    pub depth: usize,
    /// Follow edges without a hop bound.
    pub all: bool,
    pub direction: Direction,
    /// Relations to follow.
    pub relations: Vec<Relation>,
    /// Result cap, clamped to `1..=MAX_RELATED`.
    pub limit: usize,
    /// Accepted for compatibility; filtering by priority is not implemented.
    pub priority_filter: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            depth: 1,
            all: false,
            direction: Direction::Both,
            relations: Relation::ALL.to_vec(),
            limit: MAX_RELATED,
            priority_filter: false,
        }
    }
}

impl ResolveOptions {
    fn effective_limit(&self) -> usize {
        self.limit.clamp(1, MAX_RELATED)
    }
}

/// Short description of a document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRef {
    pub id: String,
    #[serde(rename = "type")]
    pub doc_type: DocType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub path: String,
}

impl From<&GraphNode> for DocumentRef {
    fn from(node: &GraphNode) -> Self {
        Self {
            id: node.id.clone(),
            doc_type: node.doc_type.clone(),
            title: node.title.clone(),
            path: node.path.clone(),
        }
    }
}

/// A document reached from the origin.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedDocument {
    #[serde(flatten)]
    pub document: DocumentRef,
    pub hop: usize,
    pub via: Relation,
    pub direction: Direction,
}

/// Summary counts of one resolver query.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedStats {
    pub total_found: usize,
    pub max_hop: usize,
    /// Results per discovering relation.
    pub by_relation: BTreeMap<String, usize>,
}

/// Result of [`resolve`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedDocuments {
    pub origin: DocumentRef,
    /// Ordered by hop, then id.
    pub related: Vec<RelatedDocument>,
    pub stats: RelatedStats,
    pub warnings: Vec<String>,
}

/// Resolves the documents related to `document_path`.
///
/// # Errors
///
/// Returns a not-found error when the origin does not resolve.
///
/// # Example
///
/// ```rust
/// use trellis_core::ScannedDocument;
/// use trellis_graph::{build_graph, resolve, Direction, ResolveOptions};
///
/// let output = build_graph(vec![
///     ScannedDocument::new("PRD-CORE", "prd"),
///     ScannedDocument::new("PRD-AUTH", "prd").with_parent("PRD-CORE"),
///     ScannedDocument::new("BEH-AUTH", "behavior").with_parent("PRD-AUTH"),
/// ]);
/// let options = ResolveOptions {
///     depth: 2,
///     direction: Direction::Downstream,
///     ..ResolveOptions::default()
/// };
/// let result = resolve(&output, "PRD-AUTH", &options).unwrap();
///
/// let ids: Vec<_> = result.related.iter().map(|r| r.document.id.as_str()).collect();
/// assert_eq!(ids, vec!["BEH-AUTH"]);
/// ```
pub fn resolve(
    output: &BuildOutput,
    document_path: &str,
    options: &ResolveOptions,
) -> Result<RelatedDocuments> {
    let origin = resolve_origin(output, document_path)?;
    let mut warnings = Vec::new();

    if options.priority_filter {
        warnings.push("priority filter is not implemented; ignoring it".to_string());
    }
    warnings.extend(origin.warning.clone());

    let limit = options.effective_limit();
    let params = TraversalParams {
        direction: options.direction,
        relations: &options.relations,
        max_depth: (!options.all).then_some(options.depth),
        limit: Some(limit),
        node_map: Some(&output.node_map),
    };
    let traversal = traverse(&output.adjacency, &origin.node.id, &params);

    for id in &traversal.missing {
        warnings.push(format!("document not found: {id}"));
    }
    for revisit in &traversal.revisited {
        warnings.push(format!(
            "circular reference detected: {} ({} {} -> {})",
            revisit.id, revisit.edge.relation, revisit.edge.from, revisit.edge.to
        ));
    }
    if traversal.truncated {
        log::warn!("Related documents for {} truncated at {limit}", origin.node.id);
        warnings.push(format!(
            "result limit of {limit} documents reached; results truncated"
        ));
    }

    let related: Vec<RelatedDocument> = traversal
        .sorted_visits()
        .into_iter()
        .filter_map(|visit| {
            output.node(&visit.id).map(|node| RelatedDocument {
                document: DocumentRef::from(node),
                hop: visit.hop,
                via: visit.via,
                direction: visit.direction,
            })
        })
        .collect();

    let mut by_relation: BTreeMap<String, usize> = BTreeMap::new();
    for doc in &related {
        *by_relation.entry(doc.via.name().to_string()).or_default() += 1;
    }
    let stats = RelatedStats {
        total_found: related.len(),
        max_hop: related.iter().map(|r| r.hop).max().unwrap_or(0),
        by_relation,
    };

    Ok(RelatedDocuments {
        origin: DocumentRef::from(origin.node),
        related,
        stats,
        warnings,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::builder::build_graph;
    use trellis_core::ScannedDocument;

    fn doc(id: &str) -> ScannedDocument {
        ScannedDocument::new(id, "prd")
    }

    fn ids(result: &RelatedDocuments) -> Vec<&str> {
        result.related.iter().map(|r| r.document.id.as_str()).collect()
    }

    /// PRD-CORE <- PRD-AUTH <- BEH-AUTH, parent edges.
    fn chain() -> BuildOutput {
        build_graph(vec![
            doc("PRD-CORE"),
            doc("PRD-AUTH").with_parent("PRD-CORE"),
            ScannedDocument::new("BEH-AUTH", "behavior").with_parent("PRD-AUTH"),
        ])
    }

    // ------------------------------------------------------------------------
    // Direction and depth tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_default_depth_one_both() {
        let output = chain();
        let result = resolve(&output, "PRD-AUTH", &ResolveOptions::default()).unwrap();
        assert_eq!(ids(&result), vec!["BEH-AUTH", "PRD-CORE"]);
        assert_eq!(result.origin.id, "PRD-AUTH");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_downstream_excludes_parent() {
        let output = chain();
        let options = ResolveOptions {
            depth: 2,
            direction: Direction::Downstream,
            ..ResolveOptions::default()
        };
        let result = resolve(&output, "PRD-AUTH", &options).unwrap();
        assert_eq!(ids(&result), vec!["BEH-AUTH"]);
    }

    #[test]
    fn test_upstream_follows_parents() {
        let output = chain();
        let options = ResolveOptions {
            all: true,
            direction: Direction::Upstream,
            ..ResolveOptions::default()
        };
        let result = resolve(&output, "BEH-AUTH", &options).unwrap();
        assert_eq!(ids(&result), vec!["PRD-AUTH", "PRD-CORE"]);
        assert_eq!(result.stats.max_hop, 2);
        assert_eq!(result.related[1].direction, Direction::Upstream);
    }

    #[test]
    fn test_all_is_unbounded() {
        let mut docs = vec![doc("N0")];
        for i in 1..10 {
            docs.push(doc(&format!("N{i}")).with_parent(format!("N{}", i - 1)));
        }
        let output = build_graph(docs);
        let options = ResolveOptions {
            all: true,
            ..ResolveOptions::default()
        };
        let result = resolve(&output, "N0", &options).unwrap();
        assert_eq!(result.stats.total_found, 9);
        assert_eq!(result.stats.max_hop, 9);
    }

    #[test]
    fn test_relation_allow_list() {
        let output = build_graph(vec![
            doc("A").with_related("B").with_mention("C"),
            doc("B"),
            doc("C"),
        ]);
        let options = ResolveOptions {
            relations: vec![Relation::Related],
            ..ResolveOptions::default()
        };
        let result = resolve(&output, "A", &options).unwrap();
        assert_eq!(ids(&result), vec!["B"]);
        assert_eq!(result.stats.by_relation["related"], 1);
        assert!(!result.stats.by_relation.contains_key("mentions"));
    }

    // ------------------------------------------------------------------------
    // Warning tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_mutual_related_terminates_with_one_warning() {
        let output = build_graph(vec![doc("A").with_related("B"), doc("B").with_related("A")]);
        let options = ResolveOptions {
            depth: 3,
            ..ResolveOptions::default()
        };
        let result = resolve(&output, "A", &options).unwrap();
        assert_eq!(ids(&result), vec!["B"]);
        let cycles: Vec<_> = result
            .warnings
            .iter()
            .filter(|w| w.starts_with("circular reference"))
            .collect();
        assert_eq!(cycles.len(), 1);
        assert!(cycles[0].contains('B'));
    }

    #[test]
    fn test_unindexed_target_warns_document_not_found() {
        let mut output =
            build_graph(vec![doc("A").with_related("B"), doc("B"), doc("C").with_parent("A")]);
        output.node_map.remove("B");
        let result = resolve(&output, "A", &ResolveOptions::default()).unwrap();
        assert_eq!(ids(&result), vec!["C"]);
        assert_eq!(result.warnings, vec!["document not found: B"]);
        assert_eq!(result.stats.total_found, 1);
    }

    #[test]
    fn test_priority_filter_warns_and_is_ignored() {
        let output = chain();
        let options = ResolveOptions {
            priority_filter: true,
            ..ResolveOptions::default()
        };
        let result = resolve(&output, "PRD-AUTH", &options).unwrap();
        assert_eq!(ids(&result), vec!["BEH-AUTH", "PRD-CORE"]);
        assert!(result.warnings[0].contains("not implemented"));
    }

    #[test]
    fn test_cap_at_one_hundred() {
        let mut docs = vec![doc("HUB")];
        for i in 0..150 {
            docs.push(doc(&format!("LEAF-{i:03}")).with_parent("HUB"));
        }
        let output = build_graph(docs);
        let result = resolve(&output, "HUB", &ResolveOptions::default()).unwrap();
        assert_eq!(result.related.len(), MAX_RELATED);
        let truncations = result.warnings.iter().filter(|w| w.contains("truncated")).count();
        assert_eq!(truncations, 1);
    }

    #[test]
    fn test_limit_cannot_exceed_cap() {
        let options = ResolveOptions {
            limit: 500,
            ..ResolveOptions::default()
        };
        assert_eq!(options.effective_limit(), MAX_RELATED);
        let options = ResolveOptions {
            limit: 0,
            ..ResolveOptions::default()
        };
        assert_eq!(options.effective_limit(), 1);
    }

    #[test]
    fn test_ambiguous_origin_warns() {
        let output = build_graph(vec![
            doc("A").with_path("x/readme.md"),
            doc("B").with_path("y/readme.md"),
        ]);
        let result = resolve(&output, "readme.md", &ResolveOptions::default()).unwrap();
        assert_eq!(result.origin.id, "A");
        assert!(result.warnings.iter().any(|w| w.contains("ambiguous path")));
    }

    #[test]
    fn test_unknown_origin_is_error() {
        let output = chain();
        let err = resolve(&output, "nowhere.md", &ResolveOptions::default()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_serialized_shape() {
        let output = chain();
        let result = resolve(&output, "PRD-AUTH", &ResolveOptions::default()).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["origin"]["id"], "PRD-AUTH");
        assert_eq!(json["related"][0]["type"], "behavior");
        assert_eq!(json["related"][0]["direction"], "downstream");
        assert_eq!(json["stats"]["totalFound"], 2);
    }
}
