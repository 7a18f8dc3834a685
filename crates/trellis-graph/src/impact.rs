//! Impact analysis: what would need review if a document changed.
//!
//! A fixed-policy traversal over every relation in both directions, bounded
//! by a hop limit. Each reached document gets a review priority from its
//! distance: hop 1 must be reviewed, hop 2 should be, the rest is
//! informational.

use crate::builder::BuildOutput;
use crate::origin::resolve_origin;
use crate::traversal::{traverse, TraversalParams};
use crate::types::{Adjacency, Direction, GraphNode, Priority, Relation};
use serde::{Deserialize, Serialize};
use trellis_core::Result;

/// Default hop limit.
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Impact analysis settings; the `[impact]` table of the configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactOptions {
    pub max_depth: usize,
}

impl Default for ImpactOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// One affected document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactFinding {
    pub id: String,
    pub hop: usize,
    pub via: Relation,
    pub direction: Direction,
    pub priority: Priority,
}

/// Finding counts per priority.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityCounts {
    pub must_review: usize,
    pub should_review: usize,
    pub informational: usize,
}

impl PriorityCounts {
    fn tally(findings: &[ImpactFinding]) -> Self {
        let mut counts = Self::default();
        for finding in findings {
            match finding.priority {
                Priority::MustReview => counts.must_review += 1,
                Priority::ShouldReview => counts.should_review += 1,
                Priority::Informational => counts.informational += 1,
            }
        }
        counts
    }
}

/// Impact of changing one resolved document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactReport {
    pub origin: GraphNode,
    pub max_depth: usize,
    pub findings: Vec<ImpactFinding>,
    pub counts: PriorityCounts,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Analyses the impact of changing `start_id`.
///
/// Findings are ordered by hop, then id. An id with no adjacency yields no
/// findings.
///
/// # Example
///
/// ```rust
/// use trellis_core::ScannedDocument;
/// use trellis_graph::{analyze, build_graph, Direction, ImpactOptions, Priority};
///
/// let output = build_graph(vec![
///     ScannedDocument::new("PRD-CORE", "prd"),
///     ScannedDocument::new("PRD-AUTH", "prd").with_parent("PRD-CORE"),
/// ]);
/// let findings = analyze("PRD-AUTH", &output.adjacency, &ImpactOptions { max_depth: 1 });
///
/// assert_eq!(findings.len(), 1);
/// assert_eq!(findings[0].id, "PRD-CORE");
/// assert_eq!(findings[0].direction, Direction::Upstream);
/// assert_eq!(findings[0].priority, Priority::MustReview);
/// ```
pub fn analyze(start_id: &str, adjacency: &Adjacency, options: &ImpactOptions) -> Vec<ImpactFinding> {
    let params = TraversalParams {
        direction: Direction::Both,
        relations: &Relation::ALL,
        max_depth: Some(options.max_depth),
        limit: None,
        node_map: None,
    };
    let traversal = traverse(adjacency, start_id, &params);

    traversal
        .sorted_visits()
        .into_iter()
        .map(|visit| ImpactFinding {
            id: visit.id.clone(),
            hop: visit.hop,
            via: visit.via,
            direction: visit.direction,
            priority: Priority::from_hop(visit.hop),
        })
        .collect()
}

/// Resolves `id_or_path` and analyses its impact.
///
/// # Errors
///
/// Returns a not-found error when the origin does not resolve.
pub fn analyze_impact(
    output: &BuildOutput,
    id_or_path: &str,
    options: &ImpactOptions,
) -> Result<ImpactReport> {
    let origin = resolve_origin(output, id_or_path)?;
    let findings = analyze(&origin.node.id, &output.adjacency, options);
    log::debug!(
        "Impact of {}: {} findings within {} hops",
        origin.node.id,
        findings.len(),
        options.max_depth
    );

    Ok(ImpactReport {
        origin: origin.node.clone(),
        max_depth: options.max_depth,
        counts: PriorityCounts::tally(&findings),
        findings,
        warnings: origin.warning.into_iter().collect(),
    })
}

// ============================================================================
// Tests
// ============================================================================
