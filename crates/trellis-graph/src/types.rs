//! Core graph types for Trellis.
//!
//! Nodes are documents, edges are typed relations between them. The graph is
//! plain owned data keyed by document id; traversal reads the [`Adjacency`]
//! index computed once by the builder and never re-derives edges.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use trellis_core::{Error, ScannedDocument};

/// Version tag written into every serialised graph.
pub const GRAPH_VERSION: &str = "1";

/// Hard ceiling on the number of documents one resolver query returns.
pub const MAX_RELATED: usize = 100;

// ============================================================================
// DocType newtype
// ============================================================================

/// Open document type tag (`prd`, `arch`, `task`, ...).
///
/// Not an enum: projects define their own types and unknown ones are kept.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocType(String);

impl DocType {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for DocType {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for DocType {
    fn from(value: String) -> Self {
        Self(value)
    }
}

// ============================================================================
// Relation enum
// ============================================================================

/// Relation carried by an edge.
///
/// # Example
///
/// ```rust
/// use trellis_graph::Relation;
///
/// assert_eq!(Relation::Parent.default_weight(), 1.0);
/// assert_eq!(Relation::Mentions.default_weight(), 0.5);
/// assert_eq!("related".parse::<Relation>().unwrap(), Relation::Related);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    /// `from` governs `to`. Stored parent → child.
    Parent,
    /// `from` declares `to` as related.
    Related,
    /// `from` names `to` in its body text.
    Mentions,
}

impl Relation {
    /// Every relation, in declaration order.
    pub const ALL: [Relation; 3] = [Relation::Parent, Relation::Related, Relation::Mentions];

    /// Informational weight. Never used as a traversal cost.
    pub fn default_weight(self) -> f32 {
        match self {
            Self::Parent | Self::Related => 1.0,
            Self::Mentions => 0.5,
        }
    }

    /// Returns the relation name as serialised.
    pub fn name(self) -> &'static str {
        match self {
            Self::Parent => "parent",
            Self::Related => "related",
            Self::Mentions => "mentions",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Relation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "parent" => Ok(Self::Parent),
            "related" => Ok(Self::Related),
            "mentions" | "mention" => Ok(Self::Mentions),
            other => Err(Error::parse(format!("Unknown relation: {other}"))),
        }
    }
}

// ============================================================================
// EdgeSource enum
// ============================================================================

/// Where an edge was declared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeSource {
    /// Declared in YAML frontmatter.
    #[default]
    Frontmatter,
    /// Found in body text.
    Content,
}

// ============================================================================
// Direction and Priority
// ============================================================================

/// Which adjacency a traversal follows.
///
/// `Upstream` walks incoming edges (towards parents), `Downstream` outgoing
/// edges (towards children, related and mentioned documents).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Upstream,
    Downstream,
    #[default]
    Both,
}

impl Direction {
    pub fn name(self) -> &'static str {
        match self {
            Self::Upstream => "upstream",
            Self::Downstream => "downstream",
            Self::Both => "both",
        }
    }

    pub(crate) fn follows_outgoing(self) -> bool {
        matches!(self, Self::Downstream | Self::Both)
    }

    pub(crate) fn follows_incoming(self) -> bool {
        matches!(self, Self::Upstream | Self::Both)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upstream" | "up" => Ok(Self::Upstream),
            "downstream" | "down" => Ok(Self::Downstream),
            "both" => Ok(Self::Both),
            other => Err(Error::parse(format!("Unknown direction: {other}"))),
        }
    }
}

/// Review priority of an impact finding, derived from its hop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    MustReview,
    ShouldReview,
    Informational,
}

impl Priority {
    /// Hop ≤ 1 must be reviewed, hop 2 should be, anything further is
    /// informational.
    pub fn from_hop(hop: usize) -> Self {
        match hop {
            0 | 1 => Self::MustReview,
            2 => Self::ShouldReview,
            _ => Self::Informational,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::MustReview => "must-review",
            Self::ShouldReview => "should-review",
            Self::Informational => "informational",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

// ============================================================================
// GraphNode
// ============================================================================

/// A document in the graph. Declared fields are kept verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    #[serde(rename = "type")]
    pub doc_type: DocType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<String>,
    pub path: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub owners: Vec<String>,
    #[serde(default)]
    pub parent_ids: Vec<String>,
    #[serde(default)]
    pub related_ids: Vec<String>,
    #[serde(default)]
    pub mention_ids: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl From<ScannedDocument> for GraphNode {
    fn from(doc: ScannedDocument) -> Self {
        Self {
            id: doc.id,
            doc_type: DocType::from(doc.doc_type),
            title: doc.title,
            status: doc.status,
            feature: doc.feature,
            path: doc.path,
            tags: doc.tags,
            owners: doc.owners,
            parent_ids: doc.parent_ids,
            related_ids: doc.related_ids,
            mention_ids: doc.mention_ids,
            warnings: doc.warnings,
        }
    }
}

// ============================================================================
// GraphEdge
// ============================================================================

/// Identity of an edge. Equal keys collapse to one edge.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EdgeKey {
    pub from: String,
    pub to: String,
    pub relation: Relation,
    pub source: EdgeSource,
}

/// A directed, typed edge between two documents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    pub relation: Relation,
    pub source: EdgeSource,
    /// Informational only.
    pub weight: f32,
}

impl GraphEdge {
    /// Creates an edge with the relation's default weight.
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        relation: Relation,
        source: EdgeSource,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            relation,
            source,
            weight: relation.default_weight(),
        }
    }

    pub fn key(&self) -> EdgeKey {
        EdgeKey {
            from: self.from.clone(),
            to: self.to.clone(),
            relation: self.relation,
            source: self.source,
        }
    }
}

// ============================================================================
// Stats and integrity
// ============================================================================

/// Aggregate counts over a built graph.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    pub total_nodes: usize,
    pub total_edges: usize,
    /// Node count per document type.
    pub by_type: BTreeMap<String, usize>,
    /// Node count per feature; documents without one count as `unknown`.
    pub by_feature: BTreeMap<String, usize>,
    /// Valid edge count per relation name.
    pub by_relation: BTreeMap<String, usize>,
    pub dangling_edges: usize,
}

/// Structural defects found while building.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrityReport {
    /// Nodes with no valid incoming or outgoing edge, in node order.
    pub orphan_node_ids: Vec<String>,
    /// Edges with an endpoint outside the node set.
    pub dangling_edges: Vec<GraphEdge>,
}

// ============================================================================
// DocumentGraph
// ============================================================================

/// A built graph snapshot. Immutable once built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentGraph {
    pub version: String,
    pub generated_at: DateTime<Utc>,
    pub nodes: Vec<GraphNode>,
    /// Deduplicated edges whose endpoints both exist.
    pub edges: Vec<GraphEdge>,
    pub stats: GraphStats,
    pub integrity: IntegrityReport,
    /// Scan errors passed through from record supply.
    #[serde(default)]
    pub errors: Vec<String>,
}

impl DocumentGraph {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

// ============================================================================
// Adjacency
// ============================================================================

/// Incoming and outgoing edges per node id.
///
/// Every node of the graph has an entry in both maps, possibly empty.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Adjacency {
    pub incoming: BTreeMap<String, Vec<GraphEdge>>,
    pub outgoing: BTreeMap<String, Vec<GraphEdge>>,
}

impl Adjacency {
    /// Edges pointing into `id`; empty for unknown ids.
    pub fn incoming(&self, id: &str) -> &[GraphEdge] {
        self.incoming.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Edges leaving `id`; empty for unknown ids.
    pub fn outgoing(&self, id: &str) -> &[GraphEdge] {
        self.outgoing.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// No valid edge touches `id`.
    pub fn is_isolated(&self, id: &str) -> bool {
        self.incoming(id).is_empty() && self.outgoing(id).is_empty()
    }
}

/// Node id to position in [`DocumentGraph::nodes`].
pub type NodeMap = HashMap<String, usize>;

// ============================================================================
// Tests
// ============================================================================
