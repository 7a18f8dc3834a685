//! GraphBuilder: scanned document records in, [`DocumentGraph`] out.
//!
//! The build is one pass over the complete record list:
//!
//! 1. **Nodes**: one per document. A repeated id overwrites the earlier
//!    node but keeps its position.
//! 2. **Edges**: derived from each node's declared relations, deduplicated
//!    on `(from, to, relation, source)`, first insertion wins.
//! 3. **Partition**: edges with an unknown endpoint are dangling. They are
//!    kept for diagnostics and excluded from `edges` and adjacency.
//! 4. **Index**: incoming/outgoing adjacency, orphans, and stats.
//!
//! The builder has no error conditions.

use crate::types::{
    Adjacency, DocumentGraph, EdgeKey, EdgeSource, GraphEdge, GraphNode, GraphStats,
    IntegrityReport, NodeMap, Relation, GRAPH_VERSION,
};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap, HashSet};
use trellis_core::ScannedDocument;

/// Bucket used in `byFeature` for documents without a feature.
pub const UNKNOWN_FEATURE: &str = "unknown";

// ============================================================================
// Build output
// ============================================================================

/// A built graph together with its lookup structures.
#[derive(Clone, Debug)]
pub struct BuildOutput {
    pub graph: DocumentGraph,
    pub adjacency: Adjacency,
    pub node_map: NodeMap,
}

impl BuildOutput {
    /// Looks up a node by exact id.
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.node_map.get(id).and_then(|&idx| self.graph.nodes.get(idx))
    }
}

// ============================================================================
// GraphBuilder
// ============================================================================

/// Builder for document graphs.
///
/// # Example
///
/// ```rust
/// use trellis_core::ScannedDocument;
/// use trellis_graph::GraphBuilder;
///
/// let docs = vec![
///     ScannedDocument::new("PRD-CORE", "prd"),
///     ScannedDocument::new("PRD-AUTH", "prd").with_parent("PRD-CORE"),
/// ];
/// let output = GraphBuilder::new().build(docs);
///
/// assert_eq!(output.graph.node_count(), 2);
/// assert_eq!(output.graph.edges[0].from, "PRD-CORE");
/// assert_eq!(output.adjacency.incoming("PRD-AUTH").len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct GraphBuilder {
    include_mentions: bool,
    generated_at: Option<DateTime<Utc>>,
    errors: Vec<String>,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self {
            include_mentions: true,
            generated_at: None,
            errors: Vec::new(),
        }
    }
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether body-text mentions become `mentions` edges (default: true).
    pub fn with_mentions(mut self, include: bool) -> Self {
        self.include_mentions = include;
        self
    }

    /// Pins `generatedAt`, for reproducible output.
    pub fn with_generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at);
        self
    }

    /// Scan errors to carry verbatim into the graph's `errors`.
    pub fn with_errors(mut self, errors: impl IntoIterator<Item = String>) -> Self {
        self.errors.extend(errors);
        self
    }

    /// Builds the graph from a complete record list.
    pub fn build(&self, documents: impl IntoIterator<Item = ScannedDocument>) -> BuildOutput {
        let (nodes, node_map) = collect_nodes(documents);
        log::debug!("Graph build: {} nodes", nodes.len());

        let derived = self.derive_edges(&nodes);
        let (edges, dangling): (Vec<_>, Vec<_>) = derived
            .into_iter()
            .partition(|e| node_map.contains_key(&e.from) && node_map.contains_key(&e.to));
        log::debug!(
            "Graph build: {} valid edges, {} dangling",
            edges.len(),
            dangling.len()
        );
        for edge in &dangling {
            log::debug!(
                "Dangling {} edge {} -> {}",
                edge.relation,
                edge.from,
                edge.to
            );
        }

        let adjacency = index_adjacency(&nodes, &edges);
        let orphan_node_ids: Vec<String> = nodes
            .iter()
            .filter(|n| adjacency.is_isolated(&n.id))
            .map(|n| n.id.clone())
            .collect();
        let stats = compute_stats(&nodes, &edges, dangling.len());

        log::info!(
            "Built graph: {} nodes, {} edges, {} dangling, {} orphans",
            stats.total_nodes,
            stats.total_edges,
            stats.dangling_edges,
            orphan_node_ids.len()
        );

        let graph = DocumentGraph {
            version: GRAPH_VERSION.to_string(),
            generated_at: self.generated_at.unwrap_or_else(Utc::now),
            nodes,
            edges,
            stats,
            integrity: IntegrityReport {
                orphan_node_ids,
                dangling_edges: dangling,
            },
            errors: self.errors.clone(),
        };

        BuildOutput {
            graph,
            adjacency,
            node_map,
        }
    }

    fn derive_edges(&self, nodes: &[GraphNode]) -> Vec<GraphEdge> {
        let mut seen: HashSet<EdgeKey> = HashSet::new();
        let mut edges = Vec::new();
        let mut push = |edge: GraphEdge| {
            if seen.insert(edge.key()) {
                edges.push(edge);
            }
        };

        for node in nodes {
            for parent in &node.parent_ids {
                push(GraphEdge::new(
                    parent.as_str(),
                    node.id.as_str(),
                    Relation::Parent,
                    EdgeSource::Frontmatter,
                ));
            }
            for related in &node.related_ids {
                push(GraphEdge::new(
                    node.id.as_str(),
                    related.as_str(),
                    Relation::Related,
                    EdgeSource::Frontmatter,
                ));
            }
            if self.include_mentions {
                for mention in node.mention_ids.iter().filter(|m| **m != node.id) {
                    push(GraphEdge::new(
                        node.id.as_str(),
                        mention.as_str(),
                        Relation::Mentions,
                        EdgeSource::Content,
                    ));
                }
            }
        }
        edges
    }
}

/// Builds a graph with default options.
pub fn build_graph(documents: impl IntoIterator<Item = ScannedDocument>) -> BuildOutput {
    GraphBuilder::new().build(documents)
}

// ============================================================================
// Build phases
// ============================================================================

fn collect_nodes(
    documents: impl IntoIterator<Item = ScannedDocument>,
) -> (Vec<GraphNode>, NodeMap) {
    let mut nodes: Vec<GraphNode> = Vec::new();
    let mut node_map: NodeMap = HashMap::new();

    for doc in documents {
        let node = GraphNode::from(doc);
        match node_map.get(&node.id) {
            Some(&idx) => {
                log::debug!("Duplicate document id {}; later record wins", node.id);
                nodes[idx] = node;
            }
            None => {
                node_map.insert(node.id.clone(), nodes.len());
                nodes.push(node);
            }
        }
    }
    (nodes, node_map)
}

fn index_adjacency(nodes: &[GraphNode], edges: &[GraphEdge]) -> Adjacency {
    let mut adjacency = Adjacency::default();
    for node in nodes {
        adjacency.incoming.insert(node.id.clone(), Vec::new());
        adjacency.outgoing.insert(node.id.clone(), Vec::new());
    }
    for edge in edges {
        adjacency
            .outgoing
            .entry(edge.from.clone())
            .or_default()
            .push(edge.clone());
        adjacency
            .incoming
            .entry(edge.to.clone())
            .or_default()
            .push(edge.clone());
    }
    adjacency
}

fn compute_stats(nodes: &[GraphNode], edges: &[GraphEdge], dangling: usize) -> GraphStats {
    let mut by_type: BTreeMap<String, usize> = BTreeMap::new();
    let mut by_feature: BTreeMap<String, usize> = BTreeMap::new();
    let mut by_relation: BTreeMap<String, usize> = BTreeMap::new();

    for node in nodes {
        *by_type.entry(node.doc_type.to_string()).or_default() += 1;
        let feature = node.feature.as_deref().unwrap_or(UNKNOWN_FEATURE);
        *by_feature.entry(feature.to_string()).or_default() += 1;
    }
    for edge in edges {
        *by_relation.entry(edge.relation.name().to_string()).or_default() += 1;
    }

    GraphStats {
        total_nodes: nodes.len(),
        total_edges: edges.len(),
        by_type,
        by_feature,
        by_relation,
        dangling_edges: dangling,
    }
}

// ============================================================================
// Tests
// ============================================================================
