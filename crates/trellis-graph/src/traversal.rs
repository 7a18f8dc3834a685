//! The breadth-first traversal shared by impact analysis and the related
//! document resolver.
//!
//! One parameterised BFS over [`Adjacency`]. Callers choose the direction,
//! the relations to follow, a depth bound, and a result cap; the traversal
//! reports what it reached and what it refused to re-enter.
//!
//! Visit rules:
//!
//! - Each node is visited at most once, at the hop it was first reached.
//! - Each edge is examined at most once, so under [`Direction::Both`] the
//!   edge that discovered a node is not counted again from its other end.
//! - An examined edge leading to an already visited node is a revisit.
//! - Nodes at the depth bound are reported but not expanded.
//! - Outgoing edges are expanded before incoming ones.

use crate::types::{Adjacency, Direction, EdgeKey, GraphEdge, NodeMap, Relation};
use std::collections::{HashSet, VecDeque};

/// How to walk the graph.
#[derive(Clone, Debug)]
pub struct TraversalParams<'a> {
    pub direction: Direction,
    /// Relations to follow; edges of any other relation are ignored.
    pub relations: &'a [Relation],
    /// Maximum hop to report. `None` is unbounded.
    pub max_depth: Option<usize>,
    /// Maximum number of visits. `None` is unbounded.
    pub limit: Option<usize>,
    /// When set, targets absent from the map are reported missing.
    pub node_map: Option<&'a NodeMap>,
}

impl Default for TraversalParams<'_> {
    fn default() -> Self {
        Self {
            direction: Direction::Both,
            relations: &Relation::ALL,
            max_depth: None,
            limit: None,
            node_map: None,
        }
    }
}

/// A node reached by the traversal.
#[derive(Clone, Debug, PartialEq)]
pub struct Visit {
    pub id: String,
    /// Distance from the start node (start is hop 0 and never reported).
    pub hop: usize,
    /// Relation of the discovering edge.
    pub via: Relation,
    /// `Upstream` when reached over an edge pointing into the frontier node.
    pub direction: Direction,
    /// The discovering edge.
    pub edge: GraphEdge,
}

/// An examined edge whose target had already been visited.
#[derive(Clone, Debug, PartialEq)]
pub struct Revisit {
    pub id: String,
    pub edge: GraphEdge,
}

/// Everything one traversal produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Traversal {
    /// Visits in discovery order (hop ascending).
    pub visits: Vec<Visit>,
    /// First revisit of each node, in the order they happened.
    pub revisited: Vec<Revisit>,
    /// Ids reached over an edge but absent from the node map.
    pub missing: Vec<String>,
    /// The cap stopped the traversal before it was exhausted.
    pub truncated: bool,
}

impl Traversal {
    /// Visits ordered by hop, then id.
    pub fn sorted_visits(&self) -> Vec<&Visit> {
        let mut visits: Vec<&Visit> = self.visits.iter().collect();
        visits.sort_by(|a, b| a.hop.cmp(&b.hop).then_with(|| a.id.cmp(&b.id)));
        visits
    }
}

/// Runs a breadth-first traversal from `start`.
///
/// The start node is never part of the result. A start with no adjacency
/// entry yields an empty traversal.
pub fn traverse(adjacency: &Adjacency, start: &str, params: &TraversalParams<'_>) -> Traversal {
    let mut result = Traversal::default();
    let mut visited: HashSet<String> = HashSet::from([start.to_string()]);
    let mut examined: HashSet<EdgeKey> = HashSet::new();
    let mut revisited: HashSet<String> = HashSet::new();
    let mut missing: HashSet<String> = HashSet::new();
    let mut queue: VecDeque<(String, usize)> = VecDeque::from([(start.to_string(), 0)]);

    'bfs: while let Some((current, hop)) = queue.pop_front() {
        if params.max_depth.is_some_and(|depth| hop >= depth) {
            continue;
        }

        let outgoing = params
            .direction
            .follows_outgoing()
            .then(|| adjacency.outgoing(&current))
            .unwrap_or_default()
            .iter()
            .map(|edge| (edge, &edge.to, Direction::Downstream));
        let incoming = params
            .direction
            .follows_incoming()
            .then(|| adjacency.incoming(&current))
            .unwrap_or_default()
            .iter()
            .map(|edge| (edge, &edge.from, Direction::Upstream));

        for (edge, next, direction) in outgoing.chain(incoming) {
            if !params.relations.contains(&edge.relation) || !examined.insert(edge.key()) {
                continue;
            }
            if visited.contains(next) {
                if revisited.insert(next.clone()) {
                    result.revisited.push(Revisit {
                        id: next.clone(),
                        edge: edge.clone(),
                    });
                }
                continue;
            }
            if params.node_map.is_some_and(|map| !map.contains_key(next)) {
                if missing.insert(next.clone()) {
                    result.missing.push(next.clone());
                }
                continue;
            }
            if params.limit.is_some_and(|limit| result.visits.len() >= limit) {
                result.truncated = true;
                break 'bfs;
            }

            visited.insert(next.clone());
            result.visits.push(Visit {
                id: next.clone(),
                hop: hop + 1,
                via: edge.relation,
                direction,
                edge: edge.clone(),
            });
            queue.push_back((next.clone(), hop + 1));
        }
    }

    result
}

// ============================================================================
// Tests
// ============================================================================
