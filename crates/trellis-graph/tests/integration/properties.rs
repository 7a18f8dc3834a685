//! Property tests for graph invariants.

use crate::common::{arb_documents, build};
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};
use trellis_graph::{traverse, EdgeKey, EdgeSource, Relation, TraversalParams};

proptest! {
    #[test]
    fn test_build_is_idempotent(docs in arb_documents()) {
        let first = build(docs.clone());
        let second = build(docs);
        prop_assert_eq!(&first.graph, &second.graph);
        prop_assert_eq!(&first.adjacency, &second.adjacency);
    }

    #[test]
    fn test_edges_are_unique(docs in arb_documents()) {
        let output = build(docs);
        let integrity = &output.graph.integrity;
        let mut seen = HashSet::new();
        for edge in output.graph.edges.iter().chain(&integrity.dangling_edges) {
            prop_assert!(seen.insert(edge.key()), "duplicate edge {:?}", edge);
        }
    }

    #[test]
    fn test_derived_edges_partition(docs in arb_documents()) {
        let output = build(docs);
        let known: HashSet<&str> = output.graph.nodes.iter().map(|n| n.id.as_str()).collect();

        for edge in &output.graph.edges {
            prop_assert!(known.contains(edge.from.as_str()) && known.contains(edge.to.as_str()));
        }
        for edge in &output.graph.integrity.dangling_edges {
            prop_assert!(!known.contains(edge.from.as_str()) || !known.contains(edge.to.as_str()));
        }

        let mut expected: HashSet<EdgeKey> = HashSet::new();
        for node in &output.graph.nodes {
            for parent in &node.parent_ids {
                expected.insert(key(parent, &node.id, Relation::Parent, EdgeSource::Frontmatter));
            }
            for related in &node.related_ids {
                expected.insert(key(&node.id, related, Relation::Related, EdgeSource::Frontmatter));
            }
            for mention in node.mention_ids.iter().filter(|m| **m != node.id) {
                expected.insert(key(&node.id, mention, Relation::Mentions, EdgeSource::Content));
            }
        }
        let actual: HashSet<EdgeKey> = output
            .graph
            .edges
            .iter()
            .chain(&output.graph.integrity.dangling_edges)
            .map(|e| e.key())
            .collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn test_orphans_have_no_adjacency(docs in arb_documents()) {
        let output = build(docs);
        let orphans: HashSet<&str> = output
            .graph
            .integrity
            .orphan_node_ids
            .iter()
            .map(String::as_str)
            .collect();
        for node in &output.graph.nodes {
            let isolated = output.adjacency.incoming(&node.id).is_empty()
                && output.adjacency.outgoing(&node.id).is_empty();
            prop_assert_eq!(orphans.contains(node.id.as_str()), isolated);
        }
    }

    #[test]
    fn test_adjacency_matches_edges(docs in arb_documents()) {
        let output = build(docs);
        let outgoing: usize = output.adjacency.outgoing.values().map(Vec::len).sum();
        let incoming: usize = output.adjacency.incoming.values().map(Vec::len).sum();
        prop_assert_eq!(outgoing, output.graph.edges.len());
        prop_assert_eq!(incoming, output.graph.edges.len());
    }

    #[test]
    fn test_traversal_visits_each_node_once_at_bfs_hop(
        docs in arb_documents(),
        start in 0..8usize,
        limit in 1..6usize,
    ) {
        let output = build(docs);
        let start = format!("D{start}");
        let params = TraversalParams {
            limit: Some(limit),
            ..TraversalParams::default()
        };
        let traversal = traverse(&output.adjacency, &start, &params);

        prop_assert!(traversal.visits.len() <= limit);
        let mut hops: HashMap<&str, usize> = HashMap::from([(start.as_str(), 0)]);
        for visit in &traversal.visits {
            let parent = if visit.edge.to == visit.id { &visit.edge.from } else { &visit.edge.to };
            let parent_hop = hops.get(parent.as_str()).copied();
            prop_assert_eq!(parent_hop, Some(visit.hop - 1));
            prop_assert!(hops.insert(visit.id.as_str(), visit.hop).is_none());
        }
    }
}

fn key(from: &str, to: &str, relation: Relation, source: EdgeSource) -> EdgeKey {
    EdgeKey {
        from: from.to_string(),
        to: to.to_string(),
        relation,
        source,
    }
}
