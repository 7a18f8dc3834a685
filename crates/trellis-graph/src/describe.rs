//! Single-node description: a document with its edges.

use crate::builder::BuildOutput;
use crate::origin::resolve_origin;
use crate::types::{GraphEdge, GraphNode};
use serde::{Deserialize, Serialize};
use trellis_core::Result;

/// A node and its immediate edges, in adjacency order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescription {
    pub node: GraphNode,
    pub incoming: Vec<GraphEdge>,
    pub outgoing: Vec<GraphEdge>,
    pub is_orphan: bool,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Describes the node named by `id_or_path`.
///
/// # Errors
///
/// Returns a not-found error when the origin does not resolve.
pub fn describe_node(output: &BuildOutput, id_or_path: &str) -> Result<NodeDescription> {
    let origin = resolve_origin(output, id_or_path)?;
    let id = origin.node.id.as_str();

    Ok(NodeDescription {
        node: origin.node.clone(),
        incoming: output.adjacency.incoming(id).to_vec(),
        outgoing: output.adjacency.outgoing(id).to_vec(),
        is_orphan: output.adjacency.is_isolated(id),
        warnings: origin.warning.into_iter().collect(),
    })
}
