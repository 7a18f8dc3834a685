//! Origin lookup: find the node a query starts from.
//!
//! A query names its origin by id or by path. Lookup order:
//!
//! 1. exact id,
//! 2. exact stored path,
//! 3. path suffix on a component boundary (`auth.md` matches
//!    `product/auth.md` but not `product/oauth.md`).
//!
//! When several stored paths end with the suffix, the lexicographically
//! smallest wins and the match carries an ambiguity warning.

use crate::builder::BuildOutput;
use crate::types::GraphNode;
use trellis_core::util::ids::{normalize_path, path_has_suffix};
use trellis_core::{Error, Result};

/// A resolved origin.
#[derive(Clone, Debug, PartialEq)]
pub struct OriginMatch<'g> {
    pub node: &'g GraphNode,
    /// Set when a path suffix matched more than one document.
    pub warning: Option<String>,
}

/// Resolves `query` to a node of the graph.
///
/// # Errors
///
/// Returns a not-found error when nothing matches.
pub fn resolve_origin<'g>(output: &'g BuildOutput, query: &str) -> Result<OriginMatch<'g>> {
    let query = query.trim();
    if let Some(node) = output.node(query) {
        return Ok(OriginMatch {
            node,
            warning: None,
        });
    }

    let wanted = normalize_path(query);
    let nodes = &output.graph.nodes;
    if let Some(node) = nodes.iter().find(|n| normalize_path(&n.path) == wanted) {
        return Ok(OriginMatch {
            node,
            warning: None,
        });
    }

    let mut candidates: Vec<&GraphNode> = nodes
        .iter()
        .filter(|n| path_has_suffix(&n.path, &wanted))
        .collect();
    candidates.sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.id.cmp(&b.id)));

    match candidates.as_slice() {
        [] => Err(Error::not_found("document", query)),
        [node] => Ok(OriginMatch {
            node: *node,
            warning: None,
        }),
        [node, ..] => {
            let paths: Vec<&str> = candidates.iter().map(|n| n.path.as_str()).collect();
            log::debug!("Ambiguous origin {query}: {paths:?}");
            Ok(OriginMatch {
                node: *node,
                warning: Some(format!(
                    "ambiguous path '{query}' matches {} documents ({}); using {}",
                    paths.len(),
                    paths.join(", "),
                    node.path
                )),
            })
        }
    }
}
