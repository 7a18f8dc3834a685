//! Document relationship graph and traversal engine for Trellis.
//!
//! Builds a directed graph of typed relations from scanned document records
//! and answers reachability questions over it:
//!
//! - [`builder`]: records → [`DocumentGraph`] plus adjacency and integrity
//! - [`traversal`]: the shared breadth-first traversal
//! - [`impact`]: hop-ranked impact analysis with review priorities
//! - [`related`]: configurable related-document resolution
//! - [`describe`]: a single node with its edges
//! - [`lint`]: structural findings, including cycle detection
//! - [`render`]: JSON and Mermaid output
//!
//! Everything here is synchronous and free of I/O. A built graph is never
//! mutated, so it can be shared across threads for concurrent queries.
//!
//! # Example
//!
//! ```rust
//! use trellis_core::ScannedDocument;
//! use trellis_graph::{analyze, build_graph, ImpactOptions};
//!
//! let output = build_graph(vec![
//!     ScannedDocument::new("PRD-CORE", "prd"),
//!     ScannedDocument::new("PRD-AUTH", "prd").with_parent("PRD-CORE"),
//!     ScannedDocument::new("TASK-1", "task").with_parent("PRD-AUTH"),
//! ]);
//! let findings = analyze("PRD-CORE", &output.adjacency, &ImpactOptions::default());
//!
//! assert_eq!(findings.len(), 2);
//! assert_eq!(findings[1].id, "TASK-1");
//! assert_eq!(findings[1].hop, 2);
//! ```

pub mod builder;
pub mod describe;
pub mod impact;
pub mod lint;
pub mod origin;
pub mod related;
pub mod render;
pub mod traversal;
pub mod types;

pub use builder::{build_graph, BuildOutput, GraphBuilder, UNKNOWN_FEATURE};
pub use describe::{describe_node, NodeDescription};
pub use impact::{
    analyze, analyze_impact, ImpactFinding, ImpactOptions, ImpactReport, PriorityCounts,
    DEFAULT_MAX_DEPTH,
};
pub use lint::{find_cycles, lint, LintFinding, LintKind, LintReport, Severity};
pub use origin::{resolve_origin, OriginMatch};
pub use related::{
    resolve, DocumentRef, RelatedDocument, RelatedDocuments, RelatedStats, ResolveOptions,
};
pub use render::{to_json, to_mermaid, DEFAULT_MERMAID_EDGE_LIMIT};
pub use traversal::{traverse, Revisit, Traversal, TraversalParams, Visit};
pub use types::{
    Adjacency, Direction, DocType, DocumentGraph, EdgeKey, EdgeSource, GraphEdge, GraphNode,
    GraphStats, IntegrityReport, NodeMap, Priority, Relation, GRAPH_VERSION, MAX_RELATED,
};
