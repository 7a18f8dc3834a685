//! Shared fixtures for graph integration tests.

use chrono::{DateTime, Utc};
use proptest::prelude::*;
use trellis_core::ScannedDocument;
use trellis_graph::{BuildOutput, GraphBuilder};

/// A fixed build timestamp so snapshots compare equal.
pub fn fixed_time() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2025-06-01T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

/// Builds with a fixed timestamp.
pub fn build(docs: Vec<ScannedDocument>) -> BuildOutput {
    GraphBuilder::new().with_generated_at(fixed_time()).build(docs)
}

/// A small product tree:
///
/// ```text
/// PRD-CORE ─parent→ PRD-AUTH ─parent→ BEH-AUTH ─parent→ TASK-1
///                   PRD-AUTH ─related→ ARCH-AUTH
///                   TASK-1   ─mentions→ ARCH-AUTH
/// ```
pub fn product_tree() -> Vec<ScannedDocument> {
    vec![
        ScannedDocument::new("PRD-CORE", "prd").with_path("product/core.md"),
        ScannedDocument::new("PRD-AUTH", "prd")
            .with_path("product/auth.md")
            .with_parent("PRD-CORE")
            .with_related("ARCH-AUTH")
            .with_feature("auth"),
        ScannedDocument::new("ARCH-AUTH", "arch")
            .with_path("arch/auth.md")
            .with_feature("auth"),
        ScannedDocument::new("BEH-AUTH", "behavior")
            .with_path("behavior/auth-login.md")
            .with_parent("PRD-AUTH"),
        ScannedDocument::new("TASK-1", "task")
            .with_path("tasks/task-1.md")
            .with_parent("BEH-AUTH")
            .with_mention("ARCH-AUTH"),
    ]
}

fn id_list(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec((0..max).prop_map(|i| format!("D{i}")), 0..3)
}

/// Random records over ids `D0..D7`, referencing `D0..D9` so some edges
/// dangle. Ids may repeat.
pub fn arb_documents() -> impl Strategy<Value = Vec<ScannedDocument>> {
    let doc = (0..8usize, id_list(10), id_list(10), id_list(10)).prop_map(
        |(id, parents, related, mentions)| {
            let mut doc = ScannedDocument::new(format!("D{id}"), "prd");
            doc.parent_ids = parents;
            doc.related_ids = related;
            doc.mention_ids = mentions;
            doc
        },
    );
    prop::collection::vec(doc, 0..12)
}
