//! The document record exchanged between the scanner and the graph builder.
//!
//! A `ScannedDocument` is one already-parsed document: its identity, its
//! declared relations, the ids it mentions in free text, and descriptive
//! metadata. The graph builder trusts a list of these to be complete for one
//! scan; it does not validate id uniqueness.

use serde::{Deserialize, Serialize};

/// One parsed document, as produced by a document record supplier.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannedDocument {
    /// Unique identifier (e.g., "PRD-AUTH").
    pub id: String,
    /// Open document type tag (e.g., "prd", "task").
    #[serde(rename = "type")]
    pub doc_type: String,
    /// Ids of documents that govern this one.
    #[serde(default)]
    pub parent_ids: Vec<String>,
    /// Ids of documents this one declares as related.
    #[serde(default)]
    pub related_ids: Vec<String>,
    /// Ids mentioned in the body text.
    #[serde(default)]
    pub mention_ids: Vec<String>,
    /// Optional feature grouping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<String>,
    /// Optional human-readable title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Optional lifecycle status (e.g., "draft").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Owners responsible for the document.
    #[serde(default)]
    pub owners: Vec<String>,
    /// Stored path, relative to the scan root, using `/` separators.
    pub path: String,
    /// Non-fatal observations made while producing this record.
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl ScannedDocument {
    /// Creates a record with the given id and type and no relations.
    ///
    /// The path defaults to `<id>.md`.
    pub fn new(id: impl Into<String>, doc_type: impl Into<String>) -> Self {
        let id = id.into();
        let path = format!("{id}.md");
        Self {
            id,
            doc_type: doc_type.into(),
            path,
            ..Self::default()
        }
    }

    /// Sets the stored path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Adds a parent id.
    pub fn with_parent(mut self, id: impl Into<String>) -> Self {
        self.parent_ids.push(id.into());
        self
    }

    /// Adds a related id.
    pub fn with_related(mut self, id: impl Into<String>) -> Self {
        self.related_ids.push(id.into());
        self
    }

    /// Adds a mentioned id.
    pub fn with_mention(mut self, id: impl Into<String>) -> Self {
        self.mention_ids.push(id.into());
        self
    }

    /// Sets the feature.
    pub fn with_feature(mut self, feature: impl Into<String>) -> Self {
        self.feature = Some(feature.into());
        self
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the status.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Records a non-fatal warning.
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }
}
