//! Directory scanning: markdown files in, [`ScannedDocument`] records out.
//!
//! Discovery walks the root with `async-walkdir`, skipping hidden and
//! excluded directories. Reads run concurrently with bounded parallelism,
//! but the returned records are always in path order.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_walkdir::{Filtering, WalkDir};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use trellis_core::util::ids::{id_from_path, normalize_path};
use trellis_core::{Error, Result, ScannedDocument};

use crate::markdown::{extract_first_heading, extract_frontmatter};
use crate::mentions::{MentionExtractor, DEFAULT_MENTION_PATTERN};

/// Type assigned to documents whose frontmatter has no `type`.
pub const UNKNOWN_TYPE: &str = "unknown";

/// Scanner settings; the `[scan]` table of the configuration file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    /// File extensions to read, without the dot.
    pub extensions: Vec<String>,
    /// Directory names skipped anywhere in the tree.
    pub exclude_dirs: Vec<String>,
    /// Known document types. Empty accepts every type without warning.
    pub document_types: Vec<String>,
    /// Regex used to find mention candidates in prose.
    pub mention_pattern: String,
    /// Maximum number of files read at once.
    pub concurrency: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extensions: vec!["md".to_string()],
            exclude_dirs: vec!["node_modules".to_string(), "target".to_string()],
            document_types: ["prd", "arch", "behavior", "task", "adr"]
                .into_iter()
                .map(String::from)
                .collect(),
            mention_pattern: DEFAULT_MENTION_PATTERN.to_string(),
            concurrency: 16,
        }
    }
}

impl ScanOptions {
    fn accepts_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    fn is_known_type(&self, doc_type: &str) -> bool {
        self.document_types.is_empty()
            || self
                .document_types
                .iter()
                .any(|t| t.eq_ignore_ascii_case(doc_type))
    }
}

/// A file that could not be turned into a record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanError {
    /// Path relative to the scan root.
    pub path: String,
    pub message: String,
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Everything one scan produced.
#[derive(Clone, Debug, Default)]
pub struct ScanReport {
    /// Records in path order.
    pub documents: Vec<ScannedDocument>,
    pub errors: Vec<ScanError>,
}

impl ScanReport {
    /// Errors rendered as `path: message`, the form the graph carries.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

/// Builds a record from one file's content.
///
/// Never fails: missing or malformed metadata is recorded in the record's
/// `warnings`. Mentions are returned unfiltered; [`scan_directory`] narrows
/// them to ids present in the scan.
pub fn parse_document(
    path: &str,
    content: &str,
    options: &ScanOptions,
    mentions: &MentionExtractor,
) -> ScannedDocument {
    let path = normalize_path(path);
    let mut warnings = Vec::new();

    let frontmatter = extract_frontmatter(content);
    if frontmatter.is_invalid() {
        warnings.push("invalid frontmatter; metadata ignored".to_string());
    }

    let id = match frontmatter.get_scalar("id") {
        Some(id) => id,
        None => {
            let id = id_from_path(Path::new(&path)).unwrap_or_else(|| path.clone());
            warnings.push(format!("missing id; using file name '{id}'"));
            id
        }
    };

    let doc_type = match frontmatter.get_scalar("type") {
        Some(doc_type) => {
            if !options.is_known_type(&doc_type) {
                warnings.push(format!("unknown type '{doc_type}'"));
            }
            doc_type
        }
        None => {
            warnings.push(format!("missing type; using '{UNKNOWN_TYPE}'"));
            UNKNOWN_TYPE.to_string()
        }
    };

    let body = frontmatter.body();
    let title = frontmatter
        .get_scalar("title")
        .or_else(|| extract_first_heading(body).map(|(_, text)| text));

    ScannedDocument {
        id,
        doc_type,
        parent_ids: frontmatter.get_list_any(&["parent", "parents"]),
        related_ids: frontmatter.get_list("related"),
        mention_ids: mentions.extract(body),
        feature: frontmatter.get_scalar("feature"),
        title,
        status: frontmatter.get_scalar("status"),
        tags: frontmatter.get_list("tags"),
        owners: frontmatter.get_list_any(&["owner", "owners"]),
        path,
        warnings,
    }
}

/// Scans `root` for documents.
///
/// Fails only when the root itself is unusable or the mention pattern does
/// not compile. Per-file problems end up in [`ScanReport::errors`].
pub async fn scan_directory(root: &Path, options: &ScanOptions) -> Result<ScanReport> {
    let metadata = tokio::fs::metadata(root)
        .await
        .map_err(|e| Error::io_with_path(e, root))?;
    if !metadata.is_dir() {
        return Err(Error::config(format!(
            "Scan root is not a directory: {}",
            root.display()
        )));
    }
    let mentions = MentionExtractor::new(&options.mention_pattern)?;

    let mut report = ScanReport::default();
    let files = discover_files(root, options, &mut report.errors).await;
    log::debug!("Discovered {} candidate files under {}", files.len(), root.display());

    let reads: Vec<(PathBuf, std::io::Result<String>)> = stream::iter(files)
        .map(|path| async move {
            let content = tokio::fs::read_to_string(&path).await;
            (path, content)
        })
        .buffered(options.concurrency.max(1))
        .collect()
        .await;

    for (path, content) in reads {
        let relative = relative_path(root, &path);
        match content {
            Ok(content) => {
                let doc = parse_document(&relative, &content, options, &mentions);
                for warning in &doc.warnings {
                    log::debug!("{relative}: {warning}");
                }
                report.documents.push(doc);
            }
            Err(e) => {
                log::warn!("Failed to read {relative}: {e}");
                report.errors.push(ScanError {
                    path: relative,
                    message: e.to_string(),
                });
            }
        }
    }

    retain_known_mentions(&mut report.documents);
    log::info!(
        "Scanned {} documents ({} errors) under {}",
        report.documents.len(),
        report.errors.len(),
        root.display()
    );
    Ok(report)
}

async fn discover_files(
    root: &Path,
    options: &ScanOptions,
    errors: &mut Vec<ScanError>,
) -> Vec<PathBuf> {
    let excluded = Arc::new(options.exclude_dirs.clone());
    let mut entries = WalkDir::new(root).filter(move |entry| {
        let excluded = Arc::clone(&excluded);
        async move {
            let is_dir = entry
                .file_type()
                .await
                .map(|t| t.is_dir())
                .unwrap_or(false);
            let name = entry.file_name().to_string_lossy().into_owned();
            if is_dir && (name.starts_with('.') || excluded.contains(&name)) {
                Filtering::IgnoreDir
            } else {
                Filtering::Continue
            }
        }
    });

    let mut files = Vec::new();
    while let Some(entry) = entries.next().await {
        match entry {
            Ok(entry) => {
                let path = entry.path();
                let is_file = entry
                    .file_type()
                    .await
                    .map(|t| t.is_file())
                    .unwrap_or(false);
                if is_file && options.accepts_extension(&path) {
                    files.push(path);
                }
            }
            Err(e) => {
                log::warn!("Directory walk error under {}: {e}", root.display());
                errors.push(ScanError {
                    path: normalize_path(&root.to_string_lossy()),
                    message: e.to_string(),
                });
            }
        }
    }
    files.sort();
    files
}

fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    normalize_path(&relative.to_string_lossy())
}

fn retain_known_mentions(documents: &mut [ScannedDocument]) {
    let known: HashSet<String> = documents.iter().map(|d| d.id.clone()).collect();
    for doc in documents.iter_mut() {
        doc.mention_ids.retain(|id| known.contains(id));
    }
}

// ============================================================================
// Tests
// ============================================================================
