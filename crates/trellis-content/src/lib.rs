//! Document record supply for Trellis.
//!
//! Turns a directory of markdown documents into [`ScannedDocument`] records
//! for the graph builder. This crate knows about files, frontmatter, and
//! prose; it knows nothing about graphs.
//!
//! # Modules
//!
//! - [`markdown`]: Frontmatter extraction and markdown structure parsing
//! - [`mentions`]: Id-shaped token extraction from prose
//! - [`scanner`]: Directory discovery and record construction
//!
//! # Example
//!
//! ```rust
//! use trellis_content::scanner::{parse_document, ScanOptions};
//! use trellis_content::mentions::MentionExtractor;
//!
//! let options = ScanOptions::default();
//! let mentions = MentionExtractor::new(&options.mention_pattern).unwrap();
//! let content = "---\nid: PRD-AUTH\ntype: prd\nparent: PRD-CORE\n---\n\n# Auth\n";
//! let doc = parse_document("product/auth.md", content, &options, &mentions);
//!
//! assert_eq!(doc.id, "PRD-AUTH");
//! assert_eq!(doc.parent_ids, vec!["PRD-CORE"]);
//! assert_eq!(doc.title.as_deref(), Some("Auth"));
//! ```
//!
//! [`ScannedDocument`]: trellis_core::ScannedDocument

pub mod markdown;
pub mod mentions;
pub mod scanner;

pub use markdown::{extract_frontmatter, Frontmatter};
pub use mentions::{MentionExtractor, DEFAULT_MENTION_PATTERN};
pub use scanner::{parse_document, scan_directory, ScanError, ScanOptions, ScanReport};

// Re-export HeadingLevel for convenience
pub use pulldown_cmark::HeadingLevel;
