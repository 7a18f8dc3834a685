//! Free-text mention extraction.
//!
//! A mention is an id-shaped token in the prose of a document body. The
//! extractor only finds candidates; the scanner later keeps the ones that
//! name a document in the same scan.

use regex::Regex;
use std::collections::HashSet;
use trellis_core::{Error, Result};

use crate::markdown::extract_prose;

/// Default pattern for document ids such as `PRD-AUTH` or `TASK-12`.
pub const DEFAULT_MENTION_PATTERN: &str = r"\b[A-Z][A-Z0-9]*-[A-Z0-9][A-Z0-9-]*\b";

/// Finds id-shaped tokens in markdown prose.
#[derive(Clone, Debug)]
pub struct MentionExtractor {
    pattern: Regex,
}

impl MentionExtractor {
    /// Compiles an extractor for the given regex.
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| Error::config(format!("Invalid mention pattern '{pattern}': {e}")))?;
        Ok(Self { pattern })
    }

    /// Returns mention candidates in first-seen order, without duplicates.
    ///
    /// Code blocks are ignored; trailing hyphens are trimmed from matches.
    pub fn extract(&self, body: &str) -> Vec<String> {
        let prose = extract_prose(body);
        let mut seen = HashSet::new();
        self.pattern
            .find_iter(&prose)
            .map(|m| m.as_str().trim_end_matches('-'))
            .filter(|candidate| !candidate.is_empty())
            .filter(|candidate| seen.insert(candidate.to_string()))
            .map(String::from)
            .collect()
    }
}
