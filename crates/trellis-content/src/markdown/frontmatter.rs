//! YAML frontmatter: the `---` fenced block at the top of a document.
//!
//! ```markdown
//! ---
//! id: PRD-AUTH
//! type: prd
//! parent: PRD-CORE
//! related:
//!   - ARCH-AUTH
//! ---
//!
//! # Authentication
//! ```
//!
//! Both fences must sit on lines of their own. A file whose first line is
//! not a fence, or whose opening fence is never closed, has no frontmatter
//! and is all body. A closed block that is not a YAML mapping is kept as
//! [`Frontmatter::is_invalid`] so the caller can warn about it.
//!
//! ```rust
//! use trellis_content::markdown::extract_frontmatter;
//!
//! let fm = extract_frontmatter("---\nid: PRD-AUTH\nrelated: ARCH-AUTH\n---\n\nBody");
//!
//! assert_eq!(fm.get_scalar("id").as_deref(), Some("PRD-AUTH"));
//! assert_eq!(fm.get_list("related"), vec!["ARCH-AUTH"]);
//! assert_eq!(fm.body().trim(), "Body");
//! ```

use serde_yaml::{Mapping, Value};

const FENCE: &str = "---";

#[derive(Clone, Debug, PartialEq)]
enum Metadata {
    Absent,
    Invalid,
    Fields(Mapping),
}

/// Metadata block and body of one document.
#[derive(Clone, Debug, PartialEq)]
pub struct Frontmatter<'a> {
    metadata: Metadata,
    body: &'a str,
}

impl<'a> Frontmatter<'a> {
    /// A fenced block was found but is not a YAML mapping.
    pub fn is_invalid(&self) -> bool {
        self.metadata == Metadata::Invalid
    }

    /// Everything after the closing fence, or the whole input.
    pub fn body(&self) -> &'a str {
        self.body
    }

    fn field(&self, key: &str) -> Option<&Value> {
        match &self.metadata {
            Metadata::Fields(map) => map.get(key),
            _ => None,
        }
    }

    /// A scalar field as a trimmed, non-empty string.
    ///
    /// Numbers and booleans keep their YAML spelling, so `status: 1` reads as
    /// `"1"`.
    pub fn get_scalar(&self, key: &str) -> Option<String> {
        self.field(key).and_then(scalar_text)
    }

    /// A field written either as one scalar or as a sequence of scalars.
    ///
    /// Missing, null and non-scalar entries contribute nothing.
    pub fn get_list(&self, key: &str) -> Vec<String> {
        match self.field(key) {
            Some(Value::Sequence(items)) => items.iter().filter_map(scalar_text).collect(),
            Some(other) => scalar_text(other).into_iter().collect(),
            None => Vec::new(),
        }
    }

    /// [`get_list`](Self::get_list) over several spellings of one key,
    /// concatenated in the order given.
    pub fn get_list_any(&self, keys: &[&str]) -> Vec<String> {
        keys.iter().flat_map(|key| self.get_list(key)).collect()
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Splits `content` into frontmatter and body. Never fails.
pub fn extract_frontmatter(content: &str) -> Frontmatter<'_> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let Some((yaml, body)) = split_fences(content) else {
        return Frontmatter {
            metadata: Metadata::Absent,
            body: content,
        };
    };

    let metadata = if yaml.trim().is_empty() {
        Metadata::Fields(Mapping::new())
    } else {
        match serde_yaml::from_str::<Value>(yaml) {
            Ok(Value::Mapping(map)) => Metadata::Fields(map),
            Ok(Value::Null) => Metadata::Fields(Mapping::new()),
            Ok(_) => {
                log::warn!("Frontmatter is not a mapping; ignoring it");
                Metadata::Invalid
            }
            Err(e) => {
                log::warn!("Failed to parse frontmatter YAML: {e}");
                Metadata::Invalid
            }
        }
    };
    Frontmatter { metadata, body }
}

/// Returns `(yaml, body)` when `content` opens with a fence line that is
/// later closed.
fn split_fences(content: &str) -> Option<(&str, &str)> {
    let mut lines = content.split_inclusive('\n');
    let opening = lines.next()?;
    if opening.trim_end() != FENCE {
        return None;
    }

    let yaml_start = opening.len();
    let mut offset = yaml_start;
    for line in lines {
        if line.trim_end() == FENCE {
            return Some((&content[yaml_start..offset], &content[offset + line.len()..]));
        }
        offset += line.len();
    }
    log::debug!("Frontmatter fence opened but never closed");
    None
}

// ============================================================================
// Tests
// ============================================================================
