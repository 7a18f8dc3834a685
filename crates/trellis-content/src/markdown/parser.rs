//! Markdown structure parsing utilities.
//!
//! Built on `pulldown-cmark`:
//!
//! - Extract the first heading (used as a title fallback)
//! - Extract prose text with code blocks removed (scanned for mentions)
//!
//! # Example
//!
//! ```rust
//! use trellis_content::markdown::parser::{extract_first_heading, extract_prose};
//! use pulldown_cmark::HeadingLevel;
//!
//! let content = "# Auth\n\nSee PRD-CORE.\n\n```\nPRD-IGNORED\n```";
//!
//! let (level, title) = extract_first_heading(content).unwrap();
//! assert_eq!(level, HeadingLevel::H1);
//! assert_eq!(title, "Auth");
//!
//! let prose = extract_prose(content);
//! assert!(prose.contains("PRD-CORE"));
//! assert!(!prose.contains("PRD-IGNORED"));
//! ```

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

/// First non-empty heading of any level, with inline markup flattened.
pub fn extract_first_heading(content: &str) -> Option<(HeadingLevel, String)> {
    let mut open: Option<(HeadingLevel, String)> = None;

    for event in Parser::new(content) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => open = Some((level, String::new())),
            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, text)) = open.take() {
                    let text = text.trim();
                    if !text.is_empty() {
                        return Some((level, text.to_string()));
                    }
                }
            }
            Event::Text(fragment) | Event::Code(fragment) => {
                if let Some((_, text)) = open.as_mut() {
                    text.push_str(&fragment);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some((_, text)) = open.as_mut() {
                    text.push(' ');
                }
            }
            _ => {}
        }
    }

    None
}

/// Extract the prose of a markdown document.
///
/// Fenced and indented code blocks are dropped; inline code is kept, since
/// documents commonly write ids as `` `PRD-AUTH` ``. Inline fragments of one
/// block are joined as written, so an escaped `PRD\-AUTH` reads back whole.
/// Block boundaries become newlines so tokens from adjacent blocks never run
/// together.
pub fn extract_prose(content: &str) -> String {
    let mut prose = String::new();
    let mut code_depth = 0usize;

    for event in Parser::new_ext(content, Options::ENABLE_TABLES) {
        match event {
            Event::Start(Tag::CodeBlock(_)) => code_depth += 1,
            Event::End(TagEnd::CodeBlock) => code_depth = code_depth.saturating_sub(1),
            Event::Text(text) | Event::Code(text) if code_depth == 0 => prose.push_str(&text),
            Event::SoftBreak | Event::HardBreak => prose.push(' '),
            Event::Start(
                Tag::Paragraph
                | Tag::Heading { .. }
                | Tag::Item
                | Tag::List(_)
                | Tag::BlockQuote(_)
                | Tag::TableCell,
            )
            | Event::End(
                TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item | TagEnd::TableCell,
            ) => break_block(&mut prose),
            _ => {}
        }
    }

    prose
}

fn break_block(prose: &mut String) {
    if !prose.is_empty() && !prose.ends_with(char::is_whitespace) {
        prose.push('\n');
    }
}

// ============================================================================
// Tests
// ============================================================================
