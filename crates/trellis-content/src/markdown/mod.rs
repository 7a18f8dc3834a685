//! Markdown parsing and frontmatter extraction utilities.
//!
//! - [`frontmatter`]: YAML frontmatter extraction
//! - [`parser`]: Markdown structure parsing (headings, prose)

pub mod frontmatter;
pub mod parser;

pub use frontmatter::{extract_frontmatter, Frontmatter};
pub use parser::{extract_first_heading, extract_prose};
