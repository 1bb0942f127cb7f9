//! Markdown parser for documentation pages.
//!
//! This crate renders Markdown to HTML, post-processes the output into styled
//! documentation markup (code blocks, diagrams, tables, videos, figures), and
//! derives the metadata the site builder needs: headings, a description and
//! searchable plain text.

pub mod codeblock;
pub mod extract;
pub mod frontmatter;
pub mod highlight;
pub mod parser;
pub mod render;
pub mod transform;

pub use codeblock::{code_label, Language};
pub use highlight::{HighlightError, Highlighter};
pub use parser::{Heading, MarkdownParser, ParseError, ParsedDocument};
pub use render::slugify;
