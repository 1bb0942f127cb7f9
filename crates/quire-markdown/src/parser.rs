//! Markdown document parser.

use std::io::ErrorKind;
use std::path::Path;

use serde::Serialize;

use crate::extract::{extract_description, extract_headings, to_plain_text};
use crate::frontmatter::strip_front_matter;
use crate::highlight::Highlighter;
use crate::render::render_html;
use crate::transform::{
    embed_videos, render_mermaid_blocks, style_code_blocks, wrap_images, wrap_tables,
};

/// A parsed Markdown document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedDocument {
    /// Rendered and post-processed HTML
    pub html: String,

    /// `<h2>`–`<h4>` headings in document order
    pub headings: Vec<Heading>,

    /// First paragraph text, at most 200 characters
    pub description: String,

    /// Searchable text without code, at most 1000 characters
    pub plain_text: String,
}

/// A heading anchor used for the table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// Anchor ID
    pub id: String,
    /// Heading text
    pub text: String,
    /// Heading level (2-4)
    pub level: u8,
}

/// Errors that can occur when parsing a Markdown file.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Converts Markdown into HTML plus the metadata derived from it.
///
/// Holds no per-document state, so one parser can be shared by every page of
/// a build, including across threads.
#[derive(Default)]
pub struct MarkdownParser {
    highlighter: Highlighter,
}

impl MarkdownParser {
    pub fn new() -> Self {
        Self {
            highlighter: Highlighter::new(),
        }
    }

    /// Parse a Markdown file. A missing file yields an empty document.
    pub fn parse_file(&self, path: &Path) -> Result<ParsedDocument, ParseError> {
        match std::fs::read_to_string(path) {
            Ok(source) => Ok(self.parse_str(&source)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("Markdown file not found: {}", path.display());
                Ok(ParsedDocument::default())
            }
            Err(e) => Err(ParseError::Io {
                path: path.display().to_string(),
                source: e,
            }),
        }
    }

    /// Parse Markdown source.
    pub fn parse_str(&self, source: &str) -> ParsedDocument {
        let content = strip_front_matter(source);

        let html = render_html(content);
        let html = render_mermaid_blocks(&html);
        let html = style_code_blocks(&html, &self.highlighter);
        let html = wrap_tables(&html);
        let html = embed_videos(&html);
        let html = wrap_images(&html);

        ParsedDocument {
            headings: extract_headings(&html),
            description: extract_description(&html),
            plain_text: to_plain_text(&html),
            html,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    const GUIDE: &str = r#"---
title: Guide
---

# Getting Started

Welcome to **Quire**, the docs generator.

## Installation

```bash
cargo install quire
```

## Usage

| Flag | Meaning |
|------|---------|
| `-v` | Verbose |

## Usage

![Architecture diagram](arch.png)

```mermaid
graph TD
  A --> B
```
"#;

    #[test]
    fn parses_full_document() {
        let parser = MarkdownParser::new();

        let doc = parser.parse_str(GUIDE);

        assert!(!doc.html.contains("title: Guide"));
        assert!(doc.html.contains(r#"<h1 id="getting-started">"#));
        assert!(doc.html.contains("<span>Terminal</span>"));
        assert!(doc.html.contains(r#"<div class="docs-table-wrapper"><table>"#));
        assert!(doc.html.contains("<figcaption>Architecture diagram</figcaption>"));
        assert!(doc.html.contains(r#"<pre class="mermaid">"#));
        assert_eq!(doc.description, "Welcome to Quire, the docs generator.");

        let ids: Vec<&str> = doc.headings.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["installation", "usage", "usage-1"]);
        assert!(doc.headings.iter().all(|h| h.level == 2));
        assert_eq!(doc.headings[0].text, "Installation");
    }

    #[test]
    fn plain_text_excludes_code() {
        let parser = MarkdownParser::new();

        let doc = parser.parse_str(GUIDE);

        assert!(doc.plain_text.contains("Welcome to Quire"));
        assert!(!doc.plain_text.contains("cargo install"));
        assert!(!doc.plain_text.contains("graph TD"));
    }

    #[test]
    fn parsing_is_idempotent() {
        let parser = MarkdownParser::new();

        assert_eq!(parser.parse_str(GUIDE), parser.parse_str(GUIDE));
    }

    #[test]
    fn embeds_sole_video_link() {
        let parser = MarkdownParser::new();

        let doc = parser.parse_str("https://www.youtube.com/watch?v=dQw4w9WgXcQ\n");

        assert!(doc
            .html
            .contains("https://www.youtube-nocookie.com/embed/dQw4w9WgXcQ"));
    }

    #[test]
    fn keeps_inline_video_link_as_link() {
        let parser = MarkdownParser::new();

        let doc =
            parser.parse_str("Watch https://www.youtube.com/watch?v=dQw4w9WgXcQ for details.\n");

        assert!(!doc.html.contains("<iframe"));
        assert!(doc
            .html
            .contains(r#"<a href="https://www.youtube.com/watch?v=dQw4w9WgXcQ">"#));
    }

    #[test]
    fn inline_image_is_not_a_figure() {
        let parser = MarkdownParser::new();

        let doc = parser.parse_str("Logo ![logo](logo.png) inline.\n");

        assert!(!doc.html.contains("<figure"));
        assert!(doc.html.contains(r#"<img loading="lazy""#));
    }

    #[test]
    fn missing_file_yields_empty_document() {
        let dir = tempdir().unwrap();
        let parser = MarkdownParser::new();

        let doc = parser.parse_file(&dir.path().join("missing.md")).unwrap();

        assert_eq!(doc, ParsedDocument::default());
    }

    #[test]
    fn parses_file_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("page.md");
        std::fs::write(&path, "# Page\n\nHello from disk.\n").unwrap();
        let parser = MarkdownParser::new();

        let doc = parser.parse_file(&path).unwrap();

        assert_eq!(doc.description, "Hello from disk.");
    }

    #[test]
    fn reading_a_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let parser = MarkdownParser::new();

        assert!(parser.parse_file(dir.path()).is_err());
    }
}
