//! Syntax highlighting backed by syntect.

use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::codeblock::Language;

/// Prefix for the CSS classes emitted around highlighted tokens.
const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "hl-" };

/// Errors that can occur while highlighting a code block.
#[derive(Debug, thiserror::Error)]
pub enum HighlightError {
    #[error("No syntax available for language: {0}")]
    UnsupportedLanguage(String),

    #[error("Highlighting failed: {0}")]
    Syntax(#[from] syntect::Error),
}

/// Class-based syntax highlighter.
///
/// Loading the syntax definitions is the expensive part, so one highlighter
/// is built per parser and shared across every document it parses.
pub struct Highlighter {
    syntaxes: SyntaxSet,
}

impl Highlighter {
    /// Create a highlighter with syntect's bundled syntax definitions.
    pub fn new() -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
        }
    }

    /// Highlight raw (unescaped) source code into HTML span markup.
    pub fn highlight(&self, code: &str, language: &Language) -> Result<String, HighlightError> {
        let token = language.highlight_token();
        let syntax = self
            .syntaxes
            .find_syntax_by_token(&token)
            .ok_or(HighlightError::UnsupportedLanguage(token))?;

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntaxes, CLASS_STYLE);
        for line in LinesWithEndings::from(code) {
            generator.parse_html_for_line_which_includes_newline(line)?;
        }

        Ok(generator.finalize())
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlights_known_language() {
        let highlighter = Highlighter::new();

        let html = highlighter
            .highlight("{\"name\": \"quire\"}\n", &Language::Json)
            .unwrap();

        assert!(html.contains("<span class=\"hl-"));
        assert!(html.contains("quire"));
    }

    #[test]
    fn escapes_markup_in_source() {
        let highlighter = Highlighter::new();

        let html = highlighter
            .highlight("<div class=\"a\"></div>\n", &Language::Html)
            .unwrap();

        assert!(html.contains("&lt;"));
        assert!(!html.contains("<div class=\"a\">"));
    }

    #[test]
    fn rejects_unknown_language() {
        let highlighter = Highlighter::new();

        let result = highlighter.highlight("x", &Language::Other("klingon".to_string()));

        assert!(matches!(result, Err(HighlightError::UnsupportedLanguage(_))));
    }
}
