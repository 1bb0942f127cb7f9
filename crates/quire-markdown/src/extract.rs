//! Metadata extraction from rendered HTML.

use std::sync::LazyLock;

use html_escape::decode_html_entities;
use regex::Regex;

use crate::parser::Heading;

const DESCRIPTION_LIMIT: usize = 200;
const PLAIN_TEXT_LIMIT: usize = 1000;
const ELLIPSIS: &str = "...";

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<h([2-4])\s[^>]*?id="([^"]+)"[^>]*>(.*?)</h([1-6])>"#)
        .expect("Invalid heading regex")
});

static PARAGRAPH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<p>(.*?)</p>").expect("Invalid paragraph regex"));

static PRE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<pre[^>]*>.*?</pre>").expect("Invalid pre regex"));

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Collect `<h2>`–`<h4>` headings that carry an id, in document order.
pub fn extract_headings(html: &str) -> Vec<Heading> {
    HEADING_RE
        .captures_iter(html)
        .filter(|caps| caps[1] == caps[4])
        .filter_map(|caps| {
            let level = caps[1].parse::<u8>().ok()?;
            let text = decode_html_entities(&strip_tags(&caps[3]))
                .trim_end_matches(|c: char| c == '#' || c.is_whitespace())
                .trim()
                .to_string();

            Some(Heading {
                id: caps[2].to_string(),
                text,
                level,
            })
        })
        .collect()
}

/// Text of the first paragraph, truncated to 200 characters with an ellipsis.
pub fn extract_description(html: &str) -> String {
    let Some(caps) = PARAGRAPH_RE.captures(html) else {
        return String::new();
    };

    let text = decode_html_entities(&strip_tags(&caps[1])).trim().to_string();
    if text.chars().count() <= DESCRIPTION_LIMIT {
        return text;
    }

    let mut truncated: String = text
        .chars()
        .take(DESCRIPTION_LIMIT - ELLIPSIS.len())
        .collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Searchable text: code blocks dropped, tags stripped, whitespace collapsed.
pub fn to_plain_text(html: &str) -> String {
    let without_code = PRE_RE.replace_all(html, " ");
    let stripped = strip_tags(&without_code);
    let decoded = decode_html_entities(&stripped);
    let collapsed = WHITESPACE_RE.replace_all(&decoded, " ");

    collapsed.trim().chars().take(PLAIN_TEXT_LIMIT).collect()
}

/// Remove every HTML tag, keeping the text between them.
pub fn strip_tags(html: &str) -> String {
    TAG_RE.replace_all(html, "").into_owned()
}
