//! Front matter stripping.

const DELIMITER: &str = "---";

/// Remove a leading YAML front matter block from Markdown content.
///
/// The block must open on the very first line with `---` and close with a
/// later line starting with `---`. Everything up to and including the closing
/// delimiter is dropped and the remainder is left-trimmed. Content without a
/// closing delimiter is returned unchanged.
pub fn strip_front_matter(source: &str) -> &str {
    let Some(after_open) = source.strip_prefix(DELIMITER) else {
        return source;
    };

    let Some(close_pos) = after_open.find("\n---") else {
        return source;
    };

    let remaining = &after_open[close_pos + 1 + DELIMITER.len()..];
    remaining.trim_start()
}
