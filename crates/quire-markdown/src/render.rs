//! Markdown to HTML rendering.
//!
//! Wraps pulldown-cmark with two event-stream passes: GFM literal autolinks
//! and heading permalinks with stable ids.

use std::collections::HashSet;
use std::sync::LazyLock;

use pulldown_cmark::{
    html, CowStr, Event, LinkType, Options, Parser, Tag, TagEnd, TextMergeStream,
};
use regex::Regex;

/// Deepest heading level that receives an id and permalink.
const MAX_ANCHORED_LEVEL: u8 = 4;

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:https?://|www\.)[^\s<]+").expect("Invalid autolink regex")
});

/// Render Markdown to HTML.
pub fn render_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    let events: Vec<Event<'_>> =
        TextMergeStream::new(Parser::new_ext(markdown, options)).collect();
    let events = autolink_urls(events);
    let events = anchor_headings(events);

    let mut html_output = String::new();
    html::push_html(&mut html_output, events.into_iter());
    html_output
}

/// Turn bare URLs in text into links, outside of links, images and code.
fn autolink_urls(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut output = Vec::with_capacity(events.len());
    let mut opaque_depth = 0usize;

    for event in events {
        match event {
            Event::Start(Tag::Link { .. } | Tag::Image { .. } | Tag::CodeBlock(_)) => {
                opaque_depth += 1;
                output.push(event);
            }
            Event::End(TagEnd::Link | TagEnd::Image | TagEnd::CodeBlock) => {
                opaque_depth = opaque_depth.saturating_sub(1);
                output.push(event);
            }
            Event::Text(text) if opaque_depth == 0 && URL_RE.is_match(&text) => {
                split_urls(&text, &mut output);
            }
            other => output.push(other),
        }
    }

    output
}

/// Emit text with every URL in it wrapped in an autolink.
fn split_urls(text: &str, output: &mut Vec<Event<'_>>) {
    let mut last = 0;

    for found in URL_RE.find_iter(text) {
        let url = trim_url(found.as_str());
        if url.is_empty() {
            continue;
        }

        let start = found.start();
        let end = start + url.len();
        if start > last {
            output.push(Event::Text(CowStr::from(text[last..start].to_string())));
        }

        let dest = if url.starts_with("www.") {
            format!("http://{url}")
        } else {
            url.to_string()
        };

        output.push(Event::Start(Tag::Link {
            link_type: LinkType::Autolink,
            dest_url: CowStr::from(dest),
            title: CowStr::Borrowed(""),
            id: CowStr::Borrowed(""),
        }));
        output.push(Event::Text(CowStr::from(url.to_string())));
        output.push(Event::End(TagEnd::Link));
        last = end;
    }

    if last < text.len() {
        output.push(Event::Text(CowStr::from(text[last..].to_string())));
    }
}

/// Drop trailing punctuation and unbalanced closing parentheses from a URL.
fn trim_url(url: &str) -> &str {
    let mut url = url;
    loop {
        let Some(last) = url.chars().last() else {
            return url;
        };

        let trimmed = match last {
            '.' | ',' | ':' | ';' | '!' | '?' | '*' | '_' | '~' | '\'' | '"' => true,
            ')' => url.matches(')').count() > url.matches('(').count(),
            _ => false,
        };

        if !trimmed {
            return url;
        }
        url = &url[..url.len() - last.len_utf8()];
    }
}

/// Give headings up to level 4 an id and an appended permalink anchor.
fn anchor_headings(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut output = Vec::with_capacity(events.len());
    let mut issued: HashSet<String> = HashSet::new();
    let mut iter = events.into_iter();

    while let Some(event) = iter.next() {
        let (level, id, classes, attrs) = match event {
            Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            }) => (level, id, classes, attrs),
            other => {
                output.push(other);
                continue;
            }
        };

        // Buffer the heading body so its text is known before the start tag is emitted.
        let mut body = Vec::new();
        let mut text = String::new();
        for inner in iter.by_ref() {
            match &inner {
                Event::End(TagEnd::Heading(_)) => break,
                Event::Text(t) | Event::Code(t) => text.push_str(t),
                _ => {}
            }
            body.push(inner);
        }

        if level as u8 > MAX_ANCHORED_LEVEL {
            output.push(Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            }));
            output.extend(body);
            output.push(Event::End(TagEnd::Heading(level)));
            continue;
        }

        let anchor = match id {
            Some(explicit) => {
                issued.insert(explicit.to_string());
                explicit.to_string()
            }
            None => unique_slug(&slugify(&text), &mut issued),
        };

        output.push(Event::Start(Tag::Heading {
            level,
            id: Some(CowStr::from(anchor.clone())),
            classes,
            attrs,
        }));
        output.extend(body);
        output.push(Event::InlineHtml(CowStr::from(format!(
            r##"<a href="#{anchor}" class="header-anchor" aria-hidden="true" title="Permalink">#</a>"##
        ))));
        output.push(Event::End(TagEnd::Heading(level)));
    }

    output
}

/// Suffix repeated slugs with `-1`, `-2`, ... so ids stay unique per document.
fn unique_slug(slug: &str, issued: &mut HashSet<String>) -> String {
    let base = if slug.is_empty() { "section" } else { slug };
    let mut anchor = base.to_string();
    let mut suffix = 1;
    while issued.contains(&anchor) {
        anchor = format!("{base}-{suffix}");
        suffix += 1;
    }
    issued.insert(anchor.clone());
    anchor
}

/// Convert heading text to a kebab-case anchor.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|c| *c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
