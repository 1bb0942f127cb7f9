//! HTML post-processing passes.
//!
//! Each pass is a pure `HTML -> HTML` rewrite over the renderer output and
//! runs in a fixed order: mermaid diagrams, code blocks, tables, videos,
//! images. Later passes rely on the markup produced by earlier ones, e.g. the
//! code block pass must not see mermaid fences.

use std::sync::LazyLock;

use html_escape::{decode_html_entities, encode_double_quoted_attribute, encode_text};
use regex::{Captures, Regex};

use crate::codeblock::{code_label, Language};
use crate::highlight::Highlighter;

static MERMAID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<pre><code class="language-mermaid">(.*?)</code></pre>"#)
        .expect("Invalid mermaid regex")
});

static TAGGED_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<pre><code class="language-([^"]+)">(.*?)</code></pre>"#)
        .expect("Invalid code block regex")
});

static PLAIN_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<pre><code>(.*?)</code></pre>").expect("Invalid code block regex")
});

static TABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<table(.*?)</table>").expect("Invalid table regex"));

static AUTOLINK_PARAGRAPH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<p>\s*<a href="(https?://[^"]+)">(https?://[^<]+)</a>\s*</p>"#)
        .expect("Invalid autolink paragraph regex")
});

static YOUTUBE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)([a-zA-Z0-9_-]+)")
        .expect("Invalid YouTube regex")
});

static VIMEO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:vimeo\.com/|player\.vimeo\.com/video/)(\d+)").expect("Invalid Vimeo regex")
});

static VIDEO_FILE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\.(mp4|webm|ogg)(?:\?[^"]*)?$"#).expect("Invalid video file regex")
});

static SOLE_IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<p>\s*(<img\s[^>]*/?>)\s*</p>").expect("Invalid image paragraph regex")
});

static IMG_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<img\s[^>]*>").expect("Invalid image tag regex"));

static ALT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"alt="([^"]*)""#).expect("Invalid alt regex"));

/// Rewrite `mermaid` fences into diagram containers for client-side rendering.
pub fn render_mermaid_blocks(html: &str) -> String {
    MERMAID_RE
        .replace_all(html, |caps: &Captures<'_>| {
            let source = decode_html_entities(&caps[1]);
            format!(
                concat!(
                    r#"<div class="docs-mermaid-block">"#,
                    r#"<div class="docs-mermaid-toolbar">"#,
                    r#"<button data-mermaid-zoom-in title="Zoom in"><span class="material-symbols-outlined">zoom_in</span></button>"#,
                    r#"<button data-mermaid-zoom-out title="Zoom out"><span class="material-symbols-outlined">zoom_out</span></button>"#,
                    r#"<button data-mermaid-reset title="Reset zoom"><span class="material-symbols-outlined">fit_screen</span></button>"#,
                    r#"<button data-mermaid-fullscreen title="Fullscreen"><span class="material-symbols-outlined">fullscreen</span></button>"#,
                    "</div>",
                    r#"<div class="docs-mermaid-content"><pre class="mermaid">{}</pre></div>"#,
                    "</div>"
                ),
                source.trim()
            )
        })
        .into_owned()
}

/// Rewrite every remaining fenced code block into a styled, highlighted block.
pub fn style_code_blocks(html: &str, highlighter: &Highlighter) -> String {
    let html = TAGGED_CODE_RE.replace_all(html, |caps: &Captures<'_>| {
        let language = Language::from_tag(&caps[1]);
        styled_code_block(&caps[2], Some(&language), highlighter)
    });

    PLAIN_CODE_RE
        .replace_all(&html, |caps: &Captures<'_>| {
            styled_code_block(&caps[1], None, highlighter)
        })
        .into_owned()
}

fn styled_code_block(
    escaped: &str,
    language: Option<&Language>,
    highlighter: &Highlighter,
) -> String {
    let decoded = decode_html_entities(escaped);
    let code = decoded.trim();

    let body = match language {
        Some(language) => highlighter.highlight(code, language).unwrap_or_else(|e| {
            tracing::debug!("Falling back to plain code block: {}", e);
            encode_text(code).into_owned()
        }),
        None => encode_text(code).into_owned(),
    };

    format!(
        concat!(
            r#"<div class="docs-code-block">"#,
            r#"<div class="docs-code-header"><span>{label}</span>"#,
            r#"<button class="docs-copy-btn" data-copy-code>"#,
            r#"<span class="material-symbols-outlined" style="font-size:14px;">content_copy</span>"#,
            "<span>Copy</span></button></div>",
            r#"<div class="docs-code-body"><pre class="hl"><code>{body}</code></pre></div>"#,
            "</div>"
        ),
        label = encode_text(&code_label(language)),
        body = body,
    )
}

/// Wrap every table in a horizontally scrollable container.
pub fn wrap_tables(html: &str) -> String {
    TABLE_RE
        .replace_all(html, r#"<div class="docs-table-wrapper"><table$1</table></div>"#)
        .into_owned()
}

/// Recognized embeddable video sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoEmbed {
    YouTube(String),
    Vimeo(String),
    File(String),
}

impl VideoEmbed {
    /// Classify a URL, `None` when it is not a recognized video link.
    pub fn from_url(url: &str) -> Option<Self> {
        if let Some(caps) = YOUTUBE_RE.captures(url) {
            return Some(Self::YouTube(caps[1].to_string()));
        }
        if let Some(caps) = VIMEO_RE.captures(url) {
            return Some(Self::Vimeo(caps[1].to_string()));
        }
        if VIDEO_FILE_RE.is_match(url) {
            return Some(Self::File(url.to_string()));
        }
        None
    }

    /// Responsive embed markup for this video.
    pub fn to_html(&self) -> String {
        let inner = match self {
            Self::YouTube(id) => format!(
                concat!(
                    r#"<iframe src="https://www.youtube-nocookie.com/embed/{}" frameborder="0""#,
                    r#" allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture""#,
                    " allowfullscreen></iframe>"
                ),
                id
            ),
            Self::Vimeo(id) => format!(
                concat!(
                    r#"<iframe src="https://player.vimeo.com/video/{}" frameborder="0""#,
                    r#" allow="autoplay; fullscreen; picture-in-picture" allowfullscreen></iframe>"#
                ),
                id
            ),
            Self::File(url) => format!(
                r#"<video src="{}" controls preload="metadata"></video>"#,
                encode_double_quoted_attribute(url)
            ),
        };

        format!(r#"<div class="docs-video-wrapper">{inner}</div>"#)
    }
}

/// Replace paragraphs holding a single autolinked video URL with an embed.
///
/// Only autolinks qualify: the link text must be the URL itself. Any other
/// link, or a video URL inside running text, is left as is.
pub fn embed_videos(html: &str) -> String {
    AUTOLINK_PARAGRAPH_RE
        .replace_all(html, |caps: &Captures<'_>| {
            let href = decode_html_entities(&caps[1]);
            let text = decode_html_entities(&caps[2]);
            if href != text {
                return caps[0].to_string();
            }

            match VideoEmbed::from_url(&href) {
                Some(embed) => embed.to_html(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Wrap sole-content images in a `<figure>` and lazy-load every image.
pub fn wrap_images(html: &str) -> String {
    let html = SOLE_IMAGE_RE.replace_all(html, |caps: &Captures<'_>| {
        let img = lazy_img(&caps[1]);
        let alt = ALT_RE
            .captures(&img)
            .map(|alt| alt[1].to_string())
            .unwrap_or_default();

        if alt.is_empty() {
            format!(r#"<figure class="docs-figure">{img}</figure>"#)
        } else {
            format!(r#"<figure class="docs-figure">{img}<figcaption>{alt}</figcaption></figure>"#)
        }
    });

    IMG_TAG_RE
        .replace_all(&html, |caps: &Captures<'_>| lazy_img(&caps[0]))
        .into_owned()
}

fn lazy_img(tag: &str) -> String {
    if tag.contains("loading=") {
        tag.to_string()
    } else {
        tag.replacen("<img ", r#"<img loading="lazy" "#, 1)
    }
}
