//! Asset pipeline for the site stylesheet and client script.

use std::fs;
use std::path::Path;

use crate::builder::BuildError;

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the main CSS file.
    pub fn generate_css() -> String {
        DEFAULT_CSS.to_string()
    }

    /// Generate the main JavaScript file.
    pub fn generate_js() -> String {
        DEFAULT_JS.to_string()
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }

    /// Write `assets/docs.css` and `assets/docs.js` under the output directory.
    pub fn write_assets(output_dir: &Path, minify: bool) -> Result<(), BuildError> {
        let assets_dir = output_dir.join("assets");
        fs::create_dir_all(&assets_dir).map_err(|e| BuildError::WriteError(e.to_string()))?;

        let css = Self::generate_css();
        let css = if minify {
            match Self::minify_css(&css) {
                Ok(minified) => minified,
                Err(e) => {
                    tracing::warn!("Serving unminified CSS: {}", e);
                    css
                }
            }
        } else {
            css
        };
        fs::write(assets_dir.join("docs.css"), css)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        fs::write(assets_dir.join("docs.js"), Self::generate_js())
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        tracing::debug!("Wrote assets to {}", assets_dir.display());
        Ok(())
    }
}

const DEFAULT_CSS: &str = r#"/* Docs theme */

:root {
  --color-primary: #2563eb;
  --color-primary-soft: rgba(37, 99, 235, 0.1);
  --color-background: #ffffff;
  --color-surface: #f8fafc;
  --color-border: #e2e8f0;
  --color-text: #0f172a;
  --color-muted: #64748b;
  --color-code-bg: #0f172a;
  --color-code-text: #e2e8f0;
  --font-sans: "Inter", system-ui, -apple-system, sans-serif;
  --font-mono: "JetBrains Mono", ui-monospace, monospace;
  --header-height: 64px;
  --sidebar-width: 280px;
  --toc-width: 220px;
  --content-max-width: 820px;
  --radius: 0.5rem;
}

html.dark {
  --color-background: #0b1120;
  --color-surface: #111827;
  --color-border: #1e293b;
  --color-text: #e2e8f0;
  --color-muted: #94a3b8;
  --color-code-bg: #020617;
}

* {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

body {
  font-family: var(--font-sans);
  background: var(--color-background);
  color: var(--color-text);
  line-height: 1.6;
}

a {
  color: inherit;
}

.hidden {
  display: none !important;
}

.material-symbols-outlined {
  font-size: 20px;
  line-height: 1;
  vertical-align: middle;
}

/* Header */
.docs-header {
  position: sticky;
  top: 0;
  z-index: 40;
  height: var(--header-height);
  background: var(--color-background);
  border-bottom: 1px solid var(--color-border);
}

.docs-header-inner {
  display: flex;
  align-items: center;
  justify-content: space-between;
  height: 100%;
  padding: 0 1.5rem;
}

.docs-header-start,
.docs-header-end {
  display: flex;
  align-items: center;
  gap: 1.5rem;
}

.docs-logo {
  display: flex;
  align-items: center;
  gap: 0.5rem;
  font-weight: 700;
  text-decoration: none;
}

.docs-logo-mark {
  color: var(--color-primary);
  display: flex;
}

.docs-header-nav {
  display: flex;
  gap: 1.25rem;
}

.docs-header-nav a {
  color: var(--color-muted);
  font-size: 0.875rem;
  font-weight: 500;
  text-decoration: none;
}

.docs-header-nav a:hover {
  color: var(--color-primary);
}

.docs-icon-btn {
  display: inline-flex;
  align-items: center;
  justify-content: center;
  padding: 0.5rem;
  background: none;
  border: none;
  border-radius: var(--radius);
  color: var(--color-muted);
  cursor: pointer;
}

.docs-icon-btn:hover {
  background: var(--color-surface);
}

.docs-search-trigger {
  display: flex;
  align-items: center;
  gap: 0.5rem;
  min-width: 260px;
  padding: 0.4rem 0.75rem;
  background: var(--color-surface);
  border: 1px solid var(--color-border);
  border-radius: var(--radius);
  color: var(--color-muted);
  font-size: 0.875rem;
  cursor: pointer;
}

.docs-search-trigger kbd {
  margin-left: auto;
}

kbd {
  font-family: var(--font-mono);
  font-size: 0.7rem;
  padding: 0.1rem 0.35rem;
  border: 1px solid var(--color-border);
  border-radius: 0.25rem;
}

/* Layout */
.docs-layout {
  display: flex;
  min-height: calc(100vh - var(--header-height));
}

.docs-sidebar {
  flex-shrink: 0;
  width: var(--sidebar-width);
  position: sticky;
  top: var(--header-height);
  height: calc(100vh - var(--header-height));
  overflow-y: auto;
  padding: 1.5rem 1rem;
  border-right: 1px solid var(--color-border);
  background: var(--color-background);
}

.docs-sidebar-section {
  margin-bottom: 1.5rem;
}

.docs-sidebar-section-title {
  padding: 0 0.75rem;
  margin-bottom: 0.5rem;
  font-size: 0.7rem;
  font-weight: 700;
  letter-spacing: 0.1em;
  text-transform: uppercase;
  color: var(--color-muted);
}

.docs-sidebar-link,
.docs-api-link {
  display: flex;
  align-items: center;
  gap: 0.6rem;
  padding: 0.45rem 0.75rem;
  border-radius: var(--radius);
  color: var(--color-muted);
  font-size: 0.875rem;
  text-decoration: none;
}

.docs-sidebar-link:hover,
.docs-api-link:hover {
  background: var(--color-surface);
  color: var(--color-text);
}

.docs-sidebar-link.active,
.docs-api-link.active {
  background: var(--color-primary-soft);
  color: var(--color-primary);
  font-weight: 600;
}

.docs-api-version {
  display: flex;
  align-items: center;
  justify-content: space-between;
  padding: 0 0.75rem 1rem;
  font-size: 0.75rem;
  color: var(--color-muted);
}

.docs-badge {
  padding: 0.1rem 0.5rem;
  border-radius: 999px;
  background: var(--color-primary-soft);
  color: var(--color-primary);
  font-family: var(--font-mono);
  font-weight: 600;
}

.docs-api-group summary {
  display: flex;
  align-items: center;
  gap: 0.6rem;
  padding: 0.45rem 0.75rem;
  font-size: 0.875rem;
  font-weight: 600;
  cursor: pointer;
  list-style: none;
}

.docs-api-group .docs-api-link {
  padding-left: 1.5rem;
}

.docs-overlay {
  display: none;
}

.docs-main {
  flex: 1;
  min-width: 0;
  display: flex;
  padding: 2.5rem 3rem;
  gap: 3rem;
}

.docs-main-inner {
  flex: 1;
  min-width: 0;
  max-width: var(--content-max-width);
}

.docs-breadcrumbs {
  display: flex;
  align-items: center;
  gap: 0.35rem;
  margin-bottom: 1rem;
  font-size: 0.8rem;
  color: var(--color-muted);
}

.docs-breadcrumbs a {
  text-decoration: none;
}

.docs-breadcrumbs a:hover {
  color: var(--color-primary);
}

.docs-breadcrumb-current {
  color: var(--color-text);
  font-weight: 500;
}

.docs-breadcrumb-sep {
  font-size: 14px;
}

.docs-page-heading {
  margin-bottom: 2rem;
}

.docs-page-heading h1 {
  font-size: 2.25rem;
  font-weight: 800;
  letter-spacing: -0.02em;
}

.docs-page-heading p {
  margin-top: 0.5rem;
  font-size: 1.1rem;
  color: var(--color-muted);
}

.docs-endpoint-signature {
  display: flex;
  align-items: center;
  gap: 0.75rem;
  margin-bottom: 0.75rem;
  font-family: var(--font-mono);
}

/* Content */
.docs-content h1 {
  font-size: 2rem;
  margin: 2rem 0 1rem;
}

.docs-content h2 {
  font-size: 1.5rem;
  margin: 2.5rem 0 1rem;
  padding-bottom: 0.5rem;
  border-bottom: 1px solid var(--color-border);
  scroll-margin-top: calc(var(--header-height) + 1rem);
}

.docs-content h3,
.docs-content h4 {
  margin: 1.75rem 0 0.75rem;
  scroll-margin-top: calc(var(--header-height) + 1rem);
}

.docs-content p,
.docs-content ul,
.docs-content ol,
.docs-content blockquote {
  margin-bottom: 1rem;
}

.docs-content ul,
.docs-content ol {
  padding-left: 1.5rem;
}

.docs-content a {
  color: var(--color-primary);
  text-underline-offset: 3px;
}

.docs-content blockquote {
  padding: 0.75rem 1rem;
  border-left: 3px solid var(--color-primary);
  background: var(--color-surface);
  border-radius: 0 var(--radius) var(--radius) 0;
}

.docs-content :not(pre) > code {
  font-family: var(--font-mono);
  font-size: 0.85em;
  padding: 0.1rem 0.35rem;
  border-radius: 0.25rem;
  background: var(--color-surface);
  border: 1px solid var(--color-border);
}

.header-anchor {
  margin-left: 0.5rem;
  color: var(--color-muted);
  text-decoration: none;
  opacity: 0;
}

h2:hover .header-anchor,
h3:hover .header-anchor,
h4:hover .header-anchor {
  opacity: 1;
}

/* Code blocks */
.docs-code-block {
  margin-bottom: 1.25rem;
  border-radius: var(--radius);
  border: 1px solid var(--color-border);
  overflow: hidden;
  background: var(--color-code-bg);
}

.docs-code-header {
  display: flex;
  align-items: center;
  justify-content: space-between;
  padding: 0.4rem 1rem;
  border-bottom: 1px solid rgba(148, 163, 184, 0.2);
  font-size: 0.75rem;
  font-weight: 600;
  color: #94a3b8;
}

.docs-copy-btn {
  display: inline-flex;
  align-items: center;
  gap: 0.25rem;
  background: none;
  border: none;
  color: #94a3b8;
  font-size: 0.75rem;
  cursor: pointer;
}

.docs-copy-btn:hover,
.docs-copy-btn.copied {
  color: #4ade80;
}

.docs-code-body pre {
  margin: 0;
  padding: 1rem;
  overflow-x: auto;
  font-family: var(--font-mono);
  font-size: 0.85rem;
  line-height: 1.7;
  color: var(--color-code-text);
}

.hl-comment { color: #64748b; font-style: italic; }
.hl-keyword, .hl-storage { color: #c084fc; }
.hl-string { color: #86efac; }
.hl-constant { color: #fdba74; }
.hl-entity.hl-name { color: #93c5fd; }
.hl-support { color: #67e8f9; }
.hl-variable { color: #e2e8f0; }
.hl-punctuation { color: #94a3b8; }
.hl-invalid { color: #f87171; }

/* Mermaid diagrams */
.docs-mermaid-block {
  position: relative;
  margin-bottom: 1.25rem;
  border: 1px solid var(--color-border);
  border-radius: var(--radius);
  background: var(--color-surface);
  overflow: hidden;
}

.docs-mermaid-toolbar {
  position: absolute;
  top: 0.5rem;
  right: 0.5rem;
  z-index: 1;
  display: flex;
  gap: 0.25rem;
}

.docs-mermaid-toolbar button {
  padding: 0.25rem;
  background: var(--color-background);
  border: 1px solid var(--color-border);
  border-radius: 0.25rem;
  color: var(--color-muted);
  cursor: pointer;
}

.docs-mermaid-content {
  padding: 1.5rem;
  overflow: auto;
  text-align: center;
}

.docs-mermaid-content pre.mermaid {
  display: inline-block;
  transform-origin: top center;
  transition: transform 0.15s;
}

.docs-mermaid-block.fullscreen {
  position: fixed;
  inset: 1rem;
  z-index: 60;
  margin: 0;
}

/* Tables, media */
.docs-table-wrapper {
  margin-bottom: 1.25rem;
  overflow-x: auto;
  border: 1px solid var(--color-border);
  border-radius: var(--radius);
}

.docs-table-wrapper table {
  width: 100%;
  border-collapse: collapse;
  font-size: 0.875rem;
}

.docs-table-wrapper th,
.docs-table-wrapper td {
  padding: 0.6rem 0.9rem;
  border-bottom: 1px solid var(--color-border);
  text-align: left;
  vertical-align: top;
}

.docs-table-wrapper th {
  background: var(--color-surface);
  font-weight: 600;
}

.docs-table-wrapper tr:last-child td {
  border-bottom: none;
}

.docs-video-wrapper {
  position: relative;
  margin-bottom: 1.25rem;
  aspect-ratio: 16 / 9;
  border-radius: var(--radius);
  overflow: hidden;
  background: #000;
}

.docs-video-wrapper iframe,
.docs-video-wrapper video {
  position: absolute;
  inset: 0;
  width: 100%;
  height: 100%;
  border: 0;
}

.docs-figure {
  margin-bottom: 1.25rem;
  text-align: center;
}

.docs-figure figcaption {
  margin-top: 0.5rem;
  font-size: 0.85rem;
  color: var(--color-muted);
}

.docs-content img {
  max-width: 100%;
  border-radius: var(--radius);
}

/* API reference */
.docs-method-badge {
  display: inline-flex;
  align-items: center;
  justify-content: center;
  min-width: 3rem;
  padding: 0.1rem 0.4rem;
  border-radius: 0.25rem;
  font-family: var(--font-mono);
  font-size: 0.65rem;
  font-weight: 700;
  background: rgba(100, 116, 139, 0.12);
  color: #64748b;
}

.docs-method-get { background: rgba(59, 130, 246, 0.12); color: #3b82f6; }
.docs-method-post { background: rgba(16, 185, 129, 0.12); color: #10b981; }
.docs-method-put,
.docs-method-patch { background: rgba(245, 158, 11, 0.12); color: #f59e0b; }
.docs-method-delete { background: rgba(239, 68, 68, 0.12); color: #ef4444; }

.docs-security {
  display: flex;
  align-items: center;
  gap: 0.5rem;
  margin-bottom: 1.5rem;
  font-size: 0.875rem;
  color: var(--color-muted);
}

.docs-param-name {
  font-weight: 600;
}

.docs-param-in,
.docs-param-type {
  margin-left: 0.35rem;
  font-family: var(--font-mono);
  font-size: 0.75rem;
  color: var(--color-muted);
}

.docs-param-required {
  margin-left: 0.35rem;
  font-size: 0.7rem;
  font-weight: 700;
  color: #ef4444;
}

.docs-response {
  margin-bottom: 1rem;
}

.docs-response-header {
  display: flex;
  align-items: center;
  gap: 0.75rem;
  margin-bottom: 0.5rem;
  font-size: 0.875rem;
}

.docs-response-code {
  font-family: var(--font-mono);
  font-weight: 700;
}

.docs-status-2xx .docs-response-code { color: #10b981; }
.docs-status-3xx .docs-response-code { color: #3b82f6; }
.docs-status-4xx .docs-response-code { color: #f59e0b; }
.docs-status-5xx .docs-response-code { color: #ef4444; }

.docs-tryit {
  flex-shrink: 0;
  width: 380px;
  position: sticky;
  top: calc(var(--header-height) + 2.5rem);
  align-self: flex-start;
}

.docs-tryit-title {
  display: block;
  margin-bottom: 0.5rem;
  font-size: 0.75rem;
  font-weight: 700;
  text-transform: uppercase;
  color: var(--color-muted);
}

/* Table of contents */
.docs-toc {
  flex-shrink: 0;
  width: var(--toc-width);
  position: sticky;
  top: var(--header-height);
  align-self: flex-start;
  padding: 2.5rem 1rem;
}

.docs-toc h4 {
  margin-bottom: 0.75rem;
  font-size: 0.7rem;
  font-weight: 700;
  letter-spacing: 0.1em;
  text-transform: uppercase;
  color: var(--color-muted);
}

.docs-toc-link {
  display: block;
  padding: 0.2rem 0;
  border-left: 2px solid transparent;
  font-size: 0.8rem;
  color: var(--color-muted);
  text-decoration: none;
}

.docs-toc-link:hover,
.docs-toc-link.active {
  color: var(--color-primary);
}

.docs-toc-link.active {
  border-left-color: var(--color-primary);
}

/* Pager */
.docs-pager {
  display: flex;
  justify-content: space-between;
  gap: 1rem;
  margin-top: 3rem;
  padding-top: 1.5rem;
  border-top: 1px solid var(--color-border);
}

.docs-pager-link {
  display: flex;
  flex-direction: column;
  gap: 0.25rem;
  padding: 0.75rem 1rem;
  border: 1px solid var(--color-border);
  border-radius: var(--radius);
  text-decoration: none;
}

.docs-pager-link:hover {
  border-color: var(--color-primary);
}

.docs-pager-next {
  align-items: flex-end;
}

.docs-pager-label {
  font-size: 0.75rem;
  color: var(--color-muted);
}

.docs-pager-title {
  font-weight: 600;
}

/* Footer */
.docs-footer {
  border-top: 1px solid var(--color-border);
  padding: 1.5rem;
  font-size: 0.8rem;
  color: var(--color-muted);
}

.docs-footer-inner {
  display: flex;
  justify-content: space-between;
  align-items: center;
}

.docs-footer-copyright {
  display: flex;
  align-items: center;
  gap: 0.35rem;
}

.docs-footer-links {
  display: flex;
  gap: 1rem;
}

.docs-footer-links a {
  text-decoration: none;
}

/* Search modal */
.docs-search-modal {
  position: fixed;
  inset: 0;
  z-index: 70;
  display: flex;
  justify-content: center;
  align-items: flex-start;
  padding-top: 10vh;
  background: rgba(15, 23, 42, 0.5);
  backdrop-filter: blur(4px);
}

.docs-search-dialog {
  width: min(640px, calc(100vw - 2rem));
  max-height: 70vh;
  display: flex;
  flex-direction: column;
  background: var(--color-background);
  border: 1px solid var(--color-border);
  border-radius: 0.75rem;
  overflow: hidden;
}

.docs-search-input-row {
  display: flex;
  align-items: center;
  gap: 0.75rem;
  padding: 1rem 1.25rem;
  border-bottom: 1px solid var(--color-border);
}

.docs-search-input-row input {
  flex: 1;
  background: none;
  border: none;
  outline: none;
  color: var(--color-text);
  font-size: 1rem;
}

.docs-search-results {
  flex: 1;
  overflow-y: auto;
  padding: 0.5rem 0;
}

.docs-search-empty {
  padding: 2rem 1.25rem;
  text-align: center;
  font-size: 0.875rem;
  color: var(--color-muted);
}

.docs-search-section {
  padding: 0.5rem 1.25rem;
}

.docs-search-section h3 {
  margin-bottom: 0.5rem;
  font-size: 0.65rem;
  letter-spacing: 0.15em;
  text-transform: uppercase;
  color: var(--color-muted);
}

.docs-search-result {
  display: flex;
  align-items: center;
  gap: 1rem;
  padding: 0.6rem 0.75rem;
  border-radius: var(--radius);
  text-decoration: none;
}

.docs-search-result.selected,
.docs-search-result:hover {
  background: var(--color-surface);
}

.docs-search-result h4 {
  font-size: 0.875rem;
}

.docs-search-result p {
  font-size: 0.75rem;
  color: var(--color-muted);
  white-space: nowrap;
  overflow: hidden;
  text-overflow: ellipsis;
}

.docs-search-footer {
  display: flex;
  gap: 1.25rem;
  padding: 0.6rem 1.25rem;
  border-top: 1px solid var(--color-border);
  font-size: 0.7rem;
  color: var(--color-muted);
}

/* Responsive */
.docs-mobile-only {
  display: none;
}

@media (max-width: 1200px) {
  .docs-toc,
  .docs-tryit {
    display: none;
  }
}

@media (max-width: 1024px) {
  .docs-mobile-only {
    display: inline-flex;
  }

  .docs-header-nav,
  .docs-search-trigger span,
  .docs-search-trigger kbd {
    display: none;
  }

  .docs-search-trigger {
    min-width: 0;
  }

  .docs-sidebar {
    position: fixed;
    left: 0;
    z-index: 50;
    transform: translateX(-100%);
    transition: transform 0.25s;
  }

  .docs-sidebar.open {
    transform: translateX(0);
  }

  .docs-overlay.open {
    display: block;
    position: fixed;
    inset: 0;
    z-index: 45;
    background: rgba(15, 23, 42, 0.4);
  }

  .docs-main {
    padding: 1.5rem;
  }
}
"#;

const DEFAULT_JS: &str = r##"// Docs runtime
(function () {
  'use strict';

  var THEME_KEY = 'docs-theme';

  function baseUrl() {
    var meta = document.querySelector('meta[name="docs-base-url"]');
    return meta ? meta.content : '';
  }

  function escapeHtml(str) {
    var div = document.createElement('div');
    div.textContent = str == null ? '' : String(str);
    return div.innerHTML;
  }

  // Theme toggle
  function preferredTheme() {
    var stored = localStorage.getItem(THEME_KEY);
    if (stored) {
      return stored;
    }
    return window.matchMedia('(prefers-color-scheme: dark)').matches ? 'dark' : 'light';
  }

  function applyTheme(theme, persist) {
    document.documentElement.classList.toggle('dark', theme === 'dark');
    if (persist) {
      localStorage.setItem(THEME_KEY, theme);
    }
    document.querySelectorAll('[data-theme-toggle]').forEach(function (btn) {
      var light = btn.querySelector('[data-theme-icon="light"]');
      var dark = btn.querySelector('[data-theme-icon="dark"]');
      if (light && dark) {
        light.style.display = theme === 'dark' ? 'none' : '';
        dark.style.display = theme === 'dark' ? '' : 'none';
      }
    });
  }

  function initTheme() {
    applyTheme(preferredTheme(), false);

    document.querySelectorAll('[data-theme-toggle]').forEach(function (btn) {
      btn.addEventListener('click', function () {
        var next = document.documentElement.classList.contains('dark') ? 'light' : 'dark';
        applyTheme(next, true);
        rerenderMermaid(next);
      });
    });

    window.matchMedia('(prefers-color-scheme: dark)').addEventListener('change', function (e) {
      if (!localStorage.getItem(THEME_KEY)) {
        applyTheme(e.matches ? 'dark' : 'light', false);
      }
    });
  }

  // Mermaid diagrams
  function initMermaid() {
    document.querySelectorAll('.docs-mermaid-block').forEach(function (block) {
      var pre = block.querySelector('pre.mermaid');
      if (!pre) {
        return;
      }
      if (!pre.getAttribute('data-mermaid-source')) {
        pre.setAttribute('data-mermaid-source', pre.textContent);
      }

      var scale = 1;
      function zoom(value) {
        scale = Math.min(3, Math.max(0.25, value));
        pre.style.transform = 'scale(' + scale + ')';
      }

      block.querySelector('[data-mermaid-zoom-in]')?.addEventListener('click', function () { zoom(scale + 0.25); });
      block.querySelector('[data-mermaid-zoom-out]')?.addEventListener('click', function () { zoom(scale - 0.25); });
      block.querySelector('[data-mermaid-reset]')?.addEventListener('click', function () { zoom(1); });
      block.querySelector('[data-mermaid-fullscreen]')?.addEventListener('click', function () {
        block.classList.toggle('fullscreen');
      });
    });
  }

  async function rerenderMermaid(theme) {
    if (typeof window.mermaid === 'undefined') {
      return;
    }
    var blocks = document.querySelectorAll('.docs-mermaid-block pre.mermaid');
    window.mermaid.initialize({ startOnLoad: false, theme: theme === 'dark' ? 'dark' : 'default' });
    for (var i = 0; i < blocks.length; i++) {
      var source = blocks[i].getAttribute('data-mermaid-source');
      if (!source) {
        continue;
      }
      try {
        var result = await window.mermaid.render('docs-mermaid-' + i, source);
        blocks[i].innerHTML = result.svg;
      } catch (e) {
        console.warn('Mermaid render failed:', e);
      }
    }
  }

  // Search
  var searchIndex = null;
  var searchOpen = false;
  var selected = 0;

  function loadSearchIndex() {
    if (searchIndex) {
      return Promise.resolve(searchIndex);
    }
    return fetch(baseUrl() + '/search-index.json')
      .then(function (res) { return res.json(); })
      .then(function (data) {
        searchIndex = data;
        return data;
      })
      .catch(function (e) {
        console.warn('Failed to load search index:', e);
        return [];
      });
  }

  function fieldScore(text, terms, weight) {
    if (!text) {
      return 0;
    }
    var haystack = String(text).toLowerCase();
    var score = 0;
    terms.forEach(function (term) {
      if (haystack.indexOf(term) !== -1) {
        score += weight;
      }
    });
    return score;
  }

  function search(query) {
    var terms = query.toLowerCase().split(/\s+/).filter(function (t) { return t.length > 1; });
    if (!terms.length || !searchIndex) {
      return [];
    }
    return searchIndex
      .map(function (item) {
        var score = fieldScore(item.title, terms, 4)
          + fieldScore(item.headings, terms, 3)
          + fieldScore(item.content, terms, 2)
          + fieldScore(item.section, terms, 1);
        return { item: item, score: score };
      })
      .filter(function (r) { return r.score > 0; })
      .sort(function (a, b) { return b.score - a.score; })
      .slice(0, 15);
  }

  function renderResults(query) {
    var container = document.getElementById('docs-search-results');
    if (!container) {
      return;
    }
    if (!query || query.length < 2) {
      container.innerHTML = '<div class="docs-search-empty">Type to search documentation...</div>';
      return;
    }

    var results = search(query);
    selected = 0;
    if (!results.length) {
      container.innerHTML = '<div class="docs-search-empty">No results found.</div>';
      return;
    }

    var grouped = {};
    results.forEach(function (r) {
      var section = r.item.section || 'Documentation';
      (grouped[section] = grouped[section] || []).push(r.item);
    });

    var html = '';
    Object.keys(grouped).forEach(function (section) {
      html += '<section class="docs-search-section"><h3>' + escapeHtml(section) + '</h3>';
      grouped[section].forEach(function (item) {
        html += '<a class="docs-search-result" href="' + escapeHtml(item.url) + '">';
        if (item.type === 'api-endpoint' && item.method) {
          html += '<span class="docs-method-badge docs-method-' + escapeHtml(item.method.toLowerCase()) + '">'
            + escapeHtml(item.method.toUpperCase()) + '</span>';
        } else {
          html += '<span class="material-symbols-outlined">' + escapeHtml(item.icon || 'description') + '</span>';
        }
        html += '<div><h4>' + escapeHtml(item.title) + '</h4>';
        if (item.description) {
          html += '<p>' + escapeHtml(item.description) + '</p>';
        }
        html += '</div></a>';
      });
      html += '</section>';
    });

    container.innerHTML = html;
    highlightResult();
  }

  function highlightResult() {
    document.querySelectorAll('.docs-search-result').forEach(function (el, i) {
      el.classList.toggle('selected', i === selected);
    });
  }

  function openSearch() {
    var modal = document.getElementById('docs-search-modal');
    if (!modal) {
      return;
    }
    searchOpen = true;
    selected = 0;
    modal.classList.remove('hidden');
    modal.querySelector('input')?.focus();
    document.body.style.overflow = 'hidden';
    loadSearchIndex();
  }

  function closeSearch() {
    var modal = document.getElementById('docs-search-modal');
    if (!modal) {
      return;
    }
    searchOpen = false;
    modal.classList.add('hidden');
    document.body.style.overflow = '';
  }

  function initSearch() {
    document.addEventListener('keydown', function (e) {
      if ((e.metaKey || e.ctrlKey) && e.key === 'k') {
        e.preventDefault();
        searchOpen ? closeSearch() : openSearch();
        return;
      }
      if (!searchOpen) {
        return;
      }
      var results = document.querySelectorAll('.docs-search-result');
      if (e.key === 'Escape') {
        closeSearch();
      } else if (e.key === 'ArrowDown') {
        e.preventDefault();
        selected = Math.min(selected + 1, results.length - 1);
        highlightResult();
      } else if (e.key === 'ArrowUp') {
        e.preventDefault();
        selected = Math.max(selected - 1, 0);
        highlightResult();
      } else if (e.key === 'Enter' && results[selected]) {
        e.preventDefault();
        results[selected].click();
      }
    });

    document.querySelectorAll('[data-search-trigger]').forEach(function (btn) {
      btn.addEventListener('click', openSearch);
    });

    var modal = document.getElementById('docs-search-modal');
    modal?.addEventListener('click', function (e) {
      if (e.target === modal) {
        closeSearch();
      }
    });

    var input = document.getElementById('docs-search-input');
    if (input) {
      var timer;
      input.addEventListener('input', function (e) {
        clearTimeout(timer);
        timer = setTimeout(function () {
          loadSearchIndex().then(function () { renderResults(e.target.value); });
        }, 150);
      });
    }
  }

  // Copy code
  function initCopy() {
    document.querySelectorAll('[data-copy-code]').forEach(function (btn) {
      btn.addEventListener('click', async function () {
        var code = btn.closest('.docs-code-block')?.querySelector('code');
        if (!code) {
          return;
        }
        try {
          await navigator.clipboard.writeText(code.textContent);
          var original = btn.innerHTML;
          btn.innerHTML = '<span class="material-symbols-outlined" style="font-size:14px;">check</span><span>Copied!</span>';
          btn.classList.add('copied');
          setTimeout(function () {
            btn.innerHTML = original;
            btn.classList.remove('copied');
          }, 2000);
        } catch (e) {
          console.warn('Copy failed:', e);
        }
      });
    });
  }

  // Table of contents
  function initToc() {
    var links = document.querySelectorAll('.docs-toc-link');
    var headings = [];
    links.forEach(function (link) {
      var id = (link.getAttribute('href') || '').slice(1);
      var el = id && document.getElementById(id);
      if (el) {
        headings.push({ el: el, link: link });
      }
    });
    if (!headings.length) {
      return;
    }

    function update() {
      var offset = window.scrollY + 100;
      var active = 0;
      for (var i = headings.length - 1; i >= 0; i--) {
        if (headings[i].el.offsetTop <= offset) {
          active = i;
          break;
        }
      }
      links.forEach(function (link) { link.classList.remove('active'); });
      headings[active].link.classList.add('active');
    }

    window.addEventListener('scroll', update, { passive: true });
    update();
  }

  function initSmoothScroll() {
    document.querySelectorAll('a[href^="#"]').forEach(function (anchor) {
      anchor.addEventListener('click', function (e) {
        var id = (anchor.getAttribute('href') || '').slice(1);
        var target = id && document.getElementById(id);
        if (target) {
          e.preventDefault();
          target.scrollIntoView({ behavior: 'smooth', block: 'start' });
          history.pushState(null, '', '#' + id);
        }
      });
    });
  }

  // Mobile sidebar
  function initSidebar() {
    var toggle = document.getElementById('docs-mobile-menu-toggle');
    var sidebar = document.getElementById('docs-sidebar');
    var overlay = document.getElementById('docs-mobile-overlay');
    if (!toggle || !sidebar) {
      return;
    }
    toggle.addEventListener('click', function () {
      sidebar.classList.toggle('open');
      overlay?.classList.toggle('open');
    });
    overlay?.addEventListener('click', function () {
      sidebar.classList.remove('open');
      overlay.classList.remove('open');
    });
  }

  function init() {
    initMermaid();
    initTheme();
    initSearch();
    initCopy();
    initToc();
    initSmoothScroll();
    initSidebar();
  }

  if (document.readyState === 'loading') {
    document.addEventListener('DOMContentLoaded', init);
  } else {
    init();
  }
})();
"##;
