//! Template engine for rendering documentation pages.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use minijinja::Environment;
use serde::Serialize;

use quire_markdown::Heading;
use quire_openapi::{EndpointGroup, Parameter, Response};

use crate::config::{Footer, NavLink, SiteConfig};
use crate::navigation::{PageLink, Section};

/// Errors raised at the renderer boundary.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Failed to render {template}: {message}")]
    Template { template: String, message: String },
}

/// Renders a named template with page view data.
pub trait Renderer: Send + Sync {
    fn render(&self, template: &str, data: &ViewData<'_>) -> Result<String, RenderError>;
}

/// A breadcrumb trail entry. Entries without a URL are not linked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breadcrumb {
    pub title: String,
    pub url: Option<String>,
}

impl Breadcrumb {
    pub fn new(title: impl Into<String>, url: Option<String>) -> Self {
        Self {
            title: title.into(),
            url,
        }
    }
}

/// Data available to every page template.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewData<'a> {
    pub base_url: &'a str,
    pub site_name: &'a str,
    pub site_description: &'a str,
    pub page_title: String,
    pub page_description: String,
    /// Rendered page body HTML
    pub content: String,
    pub navigation: &'a [Section],
    /// Slug of the page being rendered
    pub current_page: String,
    pub table_of_contents: Vec<Heading>,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub prev_page: Option<PageLink>,
    pub next_page: Option<PageLink>,
    pub footer: &'a Footer,
    pub logo: Option<&'a str>,
    pub header_nav: Option<&'a [NavLink]>,
    pub fonts: &'a [String],
    pub theme_overrides: &'a BTreeMap<String, String>,
    /// API sidebar and endpoint data, for the api-reference layout
    #[serde(flatten)]
    pub api: Option<ApiView<'a>>,
}

impl<'a> ViewData<'a> {
    /// Site-wide view data with empty page fields.
    pub fn new(config: &'a SiteConfig, navigation: &'a [Section]) -> Self {
        Self {
            base_url: config.base_url(),
            site_name: &config.site_name,
            site_description: &config.site_description,
            page_title: String::new(),
            page_description: String::new(),
            content: String::new(),
            navigation,
            current_page: String::new(),
            table_of_contents: Vec::new(),
            breadcrumbs: Vec::new(),
            prev_page: None,
            next_page: None,
            footer: &config.footer,
            logo: config.logo.as_deref(),
            header_nav: config.header_nav.as_deref(),
            fonts: &config.fonts,
            theme_overrides: &config.theme,
            api: None,
        }
    }
}

/// API reference data: the shared sidebar plus the selected endpoint, if any.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiView<'a> {
    pub api_endpoints: &'a [EndpointGroup],
    pub tag_icons: &'a BTreeMap<String, String>,
    pub api_version: &'a str,
    pub server_url: &'a str,
    pub endpoint_method: Option<&'a str>,
    pub endpoint_path: Option<&'a str>,
    pub parameters: &'a [Parameter],
    pub responses: Option<&'a BTreeMap<String, Response>>,
    pub security: &'a [String],
    /// Operation id of the selected endpoint
    pub current_endpoint: Option<&'a str>,
    /// Pretty JSON body built from the body parameters' examples
    pub request_example: Option<String>,
}

/// Template engine using minijinja.
///
/// Templates are loaded on first use, from the override directory when it
/// holds a file of the same name, otherwise from the built-in set.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a template engine with the built-in templates.
    pub fn new() -> Self {
        Self::with_overrides(None)
    }

    /// Create a template engine that prefers templates found in `dir`.
    pub fn with_overrides(dir: Option<PathBuf>) -> Self {
        let mut env = Environment::new();

        env.set_loader(move |name| {
            if let Some(dir) = &dir {
                let path = dir.join(name);
                match std::fs::read_to_string(&path) {
                    Ok(source) => return Ok(Some(source)),
                    Err(e) if e.kind() == ErrorKind::NotFound => {}
                    Err(e) => {
                        return Err(minijinja::Error::new(
                            minijinja::ErrorKind::InvalidOperation,
                            format!("could not read template {}", path.display()),
                        )
                        .with_source(e))
                    }
                }
            }
            Ok(builtin_template(name).map(str::to_string))
        });

        Self { env }
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for TemplateEngine {
    fn render(&self, template: &str, data: &ViewData<'_>) -> Result<String, RenderError> {
        let tmpl = self.env.get_template(template).map_err(|e| match e.kind() {
            minijinja::ErrorKind::TemplateNotFound => RenderError::NotFound(template.to_string()),
            _ => RenderError::Template {
                template: template.to_string(),
                message: e.to_string(),
            },
        })?;

        tmpl.render(data).map_err(|e| RenderError::Template {
            template: template.to_string(),
            message: e.to_string(),
        })
    }
}

fn builtin_template(name: &str) -> Option<&'static str> {
    let source = match name {
        "base.html" => BASE_TEMPLATE,
        "documentation.html" => DOCUMENTATION_TEMPLATE,
        "api-reference.html" => API_REFERENCE_TEMPLATE,
        "partials/header.html" => HEADER_PARTIAL,
        "partials/sidebar.html" => SIDEBAR_PARTIAL,
        "partials/toc.html" => TOC_PARTIAL,
        "partials/footer.html" => FOOTER_PARTIAL,
        "partials/search-modal.html" => SEARCH_MODAL_PARTIAL,
        _ => return None,
    };
    Some(source)
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <meta name="docs-base-url" content="{{ baseUrl }}">
  <title>{% if pageTitle %}{{ pageTitle }} - {% endif %}{{ siteName }}</title>
  <meta name="description" content="{{ siteDescription }}">
  {% if fonts %}<link rel="preconnect" href="https://fonts.googleapis.com">
  <link rel="preconnect" href="https://fonts.gstatic.com" crossorigin>
  {% for fontUrl in fonts %}<link href="{{ fontUrl }}" rel="stylesheet">
  {% endfor %}{% endif %}
  {% if themeOverrides %}<style>
    :root {
      {% for property, value in themeOverrides|items %}--{{ property }}: {{ value }};
      {% endfor %}
    }
  </style>{% endif %}
  <link rel="stylesheet" href="{{ baseUrl }}/assets/docs.css">
  <script>
    (function () {
      var theme = localStorage.getItem('docs-theme');
      if (!theme) {
        theme = window.matchMedia('(prefers-color-scheme: dark)').matches ? 'dark' : 'light';
      }
      if (theme === 'dark') {
        document.documentElement.classList.add('dark');
      }
    })();
  </script>
</head>
<body>
  {% include "partials/header.html" %}
  <div class="docs-layout">
    {% block body %}{% endblock %}
  </div>
  {% include "partials/footer.html" %}
  {% include "partials/search-modal.html" %}
  {% if "docs-mermaid-block" in content %}<script type="module">
    import mermaid from 'https://cdn.jsdelivr.net/npm/mermaid@11/dist/mermaid.esm.min.mjs';
    window.mermaid = mermaid;
    mermaid.initialize({
      startOnLoad: true,
      theme: document.documentElement.classList.contains('dark') ? 'dark' : 'default',
    });
  </script>{% endif %}
  <script src="{{ baseUrl }}/assets/docs.js"></script>
</body>
</html>"##;

const DOCUMENTATION_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block body %}
{% include "partials/sidebar.html" %}
<main class="docs-main">
  <div class="docs-main-inner">
    {% if breadcrumbs %}
    <nav class="docs-breadcrumbs">
      {% for crumb in breadcrumbs %}
      {% if not loop.first %}<span class="material-symbols-outlined docs-breadcrumb-sep">chevron_right</span>{% endif %}
      {% if loop.last %}<span class="docs-breadcrumb-current">{{ crumb.title }}</span>
      {% elif crumb.url %}<a href="{{ crumb.url }}">{{ crumb.title }}</a>
      {% else %}<span>{{ crumb.title }}</span>{% endif %}
      {% endfor %}
    </nav>
    {% endif %}

    <div class="docs-page-heading">
      <h1>{{ pageTitle }}</h1>
      {% if pageDescription %}<p>{{ pageDescription }}</p>{% endif %}
    </div>

    <article class="docs-content">
      {{ content|safe }}
    </article>

    {% if prevPage or nextPage %}
    <div class="docs-pager">
      {% if prevPage %}
      <a class="docs-pager-link" href="{{ prevPage.url }}">
        <span class="docs-pager-label">Previous</span>
        <span class="docs-pager-title"><span class="material-symbols-outlined">arrow_back</span> {{ prevPage.title }}</span>
      </a>
      {% else %}<div></div>{% endif %}
      {% if nextPage %}
      <a class="docs-pager-link docs-pager-next" href="{{ nextPage.url }}">
        <span class="docs-pager-label">Next</span>
        <span class="docs-pager-title">{{ nextPage.title }} <span class="material-symbols-outlined">arrow_forward</span></span>
      </a>
      {% else %}<div></div>{% endif %}
    </div>
    {% endif %}
  </div>
</main>
{% include "partials/toc.html" %}
{% endblock %}"##;

const API_REFERENCE_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block body %}
<aside class="docs-sidebar docs-api-sidebar" id="docs-sidebar">
  <div class="docs-api-version">
    <span>Version</span>
    <span class="docs-badge">{{ apiVersion or "v1" }}</span>
  </div>
  <a href="{{ baseUrl }}/api-reference/index.html" class="docs-sidebar-link{% if not currentEndpoint %} active{% endif %}">
    <span class="material-symbols-outlined">home</span><span>Overview</span>
  </a>
  {% if apiEndpoints %}
  <h3 class="docs-sidebar-section-title">Resources</h3>
  {% for group in apiEndpoints %}
  <details class="docs-api-group" open>
    <summary>
      <span class="material-symbols-outlined">{{ tagIcons[group.tag]|default("api") }}</span>
      <span>{{ group.tag }}</span>
    </summary>
    {% for endpoint in group.endpoints %}
    <a href="{{ endpoint.url }}" class="docs-api-link{% if currentEndpoint == endpoint.operationId %} active{% endif %}">
      <span class="docs-method-badge docs-method-{{ endpoint.method|lower }}">{{ endpoint.method }}</span>
      <span>{{ endpoint.summary or endpoint.method ~ " " ~ endpoint.path }}</span>
    </a>
    {% endfor %}
  </details>
  {% endfor %}
  {% endif %}
</aside>

<main class="docs-main docs-api-main">
  <div class="docs-main-inner">
    {% if breadcrumbs %}
    <nav class="docs-breadcrumbs">
      {% for crumb in breadcrumbs %}
      {% if not loop.first %}<span class="docs-breadcrumb-sep">/</span>{% endif %}
      {% if loop.last %}<span class="docs-breadcrumb-current">{{ crumb.title }}</span>
      {% elif crumb.url %}<a href="{{ crumb.url }}">{{ crumb.title }}</a>
      {% else %}<span>{{ crumb.title }}</span>{% endif %}
      {% endfor %}
    </nav>
    {% endif %}

    <div class="docs-page-heading">
      {% if endpointMethod and endpointPath %}
      <div class="docs-endpoint-signature">
        <span class="docs-method-badge docs-method-{{ endpointMethod|lower }}">{{ endpointMethod }}</span>
        <code>{{ endpointPath }}</code>
      </div>
      {% endif %}
      <h1>{{ pageTitle }}</h1>
      {% if pageDescription %}<p>{{ pageDescription }}</p>{% endif %}
    </div>

    <article class="docs-content">
      {{ content|safe }}

      {% if security %}
      <div class="docs-security">
        <span class="material-symbols-outlined">lock</span>
        <span>Requires</span>
        {% for scheme in security %}<code>{{ scheme }}</code>{% endfor %}
      </div>
      {% endif %}

      {% if parameters %}
      <h3>Parameters</h3>
      <div class="docs-table-wrapper">
        <table class="docs-params">
          <thead>
            <tr><th>Parameter</th><th>Type</th><th>Description</th></tr>
          </thead>
          <tbody>
            {% for param in parameters %}
            <tr>
              <td>
                <code class="docs-param-name">{{ param.name }}</code>
                <span class="docs-param-in">{{ param.in }}</span>
                {% if param.required %}<span class="docs-param-required">Required</span>{% endif %}
              </td>
              <td><span class="docs-param-type">{{ param.type }}</span></td>
              <td>{{ param.description }}</td>
            </tr>
            {% endfor %}
          </tbody>
        </table>
      </div>
      {% endif %}

      {% if responses %}
      <h3>Responses</h3>
      <div class="docs-responses">
        {% for code, response in responses|items %}
        <div class="docs-response docs-status-{{ code[:1] }}xx">
          <div class="docs-response-header">
            <span class="docs-response-code">{{ code }}</span>
            <span>{{ response.description }}</span>
          </div>
          {% if response.example %}
          <div class="docs-code-block">
            <div class="docs-code-header"><span>JSON</span><button class="docs-copy-btn" data-copy-code><span class="material-symbols-outlined" style="font-size:14px;">content_copy</span><span>Copy</span></button></div>
            <div class="docs-code-body"><pre class="hl"><code>{{ response.example }}</code></pre></div>
          </div>
          {% endif %}
        </div>
        {% endfor %}
      </div>
      {% endif %}
    </article>
  </div>

  {% if endpointMethod and endpointPath %}
  <aside class="docs-tryit">
    <span class="docs-tryit-title">Request</span>
    <div class="docs-code-block">
      <div class="docs-code-header"><span>cURL</span><button class="docs-copy-btn" data-copy-code><span class="material-symbols-outlined" style="font-size:14px;">content_copy</span><span>Copy</span></button></div>
      <div class="docs-code-body"><pre class="hl"><code>curl --request {{ endpointMethod }} \
  --url {{ serverUrl }}{{ endpointPath }}{% if security %} \
  --header 'Authorization: Bearer &lt;TOKEN&gt;'{% endif %}{% if requestExample %} \
  --header 'Content-Type: application/json' \
  --data '{{ requestExample }}'{% endif %}</code></pre></div>
    </div>
  </aside>
  {% endif %}
</main>
{% endblock %}"##;

const HEADER_PARTIAL: &str = r##"<header class="docs-header">
  <div class="docs-header-inner">
    <div class="docs-header-start">
      <button id="docs-mobile-menu-toggle" class="docs-icon-btn docs-mobile-only" aria-label="Menu">
        <span class="material-symbols-outlined">menu</span>
      </button>
      <a href="{{ baseUrl }}/index.html" class="docs-logo">
        <span class="docs-logo-mark">
          {% if logo %}{{ logo|safe }}{% else %}<svg width="32" height="32" fill="none" viewBox="0 0 48 48" xmlns="http://www.w3.org/2000/svg"><path clip-rule="evenodd" d="M24 0.757355L47.2426 24L24 47.2426L0.757355 24L24 0.757355ZM21 35.7574V12.2426L9.24264 24L21 35.7574Z" fill="currentColor" fill-rule="evenodd"></path></svg>{% endif %}
        </span>
        <span class="docs-logo-text">{{ siteName|replace(" Documentation", "") }}</span>
      </a>
      <nav class="docs-header-nav">
        {% if headerNav %}
        {% for link in headerNav %}<a href="{{ link.url }}">{{ link.title }}</a>{% endfor %}
        {% else %}
        <a href="{{ baseUrl }}/index.html">Guides</a>
        <a href="{{ baseUrl }}/api-reference/index.html">API Reference</a>
        {% endif %}
      </nav>
    </div>
    <div class="docs-header-end">
      <button data-search-trigger class="docs-search-trigger">
        <span class="material-symbols-outlined">search</span>
        <span>Search documentation...</span>
        <kbd>Ctrl K</kbd>
      </button>
      <button data-theme-toggle class="docs-icon-btn" aria-label="Toggle theme">
        <span class="material-symbols-outlined" data-theme-icon="light">light_mode</span>
        <span class="material-symbols-outlined" data-theme-icon="dark" style="display:none;">dark_mode</span>
      </button>
    </div>
  </div>
</header>"##;

const SIDEBAR_PARTIAL: &str = r##"<div id="docs-mobile-overlay" class="docs-overlay"></div>
<aside class="docs-sidebar" id="docs-sidebar">
  {% for section in navigation %}
  <div class="docs-sidebar-section">
    <h3 class="docs-sidebar-section-title">{{ section.title }}</h3>
    {% for page in section.pages %}
    <a href="{{ page.url }}" class="docs-sidebar-link{% if page.slug == currentPage %} active{% endif %}">
      {% if page.icon %}<span class="material-symbols-outlined">{{ page.icon }}</span>{% endif %}
      <span>{{ page.title }}</span>
    </a>
    {% endfor %}
  </div>
  {% endfor %}
</aside>"##;

const TOC_PARTIAL: &str = r##"{% if tableOfContents %}
<aside class="docs-toc">
  <h4>On this page</h4>
  <nav>
    {% for heading in tableOfContents %}
    <a href="#{{ heading.id }}" class="docs-toc-link" style="padding-left: {{ heading.level - 1 }}rem;">{{ heading.text }}</a>
    {% endfor %}
  </nav>
</aside>
{% endif %}"##;

const FOOTER_PARTIAL: &str = r##"<footer class="docs-footer">
  <div class="docs-footer-inner">
    <div class="docs-footer-copyright">
      <span class="material-symbols-outlined">copyright</span>
      <span>{{ footer.copyright }}</span>
    </div>
    {% if footer.links %}
    <div class="docs-footer-links">
      {% for link in footer.links %}<a href="{{ link.url }}">{{ link.title }}</a>{% endfor %}
    </div>
    {% endif %}
  </div>
</footer>"##;

const SEARCH_MODAL_PARTIAL: &str = r##"<div id="docs-search-modal" class="docs-search-modal hidden">
  <div class="docs-search-dialog">
    <div class="docs-search-input-row">
      <span class="material-symbols-outlined">search</span>
      <input id="docs-search-input" type="text" placeholder="Search documentation, APIs, and guides..." autocomplete="off">
    </div>
    <div id="docs-search-results" class="docs-search-results">
      <div class="docs-search-empty">Type to search documentation...</div>
    </div>
    <footer class="docs-search-footer">
      <span><kbd>&uarr;</kbd><kbd>&darr;</kbd> Select</span>
      <span><kbd>Enter</kbd> Open</span>
      <span><kbd>Esc</kbd> Close</span>
    </footer>
  </div>
</div>"##;
