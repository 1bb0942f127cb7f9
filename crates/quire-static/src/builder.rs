//! Static site builder.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use walkdir::WalkDir;

use quire_markdown::{MarkdownParser, ParsedDocument};
use quire_openapi::{ApiSpec, Endpoint, EndpointGroup, OpenApiParser, ParameterLocation, SpecSource};

use crate::config::{Layout, SiteConfig};
use crate::navigation::{output_path, FlatPage, Navigation};
use crate::search::{PageEntry, SearchIndexBuilder};
use crate::templates::{ApiView, Breadcrumb, Renderer, TemplateEngine, ViewData};

const ASSETS_DIR: &str = "assets";
const SEARCH_INDEX_FILE: &str = "search-index.json";
const SITE_NAME_PLACEHOLDER: &str = "{SiteName}";
const API_REFERENCE_SLUG: &str = "api-reference";
const API_REFERENCE_TITLE: &str = "API Reference";

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildSummary {
    /// Number of pages written, documentation and endpoint pages alike
    pub pages: usize,

    /// Number of search index entries
    pub search_entries: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read: {0}")]
    ReadError(String),

    #[error("Failed to parse Markdown: {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Failed to load OpenAPI document: {0}")]
    OpenApiError(String),

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// A documentation page rendered but not yet written.
struct RenderedPage<'n> {
    page: &'n FlatPage,
    doc: ParsedDocument,
    html: String,
}

/// Sidebar data shared by the API overview and every endpoint page.
struct ApiSidebar {
    groups: Vec<EndpointGroup>,
    tag_icons: BTreeMap<String, String>,
    version: String,
    server_url: String,
}

impl ApiSidebar {
    /// `filter` selects and orders the groups by tag; empty keeps every group.
    fn new(spec: &ApiSpec, filter: &[String]) -> Self {
        let groups = if filter.is_empty() {
            spec.groups.clone()
        } else {
            filter
                .iter()
                .filter_map(|tag| spec.group(tag).cloned())
                .collect()
        };

        Self {
            groups,
            tag_icons: spec.tag_icons.clone(),
            version: spec.info.version.clone(),
            server_url: spec.server_url.clone(),
        }
    }

    fn overview(&self) -> ApiView<'_> {
        ApiView {
            api_endpoints: &self.groups,
            tag_icons: &self.tag_icons,
            api_version: &self.version,
            server_url: &self.server_url,
            endpoint_method: None,
            endpoint_path: None,
            parameters: &[],
            responses: None,
            security: &[],
            current_endpoint: None,
            request_example: None,
        }
    }

    fn endpoint<'a>(&'a self, endpoint: &'a Endpoint) -> ApiView<'a> {
        ApiView {
            endpoint_method: Some(&endpoint.method),
            endpoint_path: Some(&endpoint.path),
            parameters: &endpoint.parameters,
            responses: Some(&endpoint.responses),
            security: &endpoint.security,
            current_endpoint: Some(&endpoint.operation_id),
            request_example: request_example(endpoint),
            ..self.overview()
        }
    }
}

/// Builds a documentation site from Markdown pages and an OpenAPI document.
pub struct DocsBuilder {
    config: SiteConfig,
    parser: MarkdownParser,
    renderer: Box<dyn Renderer>,
    spec_source: Box<dyn SpecSource>,
}

impl DocsBuilder {
    /// Create a builder with the built-in templates and OpenAPI parser.
    pub fn new(config: SiteConfig) -> Self {
        let renderer = TemplateEngine::with_overrides(config.templates_dir.clone());
        let spec_source = OpenApiParser::new().with_tag_icons(config.api_tag_icons.clone());

        Self {
            config,
            parser: MarkdownParser::new(),
            renderer: Box::new(renderer),
            spec_source: Box::new(spec_source),
        }
    }

    /// Replace the template renderer.
    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Replace the OpenAPI document source.
    pub fn with_spec_source(mut self, spec_source: Box<dyn SpecSource>) -> Self {
        self.spec_source = spec_source;
        self
    }

    /// Build the site.
    pub fn build(&self) -> Result<BuildSummary, BuildError> {
        let start = Instant::now();
        tracing::debug!("Building into {}", self.config.output_dir.display());

        self.clean_output()?;

        let navigation = Navigation::build(&self.config.navigation, self.config.base_url());
        let spec = self.load_api_spec()?;
        let sidebar = ApiSidebar::new(&spec, &self.config.api_navigation);

        let mut index = SearchIndexBuilder::new();
        let mut pages = 0;

        // Render documentation pages in parallel, then write in navigation order
        let rendered: Vec<Result<Option<RenderedPage>, BuildError>> = navigation
            .pages()
            .par_iter()
            .enumerate()
            .map(|(position, page)| self.render_doc_page(position, page, &navigation, &sidebar))
            .collect();

        for result in rendered {
            let Some(rendered) = result? else {
                continue;
            };
            let page = &rendered.page.page;

            self.write_page(&page.slug, &rendered.html)?;
            index.add_page(PageEntry {
                title: &page.title,
                url: &page.url,
                section: &rendered.page.section,
                headings: &rendered.doc.headings,
                plain_text: &rendered.doc.plain_text,
                description: &rendered.doc.description,
                icon: page.icon.as_deref(),
            });
            pages += 1;
        }

        // One page per endpoint record
        let endpoints: Vec<&Endpoint> = spec.endpoints().map(|(_, endpoint)| endpoint).collect();
        let rendered: Vec<Result<String, BuildError>> = endpoints
            .par_iter()
            .map(|endpoint| self.render_endpoint_page(endpoint, &navigation, &sidebar))
            .collect();

        for (endpoint, html) in endpoints.iter().zip(rendered) {
            let html = html?;
            self.write_page(&endpoint_slug(endpoint), &html)?;
            index.add_endpoint(&endpoint.title(), &endpoint.url, endpoint);
            pages += 1;
        }

        index.write_to(&self.config.output_dir.join(SEARCH_INDEX_FILE))?;

        Ok(BuildSummary {
            pages,
            search_entries: index.count(),
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Remove everything in the output directory except `assets/`.
    fn clean_output(&self) -> Result<(), BuildError> {
        let output_dir = &self.config.output_dir;

        if !output_dir.is_dir() {
            return fs::create_dir_all(output_dir)
                .map_err(|e| BuildError::WriteError(e.to_string()));
        }

        let entries = WalkDir::new(output_dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| BuildError::ReadError(e.to_string()))?;

        for entry in entries {
            if entry.file_name() == ASSETS_DIR {
                continue;
            }

            let removed = if entry.file_type().is_dir() {
                fs::remove_dir_all(entry.path())
            } else {
                fs::remove_file(entry.path())
            };
            removed.map_err(|e| {
                BuildError::WriteError(format!("{}: {}", entry.path().display(), e))
            })?;
        }

        Ok(())
    }

    /// Load the OpenAPI document once and resolve every endpoint URL.
    fn load_api_spec(&self) -> Result<ApiSpec, BuildError> {
        let Some(path) = &self.config.openapi_file else {
            return Ok(ApiSpec::default());
        };

        let mut spec = self
            .spec_source
            .parse_file(path)
            .map_err(|e| BuildError::OpenApiError(e.to_string()))?;

        let base_url = self.config.base_url();
        for endpoint in spec.endpoints_mut() {
            endpoint.url = format!("{}/{}/index.html", base_url, endpoint_slug(endpoint));
        }

        tracing::debug!(
            "Loaded {} endpoints from {}",
            spec.endpoint_count(),
            path.display()
        );
        Ok(spec)
    }

    fn render_doc_page<'n>(
        &self,
        position: usize,
        page: &'n FlatPage,
        navigation: &Navigation,
        sidebar: &ApiSidebar,
    ) -> Result<Option<RenderedPage<'n>>, BuildError> {
        let source = self.config.source_dir.join(&page.page.file);
        if !source.is_file() {
            tracing::debug!("Skipping missing page: {}", source.display());
            return Ok(None);
        }

        let mut doc = self
            .parser
            .parse_file(&source)
            .map_err(|e| BuildError::ParseError {
                path: source.display().to_string(),
                message: e.to_string(),
            })?;
        self.substitute_site_name(&mut doc);

        let base_url = self.config.base_url();
        let mut data = ViewData::new(&self.config, navigation.sections());
        data.page_title = page.page.title.clone();
        data.page_description = doc.description.clone();
        data.content = doc.html.clone();
        data.current_page = page.page.slug.clone();
        data.breadcrumbs = vec![
            Breadcrumb::new("Docs", Some(format!("{base_url}/index.html"))),
            Breadcrumb::new(page.section.clone(), None),
            Breadcrumb::new(page.page.title.clone(), Some(page.page.url.clone())),
        ];

        match page.page.layout {
            Layout::Documentation => {
                let (prev, next) = navigation.prev_next(position);
                data.table_of_contents = doc.headings.clone();
                data.prev_page = prev;
                data.next_page = next;
            }
            Layout::ApiReference => data.api = Some(sidebar.overview()),
        }

        let html = self
            .renderer
            .render(page.page.layout.template(), &data)
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;

        Ok(Some(RenderedPage { page, doc, html }))
    }

    fn render_endpoint_page(
        &self,
        endpoint: &Endpoint,
        navigation: &Navigation,
        sidebar: &ApiSidebar,
    ) -> Result<String, BuildError> {
        let base_url = self.config.base_url();
        let title = endpoint.title();

        let mut data = ViewData::new(&self.config, navigation.sections());
        data.page_title = title.clone();
        data.page_description = endpoint.description.clone();
        data.current_page = API_REFERENCE_SLUG.to_string();
        data.breadcrumbs = vec![
            Breadcrumb::new("Docs", Some(format!("{base_url}/index.html"))),
            Breadcrumb::new(
                API_REFERENCE_TITLE,
                Some(format!("{base_url}/{API_REFERENCE_SLUG}/index.html")),
            ),
            Breadcrumb::new(title, None),
        ];
        data.api = Some(sidebar.endpoint(endpoint));

        self.renderer
            .render(Layout::ApiReference.template(), &data)
            .map_err(|e| BuildError::TemplateError(e.to_string()))
    }

    fn substitute_site_name(&self, doc: &mut ParsedDocument) {
        let name = &self.config.site_name;
        doc.html = doc.html.replace(SITE_NAME_PLACEHOLDER, name);
        doc.description = doc.description.replace(SITE_NAME_PLACEHOLDER, name);
        doc.plain_text = doc.plain_text.replace(SITE_NAME_PLACEHOLDER, name);
    }

    fn write_page(&self, slug: &str, html: &str) -> Result<(), BuildError> {
        write_file(&output_path(&self.config.output_dir, slug), html)
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
    }
    fs::write(path, contents)
        .map_err(|e| BuildError::WriteError(format!("{}: {}", path.display(), e)))
}

fn endpoint_slug(endpoint: &Endpoint) -> String {
    format!("{}/{}", API_REFERENCE_SLUG, endpoint.operation_id)
}

/// JSON body assembled from the examples of an endpoint's body parameters.
fn request_example(endpoint: &Endpoint) -> Option<String> {
    let body: serde_json::Map<String, serde_json::Value> = endpoint
        .parameters
        .iter()
        .filter(|p| p.location == ParameterLocation::Body && !p.example.is_empty())
        .map(|p| {
            let value = serde_json::from_str(&p.example)
                .unwrap_or_else(|_| serde_json::Value::String(p.example.clone()));
            (p.name.clone(), value)
        })
        .collect();

    if body.is_empty() {
        None
    } else {
        Some(serde_json::Value::Object(body).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{NavSection, PageConfig};
    use crate::templates::RenderError;
    use pretty_assertions::assert_eq;
    use quire_openapi::{OpenApiError, Parameter};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::{tempdir, TempDir};

    const OPENAPI: &str = r#"
openapi: 3.0.3
info:
  title: Acme API
  version: 2.0.0
servers:
  - url: https://api.acme.test/v1
tags:
  - name: Authentication
  - name: User
paths:
  /auth/register:
    post:
      tags: [Authentication]
      operationId: registerUser
      summary: Register
      description: Create an account
  /auth/login:
    post:
      tags: [Authentication]
      operationId: loginUser
      summary: Log in
      requestBody:
        content:
          application/json:
            schema:
              type: object
              required: [email]
              properties:
                email:
                  type: string
                  example: jane@example.com
      responses:
        "200":
          description: Logged in
          content:
            application/json:
              example:
                token: abc
  /auth/logout:
    post:
      tags: [Authentication]
      summary: Log out
      security:
        - bearerAuth: []
  /user:
    get:
      tags: [User]
      operationId: currentUser
      summary: Current user
"#;

    fn page(title: &str, file: &str, layout: Layout) -> PageConfig {
        PageConfig {
            title: title.to_string(),
            file: file.to_string(),
            icon: None,
            layout,
        }
    }

    /// A site with two sections, three Markdown pages and an OpenAPI document.
    fn fixture() -> (TempDir, SiteConfig) {
        let temp = tempdir().unwrap();
        let docs = temp.path().join("docs");
        fs::create_dir_all(&docs).unwrap();

        fs::write(
            docs.join("README.md"),
            "---\ntitle: Home\n---\n\n# Welcome\n\nWelcome to {SiteName}.\n\n## Overview\n\nStart here.\n",
        )
        .unwrap();
        fs::write(
            docs.join("installation.md"),
            "# Installation\n\nInstall the tool.\n\n## Requirements\n\n```bash\ncargo install acme\n```\n",
        )
        .unwrap();
        fs::write(
            docs.join("api-reference.md"),
            "# API Reference\n\nEvery endpoint of the Acme API.\n",
        )
        .unwrap();
        fs::write(docs.join("openapi.yaml"), OPENAPI).unwrap();

        let config = SiteConfig {
            site_name: "Acme Docs".to_string(),
            source_dir: docs.clone(),
            output_dir: temp.path().join("dist"),
            openapi_file: Some(docs.join("openapi.yaml")),
            navigation: vec![
                NavSection {
                    title: "Getting Started".to_string(),
                    pages: vec![
                        page("Home", "README.md", Layout::Documentation),
                        page("Installation", "installation.md", Layout::Documentation),
                    ],
                },
                NavSection {
                    title: "API".to_string(),
                    pages: vec![page("API Reference", "api-reference.md", Layout::ApiReference)],
                },
            ],
            ..Default::default()
        };

        (temp, config)
    }

    /// Page HTML with minijinja's `&#x2f;` escapes turned back into slashes.
    fn read_page(path: &Path) -> String {
        fs::read_to_string(path).unwrap().replace("&#x2f;", "/")
    }

    fn read_index(config: &SiteConfig) -> Vec<serde_json::Value> {
        let json = read_page(&config.output_dir.join("search-index.json"));
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn builds_docs_and_endpoint_pages() {
        let (_temp, config) = fixture();
        let out = config.output_dir.clone();

        let summary = DocsBuilder::new(config.clone()).build().unwrap();

        assert_eq!(summary.pages, 7);
        assert_eq!(summary.search_entries, 7);
        assert!(out.join("index.html").exists());
        assert!(out.join("installation/index.html").exists());
        assert!(out.join("api-reference/index.html").exists());
        for id in ["registerUser", "loginUser", "post-auth-logout", "currentUser"] {
            assert!(out.join("api-reference").join(id).join("index.html").exists(), "{id}");
        }

        let entries = read_index(&config);
        assert_eq!(entries.len(), 7);
        for entry in &entries {
            for key in ["title", "url", "section", "type"] {
                assert!(entry.get(key).is_some(), "missing {key}");
            }
        }
        let kinds: Vec<&str> = entries.iter().map(|e| e["type"].as_str().unwrap()).collect();
        assert_eq!(kinds, vec!["doc", "doc", "doc", "api-endpoint", "api-endpoint", "api-endpoint", "api-endpoint"]);
        assert_eq!(entries[3]["method"], "POST");
        assert_eq!(entries[3]["url"], "/docs/api-reference/registerUser/index.html");
        assert!(entries[0].get("method").is_none());
    }

    #[test]
    fn substitutes_site_name() {
        let (_temp, config) = fixture();

        DocsBuilder::new(config.clone()).build().unwrap();

        let home = read_page(&config.output_dir.join("index.html"));
        assert!(home.contains("Welcome to Acme Docs."));
        assert!(!home.contains("{SiteName}"));
        assert!(!home.contains("title: Home"));

        let entries = read_index(&config);
        assert!(entries[0]["content"].as_str().unwrap().contains("Acme Docs"));
    }

    #[test]
    fn links_pages_and_breadcrumbs() {
        let (_temp, config) = fixture();

        DocsBuilder::new(config.clone()).build().unwrap();

        let install = read_page(&config.output_dir.join("installation/index.html"));
        assert!(install.contains(r#"href="/docs/index.html""#));
        assert!(install.contains(r#"href="/docs/api-reference/index.html""#));
        assert!(install.contains("<span>Getting Started</span>"));
        assert!(install.contains(r##"href="#requirements""##));
    }

    #[test]
    fn renders_api_overview_and_endpoints() {
        let (_temp, config) = fixture();

        DocsBuilder::new(config.clone()).build().unwrap();

        let overview = read_page(&config.output_dir.join("api-reference/index.html"));
        assert!(overview.contains("Every endpoint of the Acme API."));
        assert!(overview.contains(r#"href="/docs/api-reference/loginUser/index.html""#));
        assert!(overview.contains("2.0.0"));

        let login = read_page(&config.output_dir.join("api-reference/loginUser/index.html"));
        assert!(login.contains("<code>/auth/login</code>"));
        assert!(login.contains("--url https://api.acme.test/v1/auth/login"));
        assert!(login.contains(r#"class="docs-api-link active""#));
        assert!(login.contains("docs-status-2xx"));
    }

    #[test]
    fn skips_missing_pages() {
        let (_temp, mut config) = fixture();
        config.navigation[0]
            .pages
            .push(page("Missing", "missing.md", Layout::Documentation));

        let summary = DocsBuilder::new(config.clone()).build().unwrap();

        assert_eq!(summary.pages, 7);
        assert_eq!(summary.search_entries, 7);
        assert!(!config.output_dir.join("missing").exists());
    }

    #[test]
    fn builds_without_openapi_document() {
        let (_temp, mut config) = fixture();
        config.openapi_file = None;

        let summary = DocsBuilder::new(config.clone()).build().unwrap();

        assert_eq!(summary.pages, 3);
        assert_eq!(read_index(&config).len(), 3);
    }

    #[test]
    fn tolerates_missing_openapi_file() {
        let (temp, mut config) = fixture();
        config.openapi_file = Some(temp.path().join("nope.yaml"));

        let summary = DocsBuilder::new(config).build().unwrap();

        assert_eq!(summary.pages, 3);
    }

    #[test]
    fn cleans_output_but_keeps_assets() {
        let (_temp, config) = fixture();
        let out = config.output_dir.clone();
        fs::create_dir_all(out.join("assets")).unwrap();
        fs::write(out.join("assets/docs.css"), "body {}").unwrap();
        fs::create_dir_all(out.join("stale")).unwrap();
        fs::write(out.join("stale/index.html"), "old").unwrap();
        fs::write(out.join("old.txt"), "old").unwrap();

        DocsBuilder::new(config).build().unwrap();

        assert!(out.join("assets/docs.css").exists());
        assert!(!out.join("stale").exists());
        assert!(!out.join("old.txt").exists());
    }

    #[test]
    fn rebuilds_identically() {
        let (_temp, config) = fixture();
        let builder = DocsBuilder::new(config.clone());

        builder.build().unwrap();
        let first = read_page(&config.output_dir.join("search-index.json"));
        builder.build().unwrap();
        let second = read_page(&config.output_dir.join("search-index.json"));

        assert_eq!(first, second);
    }

    #[test]
    fn filters_api_sidebar() {
        let (_temp, mut config) = fixture();
        config.api_navigation = vec!["User".to_string()];

        let summary = DocsBuilder::new(config.clone()).build().unwrap();

        assert_eq!(summary.pages, 7);
        let user = read_page(&config.output_dir.join("api-reference/currentUser/index.html"));
        assert!(!user.contains(r#"href="/docs/api-reference/loginUser/index.html""#));
    }

    struct CountingSource {
        inner: OpenApiParser,
        calls: Arc<AtomicUsize>,
    }

    impl SpecSource for CountingSource {
        fn parse_file(&self, path: &Path) -> Result<ApiSpec, OpenApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.parse_file(path)
        }
    }

    #[test]
    fn parses_openapi_once_per_build() {
        let (_temp, config) = fixture();
        let calls = Arc::new(AtomicUsize::new(0));
        let source = CountingSource {
            inner: OpenApiParser::new(),
            calls: Arc::clone(&calls),
        };

        let summary = DocsBuilder::new(config)
            .with_spec_source(Box::new(source))
            .build()
            .unwrap();

        assert_eq!(summary.pages, 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    /// Records the template and title of every rendered page.
    struct RecordingRenderer {
        calls: Arc<std::sync::Mutex<Vec<(String, String)>>>,
    }

    impl Renderer for RecordingRenderer {
        fn render(&self, template: &str, data: &ViewData<'_>) -> Result<String, RenderError> {
            self.calls
                .lock()
                .unwrap()
                .push((template.to_string(), data.page_title.clone()));
            Ok(format!("<h1>{}</h1>", data.page_title))
        }
    }

    #[test]
    fn dispatches_layouts_to_renderer() {
        let (_temp, config) = fixture();
        let calls = Arc::new(std::sync::Mutex::new(Vec::new()));

        DocsBuilder::new(config.clone())
            .with_renderer(Box::new(RecordingRenderer {
                calls: Arc::clone(&calls),
            }))
            .build()
            .unwrap();

        let mut calls = calls.lock().unwrap().clone();
        calls.sort();
        assert_eq!(
            calls,
            vec![
                ("api-reference.html".to_string(), "API Reference".to_string()),
                ("api-reference.html".to_string(), "Current user".to_string()),
                ("api-reference.html".to_string(), "Log in".to_string()),
                ("api-reference.html".to_string(), "Log out".to_string()),
                ("api-reference.html".to_string(), "Register".to_string()),
                ("documentation.html".to_string(), "Home".to_string()),
                ("documentation.html".to_string(), "Installation".to_string()),
            ]
        );
        let home = read_page(&config.output_dir.join("index.html"));
        assert_eq!(home, "<h1>Home</h1>");
    }

    #[test]
    fn sidebar_icons_cover_declared_tags_only() {
        let spec = OpenApiParser::new()
            .parse_str(
                r#"
tags:
  - name: Authentication
  - name: Billing
paths:
  /auth/login:
    post:
      tags: [Authentication]
  /reports:
    get:
      tags: [Reports]
"#,
            )
            .unwrap();

        let sidebar = ApiSidebar::new(&spec, &[]);

        assert_eq!(
            sidebar.tag_icons,
            BTreeMap::from([
                ("Authentication".to_string(), "lock".to_string()),
                ("Billing".to_string(), "api".to_string()),
            ])
        );
        assert_eq!(sidebar.groups.len(), 2);
    }

    #[test]
    fn output_path_occupied_by_file_is_a_write_error() {
        let (temp, mut config) = fixture();
        let blocked = temp.path().join("dist.html");
        fs::write(&blocked, "not a directory").unwrap();
        config.output_dir = blocked.clone();

        let result = DocsBuilder::new(config).build();

        assert!(matches!(result, Err(BuildError::WriteError(_))));
        assert_eq!(fs::read_to_string(&blocked).unwrap(), "not a directory");
    }

    #[test]
    fn builds_request_example_from_body_parameters() {
        let endpoint = Endpoint {
            parameters: vec![
                Parameter {
                    name: "email".to_string(),
                    location: ParameterLocation::Body,
                    schema_type: "string".to_string(),
                    required: true,
                    description: String::new(),
                    example: "jane@example.com".to_string(),
                },
                Parameter {
                    name: "age".to_string(),
                    location: ParameterLocation::Body,
                    schema_type: "integer".to_string(),
                    required: false,
                    description: String::new(),
                    example: "42".to_string(),
                },
                Parameter {
                    name: "page".to_string(),
                    location: ParameterLocation::Query,
                    schema_type: "integer".to_string(),
                    required: false,
                    description: String::new(),
                    example: "1".to_string(),
                },
            ],
            ..Default::default()
        };

        let example: serde_json::Value =
            serde_json::from_str(&request_example(&endpoint).unwrap()).unwrap();
        assert_eq!(
            example,
            serde_json::json!({"email": "jane@example.com", "age": 42})
        );
        assert_eq!(request_example(&Endpoint::default()), None);
    }
}
