//! Site configuration.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for building a documentation site.
///
/// Every key is optional; missing keys take the values of
/// [`SiteConfig::default`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site name, also substituted for `{SiteName}` in page content
    pub site_name: String,

    /// Site description for the `<meta name="description">` tag
    pub site_description: String,

    /// Directory holding the Markdown sources
    pub source_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// URL prefix the site is served under
    pub base_url: String,

    /// OpenAPI document used for the API reference
    pub openapi_file: Option<PathBuf>,

    /// Directory of template overrides, looked up before the built-in templates
    pub templates_dir: Option<PathBuf>,

    /// Inline SVG or HTML for the header logo
    pub logo: Option<String>,

    /// Header links, replacing the default Guides / API Reference links
    pub header_nav: Option<Vec<NavLink>>,

    /// Stylesheet URLs for web fonts; empty disables external fonts
    pub fonts: Vec<String>,

    /// CSS custom property overrides, without the leading `--`
    pub theme: BTreeMap<String, String>,

    /// Extra or replacement icons for OpenAPI tags
    pub api_tag_icons: BTreeMap<String, String>,

    /// Sidebar sections, in display order
    pub navigation: Vec<NavSection>,

    /// Tags shown in the API sidebar, in order; empty shows every tag
    pub api_navigation: Vec<String>,

    pub footer: Footer,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: "Documentation".to_string(),
            site_description: "Project documentation".to_string(),
            source_dir: PathBuf::from("docs"),
            output_dir: PathBuf::from("dist"),
            base_url: "/docs".to_string(),
            openapi_file: Some(PathBuf::from("docs/openapi.yaml")),
            templates_dir: None,
            logo: None,
            header_nav: None,
            fonts: default_fonts(),
            theme: BTreeMap::new(),
            api_tag_icons: BTreeMap::new(),
            navigation: vec![NavSection {
                title: "Getting Started".to_string(),
                pages: vec![PageConfig {
                    title: "Home".to_string(),
                    file: "README.md".to_string(),
                    icon: Some("home".to_string()),
                    layout: Layout::Documentation,
                }],
            }],
            api_navigation: Vec::new(),
            footer: Footer::default(),
        }
    }
}

impl SiteConfig {
    /// Base URL without a trailing slash; the site root is the empty string.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

fn default_fonts() -> Vec<String> {
    vec![
        "https://fonts.googleapis.com/css2?family=Inter:wght@400;500;600;700;900&family=JetBrains+Mono:wght@400;500;600&display=swap".to_string(),
        "https://fonts.googleapis.com/css2?family=Material+Symbols+Outlined:wght,FILL@100..700,0..1&display=swap".to_string(),
    ]
}

/// A titled group of pages in the sidebar.
#[derive(Debug, Clone, Deserialize)]
pub struct NavSection {
    pub title: String,
    #[serde(default)]
    pub pages: Vec<PageConfig>,
}

/// A page entry in the navigation config.
#[derive(Debug, Clone, Deserialize)]
pub struct PageConfig {
    pub title: String,
    /// Markdown file, relative to the source directory
    pub file: String,
    /// Material Symbols icon name
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub layout: Layout,
}

/// Page layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    #[default]
    Documentation,
    /// Overview page of the API reference, rendered with the endpoint sidebar
    ApiReference,
}

impl Layout {
    /// Template used to render pages with this layout.
    pub fn template(&self) -> &'static str {
        match self {
            Self::Documentation => "documentation.html",
            Self::ApiReference => "api-reference.html",
        }
    }
}

/// A titled link.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NavLink {
    pub title: String,
    pub url: String,
}

/// Footer content.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Footer {
    pub copyright: String,
    pub links: Vec<NavLink>,
}

impl Default for Footer {
    fn default() -> Self {
        Self {
            copyright: "All rights reserved.".to_string(),
            links: Vec::new(),
        }
    }
}
