//! Static site generator for quire documentation.
//!
//! Builds a documentation site from Markdown pages and an OpenAPI document,
//! with a client-side search index.

pub mod assets;
pub mod builder;
pub mod config;
pub mod navigation;
pub mod search;
pub mod templates;

pub use assets::AssetPipeline;
pub use builder::{BuildError, BuildSummary, DocsBuilder};
pub use config::{Footer, Layout, NavLink, NavSection, PageConfig, SiteConfig};
pub use navigation::{NavPage, Navigation, PageLink, Section};
pub use search::{EntryKind, PageEntry, SearchEntry, SearchIndexBuilder};
pub use templates::{ApiView, Breadcrumb, RenderError, Renderer, TemplateEngine, ViewData};
