//! Sidebar navigation, page slugs and URLs.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{Layout, NavSection};

/// Slug of the site's landing page.
pub const INDEX_SLUG: &str = "index";

/// A navigation section with resolved pages.
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub title: String,
    pub pages: Vec<NavPage>,
}

/// A page with its slug and URL resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavPage {
    pub title: String,
    pub file: String,
    pub slug: String,
    pub url: String,
    pub icon: Option<String>,
    pub layout: Layout,
}

/// Title and URL of a neighbouring page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageLink {
    pub title: String,
    pub url: String,
}

impl From<&NavPage> for PageLink {
    fn from(page: &NavPage) -> Self {
        Self {
            title: page.title.clone(),
            url: page.url.clone(),
        }
    }
}

/// Resolved navigation tree plus its flattened page order.
#[derive(Debug, Clone)]
pub struct Navigation {
    sections: Vec<Section>,
    flat: Vec<FlatPage>,
}

/// A page in reading order, with the title of its section.
#[derive(Debug, Clone)]
pub struct FlatPage {
    pub section: String,
    pub page: NavPage,
}

impl Navigation {
    /// Resolve slugs and URLs for every configured page.
    pub fn build(config: &[NavSection], base_url: &str) -> Self {
        let sections: Vec<Section> = config
            .iter()
            .map(|section| Section {
                title: section.title.clone(),
                pages: section
                    .pages
                    .iter()
                    .map(|page| {
                        let slug = file_to_slug(&page.file);
                        NavPage {
                            title: page.title.clone(),
                            file: page.file.clone(),
                            url: slug_to_url(base_url, &slug),
                            slug,
                            icon: page.icon.clone(),
                            layout: page.layout,
                        }
                    })
                    .collect(),
            })
            .collect();

        let flat = sections
            .iter()
            .flat_map(|section| {
                section.pages.iter().map(|page| FlatPage {
                    section: section.title.clone(),
                    page: page.clone(),
                })
            })
            .collect();

        Self { sections, flat }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Pages in reading order.
    pub fn pages(&self) -> &[FlatPage] {
        &self.flat
    }

    /// Previous and next pages for the page at `index` in reading order.
    pub fn prev_next(&self, index: usize) -> (Option<PageLink>, Option<PageLink>) {
        let prev = index
            .checked_sub(1)
            .and_then(|i| self.flat.get(i))
            .map(|p| PageLink::from(&p.page));
        let next = self.flat.get(index + 1).map(|p| PageLink::from(&p.page));
        (prev, next)
    }
}

/// Slug for a Markdown file: the name without `.md`, `README` becoming `index`.
pub fn file_to_slug(file: &str) -> String {
    let slug = match file.len().checked_sub(3) {
        Some(cut) if file.is_char_boundary(cut) && file[cut..].eq_ignore_ascii_case(".md") => {
            &file[..cut]
        }
        _ => file,
    };

    if slug == "README" {
        INDEX_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

/// Public URL of a slug.
pub fn slug_to_url(base_url: &str, slug: &str) -> String {
    if slug == INDEX_SLUG {
        format!("{base_url}/index.html")
    } else {
        format!("{base_url}/{slug}/index.html")
    }
}

/// Output file for a slug.
pub fn output_path(output_dir: &Path, slug: &str) -> PathBuf {
    if slug == INDEX_SLUG || slug == "README" {
        output_dir.join("index.html")
    } else {
        output_dir.join(slug).join("index.html")
    }
}
