//! Client-side search index.

use std::fs;
use std::path::Path;

use serde::Serialize;

use quire_markdown::Heading;
use quire_openapi::Endpoint;

use crate::builder::BuildError;

const DEFAULT_PAGE_ICON: &str = "description";
const ENDPOINT_ICON: &str = "api";
const ENDPOINT_SECTION: &str = "API Reference";

/// Kind of indexed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntryKind {
    #[serde(rename = "doc")]
    Doc,
    #[serde(rename = "api-endpoint")]
    ApiEndpoint,
}

/// One searchable page or endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchEntry {
    pub title: String,
    pub url: String,
    pub section: String,
    /// Heading texts joined with `", "`
    pub headings: String,
    pub content: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

/// Append-only list of search entries, serialized in insertion order.
#[derive(Debug, Default)]
pub struct SearchIndexBuilder {
    entries: Vec<SearchEntry>,
}

/// Fields of a documentation page entry.
#[derive(Debug, Clone, Copy)]
pub struct PageEntry<'a> {
    pub title: &'a str,
    pub url: &'a str,
    pub section: &'a str,
    pub headings: &'a [Heading],
    pub plain_text: &'a str,
    pub description: &'a str,
    pub icon: Option<&'a str>,
}

impl SearchIndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a documentation page.
    pub fn add_page(&mut self, page: PageEntry<'_>) {
        let headings = page
            .headings
            .iter()
            .map(|h| h.text.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        self.entries.push(SearchEntry {
            title: page.title.to_string(),
            url: page.url.to_string(),
            section: page.section.to_string(),
            headings,
            content: page.plain_text.to_string(),
            description: page.description.to_string(),
            kind: EntryKind::Doc,
            icon: page.icon.unwrap_or(DEFAULT_PAGE_ICON).to_string(),
            method: None,
        });
    }

    /// Index an API endpoint page.
    pub fn add_endpoint(&mut self, title: &str, url: &str, endpoint: &Endpoint) {
        let signature = format!("{} {}", endpoint.method, endpoint.path);

        self.entries.push(SearchEntry {
            title: title.to_string(),
            url: url.to_string(),
            section: ENDPOINT_SECTION.to_string(),
            headings: signature.clone(),
            content: endpoint.description.clone(),
            description: signature,
            kind: EntryKind::ApiEndpoint,
            icon: ENDPOINT_ICON.to_string(),
            method: Some(endpoint.method.clone()),
        });
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[SearchEntry] {
        &self.entries
    }

    /// Pretty-printed JSON array of every entry.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.entries)
    }

    /// Write the index, creating parent directories as needed.
    pub fn write_to(&self, path: &Path) -> Result<(), BuildError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
        }

        let json = self
            .to_json()
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        fs::write(path, json).map_err(|e| BuildError::WriteError(e.to_string()))
    }
}
