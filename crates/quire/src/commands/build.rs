//! Static site build command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use quire_static::{AssetPipeline, DocsBuilder, SiteConfig};
use serde::Deserialize;

/// Configuration file structure (docs.toml).
#[derive(Debug, Deserialize, Default)]
pub(crate) struct ConfigFile {
    #[serde(flatten)]
    pub site: SiteConfig,
    #[serde(default)]
    build: BuildSettings,
}

#[derive(Debug, Deserialize)]
struct BuildSettings {
    #[serde(default = "default_minify")]
    minify: bool,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            minify: default_minify(),
        }
    }
}

fn default_minify() -> bool {
    true
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub(crate) fn load_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    tracing::debug!("No config at {}, using defaults", path.display());
    Ok(ConfigFile::default())
}

/// Run the build command.
pub async fn run(
    config_path: &Path,
    output: Option<PathBuf>,
    skip_assets: bool,
    minify: Option<bool>,
) -> Result<()> {
    tracing::info!("Building documentation...");

    let file_config = load_config(config_path)?;
    let mut site = file_config.site;
    if let Some(output) = output {
        site.output_dir = output;
    }

    if !skip_assets {
        let minify = minify.unwrap_or(file_config.build.minify);
        AssetPipeline::write_assets(&site.output_dir, minify).context("Failed to write assets")?;
    }

    let summary = DocsBuilder::new(site).build().context("Build failed")?;

    tracing::info!("Pages built: {}", summary.pages);
    tracing::info!("Search entries: {}", summary.search_entries);
    tracing::info!("Output: {}", summary.output_dir.display());
    tracing::info!("Time: {}ms", summary.duration_ms);

    Ok(())
}
