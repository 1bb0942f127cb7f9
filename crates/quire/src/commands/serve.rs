//! Preview server command.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use axum::Router;
use tower_http::services::ServeDir;

use super::build::load_config;

/// Run the serve command.
pub async fn run(config_path: &Path, port: u16, dir: Option<PathBuf>) -> Result<()> {
    let site = load_config(config_path)?.site;
    let dir = dir.unwrap_or_else(|| site.output_dir.clone());

    if !dir.exists() {
        anyhow::bail!(
            "Directory not found: {}. Run 'quire build' first.",
            dir.display()
        );
    }

    let addr: SocketAddr = format!("127.0.0.1:{}", port)
        .parse()
        .context("Invalid address")?;

    // Built pages link under the base URL
    let base_url = site.base_url();
    let app = if base_url.is_empty() {
        Router::new().fallback_service(ServeDir::new(&dir))
    } else {
        Router::new().nest_service(base_url, ServeDir::new(&dir))
    };

    tracing::info!("Serving {} at http://{}{}", dir.display(), addr, base_url);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    let url = format!("http://{}{}/index.html", addr, base_url);
    if let Err(e) = open::that(&url) {
        tracing::debug!("Could not open browser: {}", e);
    }

    axum::serve(listener, app).await?;

    Ok(())
}
