//! Initialize documentation in a project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Starter pages, relative to the docs directory.
const STARTER_PAGES: &[(&str, &str)] = &[
    ("README.md", DEFAULT_README),
    ("installation.md", DEFAULT_INSTALLATION),
    ("api-reference.md", DEFAULT_API_REFERENCE),
    ("openapi.yaml", DEFAULT_OPENAPI),
];

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing documentation...");
    scaffold(config_path, Path::new("docs"), yes)?;

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'quire build' to generate the site.");

    Ok(())
}

/// Write the config file and starter pages, keeping existing files unless `overwrite`.
fn scaffold(config_path: &Path, docs_dir: &Path, overwrite: bool) -> Result<()> {
    if config_path.exists() && !overwrite {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
    } else {
        fs::write(config_path, DEFAULT_CONFIG)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        tracing::info!("Created {}", config_path.display());
    }

    fs::create_dir_all(docs_dir).context("Failed to create docs directory")?;

    for (name, contents) in STARTER_PAGES {
        let path = docs_dir.join(name);
        if path.exists() && !overwrite {
            tracing::debug!("Keeping existing {}", path.display());
            continue;
        }
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Created {}", path.display());
    }

    Ok(())
}

const DEFAULT_CONFIG: &str = r##"# Quire configuration

site_name = "My Project Documentation"
site_description = "Guides and API reference for My Project"

# Markdown sources and build output
source_dir = "docs"
output_dir = "dist"

# URL prefix the site is served under
base_url = "/docs"

# OpenAPI document for the API reference
openapi_file = "docs/openapi.yaml"

# Tags shown in the API sidebar, in order (empty shows every tag)
api_navigation = []

[build]
minify = true

# CSS custom property overrides
[theme]
# color-primary = "#2563eb"

# Sidebar icons for OpenAPI tags
[api_tag_icons]
# Payments = "payments"

[footer]
copyright = "All rights reserved."

[[navigation]]
title = "Getting Started"

[[navigation.pages]]
title = "Home"
file = "README.md"
icon = "home"

[[navigation.pages]]
title = "Installation"
file = "installation.md"
icon = "download"

[[navigation]]
title = "API"

[[navigation.pages]]
title = "API Reference"
file = "api-reference.md"
icon = "api"
layout = "api-reference"
"##;

const DEFAULT_README: &str = r#"---
title: Home
---

# Welcome

This is the documentation for {SiteName}.

## Where to start

- Follow the [installation guide](installation/index.html) to get set up.
- Browse the [API reference](api-reference/index.html) for every endpoint.
"#;

const DEFAULT_INSTALLATION: &str = r#"# Installation

Install the package and start the server.

## Requirements

| Tool | Version |
|------|---------|
| Rust | 1.80+   |

## Install

```bash
cargo install my-project
```

## Verify

```bash
my-project --version
```
"#;

const DEFAULT_API_REFERENCE: &str = r#"# API Reference

The API speaks JSON over HTTPS. Authenticate with a bearer token obtained from
the login endpoint.

## Authentication

```bash
curl -H "Authorization: Bearer <TOKEN>" https://api.example.com/v1/user
```
"#;

const DEFAULT_OPENAPI: &str = r#"openapi: 3.0.3
info:
  title: My Project API
  description: Example API
  version: 1.0.0
servers:
  - url: https://api.example.com/v1
tags:
  - name: Authentication
  - name: User
components:
  securitySchemes:
    bearerAuth:
      type: http
      scheme: bearer
  schemas:
    Credentials:
      type: object
      required: [email, password]
      properties:
        email:
          type: string
          description: Account email
          example: jane@example.com
        password:
          type: string
          description: Account password
          example: secret
paths:
  /auth/login:
    post:
      tags: [Authentication]
      operationId: login
      summary: Log in
      description: Exchange credentials for an access token.
      requestBody:
        content:
          application/json:
            schema:
              $ref: '#/components/schemas/Credentials'
      responses:
        "200":
          description: Logged in
          content:
            application/json:
              example:
                token: eyJhbGciOiJIUzI1NiJ9
        "422":
          description: Invalid credentials
  /user:
    get:
      tags: [User]
      operationId: currentUser
      summary: Current user
      description: Return the authenticated user.
      security:
        - bearerAuth: []
      responses:
        "200":
          description: The user
          content:
            application/json:
              example:
                id: 1
                email: jane@example.com
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn scaffolds_config_and_pages() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("docs.toml");
        let docs = dir.path().join("docs");

        scaffold(&config, &docs, false).unwrap();

        assert!(config.exists());
        for (name, _) in STARTER_PAGES {
            assert!(docs.join(name).exists(), "{name}");
        }
    }

    #[test]
    fn keeps_existing_files_without_overwrite() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("docs.toml");
        let docs = dir.path().join("docs");
        fs::create_dir_all(&docs).unwrap();
        fs::write(&config, "site_name = \"Mine\"").unwrap();
        fs::write(docs.join("README.md"), "# Mine").unwrap();

        scaffold(&config, &docs, false).unwrap();

        assert_eq!(fs::read_to_string(&config).unwrap(), "site_name = \"Mine\"");
        assert_eq!(fs::read_to_string(docs.join("README.md")).unwrap(), "# Mine");
        assert!(docs.join("installation.md").exists());

        scaffold(&config, &docs, true).unwrap();

        assert_eq!(fs::read_to_string(&config).unwrap(), DEFAULT_CONFIG);
    }

    #[test]
    fn default_config_parses() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("docs.toml");
        fs::write(&config, DEFAULT_CONFIG).unwrap();

        let loaded = super::super::build::load_config(&config).unwrap();

        assert_eq!(loaded.site.site_name, "My Project Documentation");
        assert_eq!(loaded.site.navigation.len(), 2);
        assert!(loaded.site.theme.is_empty());
        assert_eq!(loaded.site.navigation[1].pages[0].file, "api-reference.md");
    }
}
