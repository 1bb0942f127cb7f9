//! Quire CLI - static documentation site generator.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "quire")]
#[command(about = "Static documentation sites from Markdown and OpenAPI")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to docs.toml config file
    #[arg(short, long, default_value = "docs.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a config file and starter docs
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Build static documentation site
    Build {
        /// Output directory (defaults to config or "dist")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Do not write CSS/JS assets
        #[arg(long)]
        skip_assets: bool,

        /// Skip minification
        #[arg(long)]
        no_minify: bool,
    },

    /// Preview built documentation
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// Directory to serve (defaults to the configured output directory)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    // Execute command
    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes).await?;
        }
        Commands::Build {
            output,
            skip_assets,
            no_minify,
        } => {
            let minify = if no_minify { Some(false) } else { None };
            commands::build::run(&cli.config, output, skip_assets, minify).await?;
        }
        Commands::Serve { port, dir } => {
            commands::serve::run(&cli.config, port, dir).await?;
        }
    }

    Ok(())
}
