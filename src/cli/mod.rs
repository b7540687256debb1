//! Command-line interface for folio.
//!
//! # Available Commands
//!
//! - `validate` - Check the project list and tool catalog
//! - `build` - Render the site into a directory
//! - `serve` - Build, serve on localhost, and rebuild on change
//!
//! # Basic Workflow
//!
//! ```bash
//! # Edit projects.yaml / tools.yaml, then check them
//! folio validate
//!
//! # Preview while editing
//! folio serve
//!
//! # Produce the final site
//! folio build -o public
//! ```
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug logging
//! - `--quiet` - Suppress status output; only errors are shown
//! - `--config` - Site configuration file (default `folio.toml` if present)
//!
//! # Configuration precedence
//!
//! Command-line flag, then environment variable (`FOLIO_PROJECTS`,
//! `FOLIO_TOOLS`, `FOLIO_OUTPUT`, `FOLIO_PORT`), then `folio.toml`, then
//! the built-in default.

mod build;
pub mod common;
mod serve;
pub mod validate;


use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::SiteConfig;

/// Runtime configuration derived from the global flags.
///
/// Kept separate from [`Cli`] so tests can run commands with an explicit
/// configuration instead of parsed arguments.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,

    /// Suppress status output
    pub quiet: bool,

    /// Site configuration file; `None` means `folio.toml` if it exists
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            log_level: "warn".to_string(),
            ..Default::default()
        }
    }

    /// Load the site configuration. Only commands that render need it.
    pub fn site_config(&self) -> Result<SiteConfig> {
        let site = SiteConfig::load_with_optional(self.config_path.as_deref())?;
        tracing::debug!("Site configuration: {:?}", site);
        Ok(site)
    }

    /// Install the global tracing subscriber. `RUST_LOG` takes precedence
    /// over [`CliConfig::log_level`]. Safe to call more than once.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.log_level));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

#[derive(Parser)]
#[command(
    name = "folio",
    about = "Portfolio site builder - validate, render, and preview project catalogs",
    version,
    long_about = "folio turns a YAML list of projects and a YAML catalog of tools into a static portfolio site."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the site configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the project list and tool catalog
    Validate(validate::ValidateCommand),

    /// Build the static site
    Build(build::BuildCommand),

    /// Serve a live preview and rebuild on change
    Serve(serve::ServeCommand),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(config).await
    }

    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        };

        CliConfig {
            log_level: log_level.to_string(),
            quiet: self.quiet,
            config_path: self.config.clone(),
        }
    }

    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        match self.command {
            Commands::Validate(cmd) => cmd.execute(config.quiet),
            Commands::Build(cmd) => cmd.execute(config.site_config()?, config.quiet),
            Commands::Serve(cmd) => cmd.execute(config.site_config()?).await,
        }
    }
}
