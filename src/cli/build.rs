//! Build the static site.
//!
//! Loads the data files, renders every page, and writes them under the
//! output directory (created if missing). Assets from the static directory
//! are copied alongside.
//!
//! ```bash
//! folio build
//! folio build data/projects.yaml data/tools.yaml -o public --templates theme/
//! ```

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use crate::cli::common::{SourceArgs, print_loaded, print_warnings};
use crate::config::SiteConfig;
use crate::site;
use crate::templating::SiteRenderer;

/// Arguments for `folio build`.
#[derive(Args, Debug)]
pub struct BuildCommand {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Directory to output the built static site [default: build]
    #[arg(short, long, env = "FOLIO_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Directory with template overrides (base.html, index.html, project.html)
    #[arg(long, value_name = "DIR")]
    pub templates: Option<PathBuf>,
}

impl BuildCommand {
    pub fn execute(self, site: SiteConfig, quiet: bool) -> Result<()> {
        let report = self.sources.catalog().load_report()?;
        if !quiet {
            print_loaded(&report);
            print_warnings(&report);
        }

        let output_dir = site.resolve_output_dir(self.output);
        let templates_dir = site.resolve_templates_dir(self.templates);
        let static_dir = site.resolve_static_dir();
        let renderer = SiteRenderer::new(site, templates_dir.as_deref())
            .context("Failed to load templates")?;

        if !quiet {
            println!("{}", format!("Building static site in {}...", output_dir.display()).yellow());
        }
        let summary = site::export(&report.view, &renderer, &output_dir, Some(&static_dir))?;
        tracing::info!(
            "Exported {} page(s) and {} asset(s) to {}",
            summary.pages,
            summary.assets,
            summary.output_dir.display()
        );

        if !quiet {
            println!(
                "{} Static site built successfully in {}! ({} pages)",
                "✓".green(),
                summary.output_dir.display(),
                summary.pages
            );
        }
        Ok(())
    }
}
