//! Live preview: build, serve, and rebuild on change.
//!
//! `folio serve` does an initial build, starts the preview server on the
//! output directory, and watches the data files. Each accepted change
//! reloads the data and templates and re-exports the site. A failing
//! rebuild is reported and the previous output stays in place.
//!
//! With `--no-server` nothing is exported or served; changes are only
//! re-validated and listed.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::cli::common::{SourceArgs, display_projects, print_warnings};
use crate::config::SiteConfig;
use crate::constants::WATCHED_SUFFIXES;
use crate::core::user_friendly_error;
use crate::server::{self, PreviewServer};
use crate::site;
use crate::templating::SiteRenderer;
use crate::watch::{ChangeFilter, RebuildHandler, SiteWatcher};

/// Arguments for `folio serve`.
#[derive(Args, Debug)]
pub struct ServeCommand {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Port for the preview server [default: first free of 3000, 5000, 8000, 8080]
    #[arg(short, long, env = "FOLIO_PORT")]
    pub port: Option<u16>,

    /// Directory the preview is exported to [default: build]
    #[arg(short, long, env = "FOLIO_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Directory with template overrides (base.html, index.html, project.html)
    #[arg(long, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Watch and re-validate only; do not export or serve
    #[arg(long)]
    pub no_server: bool,

    /// Rebuild on any .yaml/.yml/.html/.css/.js change under the project
    /// file's directory and the templates and static directories, not just
    /// the two data files
    #[arg(long)]
    pub watch_all: bool,
}

/// Everything one rebuild needs, captured when the session starts.
#[derive(Debug, Clone)]
struct Rebuilder {
    catalog: Catalog,
    site: SiteConfig,
    output_dir: PathBuf,
    templates_dir: Option<PathBuf>,
    static_dir: PathBuf,
    export: bool,
}

impl Rebuilder {
    /// Reload data and templates, print the listing, and re-export.
    fn run(&self) -> Result<String> {
        let report = self.catalog.load_report()?;
        print_warnings(&report);
        display_projects(&report.view);

        if self.export {
            // Templates are recompiled every time so edits to overrides show up.
            let renderer = SiteRenderer::new(self.site.clone(), self.templates_dir.as_deref())?;
            let summary =
                site::export(&report.view, &renderer, &self.output_dir, Some(&self.static_dir))?;
            tracing::info!("Rebuilt {} page(s) in {}", summary.pages, summary.output_dir.display());
        }

        Ok(format!(
            "{} Files are valid! Found {} projects and {} tools.",
            "✓".green(),
            report.view.len(),
            report.tool_count
        ))
    }
}

impl ServeCommand {
    pub async fn execute(self, site: SiteConfig) -> Result<()> {
        let catalog = self.sources.catalog();
        let output_dir = site.resolve_output_dir(self.output.clone());
        let rebuilder = Rebuilder {
            catalog: catalog.clone(),
            templates_dir: site.resolve_templates_dir(self.templates.clone()),
            static_dir: site.resolve_static_dir(),
            site,
            output_dir: output_dir.clone(),
            export: !self.no_server,
        };

        println!(
            "{}",
            format!(
                "Watching {} and {} for changes. Press Ctrl+C to stop.",
                catalog.project_path().display(),
                catalog.tool_path().display()
            )
            .yellow()
        );

        // Initial failures are reported; watching continues.
        match rebuilder.run() {
            Ok(summary) => println!("{summary}"),
            Err(e) => {
                println!("{} Initial build failed", "✗".red());
                user_friendly_error(e).display();
            }
        }

        let server = if self.no_server {
            None
        } else {
            let listener = server::bind(self.port).await?;
            let server = PreviewServer::start(listener, output_dir.clone())?;
            println!("{} Serving {} at {}", "✓".green(), output_dir.display(), server.url().cyan());
            Some(server)
        };

        let filter = self.change_filter(&catalog, &output_dir, &rebuilder);
        let handler = RebuildHandler::new(filter, move || rebuilder.run());
        let watcher = SiteWatcher::start(handler)?;

        tokio::signal::ctrl_c().await?;
        println!("\nStopping...");

        watcher.stop();
        if let Some(server) = server {
            server.stop();
        }
        Ok(())
    }

    fn change_filter(
        &self,
        catalog: &Catalog,
        output_dir: &Path,
        rebuilder: &Rebuilder,
    ) -> ChangeFilter {
        if self.watch_all {
            let mut roots = vec![match catalog.project_path().parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            }];
            // Only existing directories can be watched.
            roots.extend(
                rebuilder
                    .templates_dir
                    .iter()
                    .chain(std::iter::once(&rebuilder.static_dir))
                    .filter(|dir| dir.is_dir())
                    .cloned(),
            );
            ChangeFilter::suffix(&roots, &WATCHED_SUFFIXES, &[output_dir.to_path_buf()])
        } else {
            ChangeFilter::exact([catalog.project_path(), catalog.tool_path()])
        }
    }
}
