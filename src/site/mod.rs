//! Static site export.
//!
//! A site has one index route plus one detail route per project:
//!
//! | Route | File |
//! |-------|------|
//! | `/` | `index.html` |
//! | `/project/<n>` | `project/<n>.html` |
//!
//! [`export`] renders every route before touching the disk, so a template
//! error leaves the previous output untouched. It then creates the output
//! directory, replaces the generated `project/` subtree (dropping pages of
//! projects that no longer exist), writes each page, and copies the static
//! asset directory to `<output>/static` when one exists.
//!
//! The built-in templates link `static/css/style.css` and
//! `static/js/main.js`. Default versions of both are written unless the
//! static directory provides its own.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::core::{FileOperation, FileOperationError, FileOps, FileResultExt, FolioError};
use crate::models::ProjectsView;
use crate::templating::SiteRenderer;

/// Assets the built-in templates reference, as (path under `static/`, contents).
const BUILTIN_ASSETS: [(&str, &str); 2] = [
    ("css/style.css", include_str!("../../assets/css/style.css")),
    ("js/main.js", include_str!("../../assets/js/main.js")),
];

/// A page of the exported site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Index,
    /// Detail page for the project at this source position
    Project(usize),
}

impl Route {
    /// URL path as served by the preview server.
    pub fn url(&self) -> String {
        match self {
            Route::Index => "/".to_string(),
            Route::Project(index) => format!("/project/{index}"),
        }
    }

    /// File path relative to the output directory.
    pub fn output_path(&self) -> PathBuf {
        match self {
            Route::Index => PathBuf::from("index.html"),
            Route::Project(index) => Path::new("project").join(format!("{index}.html")),
        }
    }

    /// Render this route's page.
    pub fn render(&self, renderer: &SiteRenderer, view: &ProjectsView) -> Result<String, FolioError> {
        match self {
            Route::Index => renderer.render_index(view),
            Route::Project(index) => renderer.render_project(view, *index),
        }
    }
}

/// Every route for `view`: the index first, then projects in source order.
pub fn routes(view: &ProjectsView) -> Vec<Route> {
    std::iter::once(Route::Index).chain((0..view.len()).map(Route::Project)).collect()
}

/// What an export wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub output_dir: PathBuf,
    /// HTML pages written
    pub pages: usize,
    /// Static asset files written (defaults plus copied files)
    pub assets: usize,
}

/// Render all routes and write them under `output_dir`.
///
/// `static_dir` is copied to `<output_dir>/static` if it exists; a missing
/// asset directory is not an error. Default assets fill in whatever it
/// does not provide.
///
/// # Errors
///
/// - [`FolioError::Render`] if any page fails to render (nothing is written)
/// - [`FolioError::Export`] if the output cannot be written
pub fn export(
    view: &ProjectsView,
    renderer: &SiteRenderer,
    output_dir: &Path,
    static_dir: Option<&Path>,
) -> Result<ExportSummary> {
    let pages = routes(view)
        .into_iter()
        .map(|route| route.render(renderer, view).map(|html| (route, html)))
        .collect::<Result<Vec<_>, _>>()?;

    std::fs::create_dir_all(output_dir)
        .with_file_context(FileOperation::CreateDir, output_dir, "creating output directory", "site")
        .map_err(|e| export_error(output_dir, e))?;

    let project_dir = output_dir.join("project");
    if project_dir.is_dir() {
        std::fs::remove_dir_all(&project_dir)
            .with_file_context(FileOperation::Remove, &project_dir, "clearing stale project pages", "site")
            .map_err(|e| export_error(output_dir, e))?;
    }

    for (route, html) in &pages {
        let path = output_dir.join(route.output_path());
        FileOps::write_with_context(&path, html, "writing page", "site")
            .map_err(|e| export_error(output_dir, e))?;
        tracing::debug!("Wrote {} -> {}", route.url(), path.display());
    }

    let static_dir = static_dir.filter(|dir| dir.is_dir());
    let target = output_dir.join("static");
    let mut assets = 0;
    for (relative, contents) in BUILTIN_ASSETS {
        if static_dir.is_some_and(|dir| dir.join(relative).is_file()) {
            continue;
        }
        FileOps::write_with_context(&target.join(relative), contents, "writing default asset", "site")
            .map_err(|e| export_error(output_dir, e))?;
        assets += 1;
    }
    if let Some(dir) = static_dir {
        assets += copy_static_assets(dir, &target)
            .with_context(|| format!("Failed to copy static assets from {}", dir.display()))?;
    }

    Ok(ExportSummary {
        output_dir: output_dir.to_path_buf(),
        pages: pages.len(),
        assets,
    })
}

fn export_error(output_dir: &Path, error: FileOperationError) -> anyhow::Error {
    let reason = error.user_message();
    anyhow::Error::from(FolioError::Export {
        path: output_dir.display().to_string(),
        reason: format!("{} {}: {}", error.operation, error.file_path.display(), error.source),
    })
    .context(reason)
}

/// Copy every file under `source` into `target`, keeping relative layout.
fn copy_static_assets(source: &Path, target: &Path) -> Result<usize> {
    let mut copied = 0;
    for entry in WalkDir::new(source).follow_links(true) {
        let entry = entry.map_err(|e| {
            anyhow::Error::from(FolioError::Export {
                path: target.display().to_string(),
                reason: format!("cannot read static assets in {}: {e}", source.display()),
            })
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(source).map_err(|e| FolioError::Export {
            path: target.display().to_string(),
            reason: format!("{} is outside {}: {e}", entry.path().display(), source.display()),
        })?;
        let destination = target.join(relative);
        if let Some(parent) = destination.parent() {
            std::fs::create_dir_all(parent)
                .with_file_context(FileOperation::CreateDir, parent, "copying static assets", "site")
                .map_err(|e| export_error(target, e))?;
        }
        std::fs::copy(entry.path(), &destination)
            .with_file_context(FileOperation::Copy, entry.path(), "copying static assets", "site")
            .map_err(|e| export_error(target, e))?;
        copied += 1;
    }
    tracing::debug!("Copied {} static asset(s) to {}", copied, target.display());
    Ok(copied)
}
