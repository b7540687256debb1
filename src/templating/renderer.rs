//! Template rendering engine with Tera.

use anyhow::Result;
use regex::Regex;
use serde::Serialize;
use std::path::Path;
use std::sync::LazyLock;
use tera::{Context as TeraContext, Tera};

use crate::config::SiteConfig;
use crate::core::{FileOps, FolioError};
use crate::models::ProjectsView;

const BASE_TEMPLATE: &str = include_str!("../../templates/base.html");
const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");
const PROJECT_TEMPLATE: &str = include_str!("../../templates/project.html");

/// The templates a site is rendered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTemplate {
    Base,
    Index,
    Project,
}

impl PageTemplate {
    pub const ALL: [PageTemplate; 3] = [PageTemplate::Base, PageTemplate::Index, PageTemplate::Project];

    /// File name used for lookup and overrides.
    pub const fn file_name(self) -> &'static str {
        match self {
            PageTemplate::Base => "base.html",
            PageTemplate::Index => "index.html",
            PageTemplate::Project => "project.html",
        }
    }

    const fn builtin(self) -> &'static str {
        match self {
            PageTemplate::Base => BASE_TEMPLATE,
            PageTemplate::Index => INDEX_TEMPLATE,
            PageTemplate::Project => PROJECT_TEMPLATE,
        }
    }
}

/// Site metadata as seen by templates. Absent values render as null.
#[derive(Debug, Serialize)]
struct SiteContext<'a> {
    title: &'a str,
    author: Option<&'a str>,
    description: Option<&'a str>,
}

/// Renders the index and project pages for a resolved collection.
///
/// Holds the compiled templates and site metadata only; the project data is
/// passed to each render call, so one renderer can be reused across
/// rebuilds of the same template set.
pub struct SiteRenderer {
    tera: Tera,
    site: SiteConfig,
}

impl std::fmt::Debug for SiteRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteRenderer").field("site", &self.site).finish_non_exhaustive()
    }
}

impl SiteRenderer {
    /// Compile the built-in templates, replacing any that exist in `templates_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::Render`] if a template fails to parse or an
    /// override exists but cannot be read.
    pub fn new(site: SiteConfig, templates_dir: Option<&Path>) -> Result<Self> {
        let mut sources = Vec::with_capacity(PageTemplate::ALL.len());
        for template in PageTemplate::ALL {
            let name = template.file_name();
            let source = match templates_dir.map(|dir| dir.join(name)).filter(|p| p.is_file()) {
                Some(path) => {
                    tracing::debug!("Using template override {}", path.display());
                    FileOps::read_with_context(&path, "loading template override", "templating")
                        .map_err(|e| FolioError::Render {
                            template: name.to_string(),
                            reason: format!("cannot read {}: {}", path.display(), e.source),
                        })?
                }
                None => template.builtin().to_string(),
            };
            sources.push((name, source));
        }

        let mut tera = Tera::default();
        // Registered together so `extends` can resolve regardless of order.
        tera.add_raw_templates(sources).map_err(|e| {
            let mut reason = format_tera_error(&e);
            if let Some(line) = extract_line_from_tera_error(&e) {
                reason.push_str(&format!(" (line {line})"));
            }
            FolioError::Render {
                template: "<templates>".to_string(),
                reason,
            }
        })?;

        Ok(Self {
            tera,
            site,
        })
    }

    /// Render the project listing.
    pub fn render_index(&self, view: &ProjectsView) -> Result<String, FolioError> {
        let mut context = self.base_context("");
        context.insert("projects", &view.projects);
        self.render(PageTemplate::Index, &context)
    }

    /// Render the detail page for the project at `index` (source order).
    ///
    /// # Errors
    ///
    /// [`FolioError::Render`] when `index` is out of range.
    pub fn render_project(&self, view: &ProjectsView, index: usize) -> Result<String, FolioError> {
        let project = view.get(index).ok_or_else(|| FolioError::Render {
            template: PageTemplate::Project.file_name().to_string(),
            reason: format!("Project {index} not found ({} project(s) loaded)", view.len()),
        })?;

        let mut context = self.base_context("../");
        context.insert("project", project);
        context.insert("project_id", &index);
        self.render(PageTemplate::Project, &context)
    }

    fn base_context(&self, root: &str) -> TeraContext {
        let mut context = TeraContext::new();
        context.insert(
            "site",
            &SiteContext {
                title: &self.site.title,
                author: self.site.author.as_deref(),
                description: self.site.description.as_deref(),
            },
        );
        context.insert("root", root);
        context
    }

    fn render(&self, template: PageTemplate, context: &TeraContext) -> Result<String, FolioError> {
        let name = template.file_name();
        tracing::trace!("Rendering {}", name);
        self.tera.render(name, context).map_err(|e| FolioError::Render {
            template: name.to_string(),
            reason: format_tera_error(&e),
        })
    }
}

/// Flatten a Tera error chain into one readable message.
///
/// Tera wraps the useful cause (missing variable, bad filter, parse error)
/// in generic "Failed to render" layers; those layers are dropped.
pub(crate) fn format_tera_error(error: &tera::Error) -> String {
    use std::error::Error;

    let mut messages = vec![error.to_string()];
    let mut current: Option<&dyn Error> = error.source();
    while let Some(err) = current {
        messages.push(err.to_string());
        current = err.source();
    }

    let useful: Vec<String> = messages
        .into_iter()
        .map(|msg| msg.trim().to_string())
        .filter(|msg| !msg.is_empty() && !msg.starts_with("Failed to render"))
        .collect();

    if useful.is_empty() {
        "Template rendering failed".to_string()
    } else {
        useful.join("\n  → ")
    }
}

/// Tera reports template parse positions as `line:column`.
static LINE_COLUMN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+):(\d+)").expect("valid line:column regex"));

fn extract_line_from_tera_error(error: &tera::Error) -> Option<usize> {
    let message = format!("{error:?}");
    LINE_COLUMN_RE.captures(&message)?.get(1)?.as_str().parse().ok()
}
