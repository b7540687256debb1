//! Catalog loading: project list + tool catalog → resolved projects.
//!
//! [`load`] is the whole pipeline: read both files, parse and validate
//! them, then replace every project's tool ids with the matching catalog
//! entries. Unknown ids are dropped without an error; that is a resolution
//! policy, not a failure. [`Catalog::load_report`] runs the same pipeline
//! but also keeps the dropped references and duplicate ids so `validate`
//! can surface them as warnings.
//!
//! Nothing is cached. Each call is an independent read-parse-validate-resolve
//! pass, so calling it twice on unchanged files yields equal results and a
//! failure never produces a partial collection.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_PROJECTS_FILE, DEFAULT_TOOLS_FILE};
use crate::core::{FileOps, FolioError};
use crate::models::{Projects, ProjectsView, ToolCatalog, Tools};
use crate::schema;

/// Read, parse, validate, and resolve the two data files.
///
/// # Errors
///
/// - [`FolioError::SourceRead`] if either file is missing or unreadable
/// - [`FolioError::Validation`] if either document fails the schema
pub fn load(project_path: &Path, tool_path: &Path) -> Result<ProjectsView> {
    Catalog::new(project_path, tool_path).load()
}

/// Read and validate only the project list.
pub fn load_projects(path: &Path) -> Result<Projects> {
    let raw = read_source(path, "loading project list")?;
    let projects = schema::parse_projects(&raw, &path.display().to_string())?;
    tracing::debug!("Parsed {} project(s) from {}", projects.len(), path.display());
    Ok(projects)
}

/// Read and validate only the tool catalog.
pub fn load_tools(path: &Path) -> Result<Tools> {
    let raw = read_source(path, "loading tool catalog")?;
    let tools = schema::parse_tools(&raw, &path.display().to_string())?;
    tracing::debug!("Parsed {} tool(s) from {}", tools.tools.len(), path.display());
    Ok(tools)
}

fn read_source(path: &Path, purpose: &str) -> Result<String> {
    // Missing sources always surface as SourceRead.
    FileOps::read_with_context(path, purpose, "catalog").map_err(|e| {
        anyhow::Error::from(FolioError::SourceRead {
            path: path.display().to_string(),
            reason: e.source.to_string(),
        })
        .context(e.user_message())
    })
}

/// A reference from a project to a tool id missing from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    /// Name of the referencing project
    pub project: String,
    /// The unknown tool id
    pub tool_id: String,
}

/// Result of a full load plus the data-quality findings that are not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub view: ProjectsView,
    /// Distinct tool ids in the catalog
    pub tool_count: usize,
    /// Tool references that were dropped, in project then reference order
    pub dangling: Vec<DanglingReference>,
    /// Tool ids defined more than once (the last definition is used)
    pub duplicate_tool_ids: Vec<String>,
}

impl LoadReport {
    /// Human-readable warnings, one per finding.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings: Vec<String> = self
            .duplicate_tool_ids
            .iter()
            .map(|id| format!("Tool id '{id}' is defined more than once; the last definition wins"))
            .collect();
        warnings.extend(self.dangling.iter().map(|d| {
            format!("Project '{}' references unknown tool '{}' (ignored)", d.project, d.tool_id)
        }));
        warnings
    }
}

/// The two source paths a site is built from.
///
/// Passed explicitly to everything that loads data; there is no process-wide
/// "current catalog".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    project_path: PathBuf,
    tool_path: PathBuf,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(DEFAULT_PROJECTS_FILE, DEFAULT_TOOLS_FILE)
    }
}

impl Catalog {
    pub fn new(project_path: impl Into<PathBuf>, tool_path: impl Into<PathBuf>) -> Self {
        Self {
            project_path: project_path.into(),
            tool_path: tool_path.into(),
        }
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    pub fn tool_path(&self) -> &Path {
        &self.tool_path
    }

    /// Load and resolve the collection. See [`load`].
    pub fn load(&self) -> Result<ProjectsView> {
        self.load_report().map(|report| report.view)
    }

    /// Load and resolve, keeping warnings about dropped references and duplicates.
    pub fn load_report(&self) -> Result<LoadReport> {
        let projects = load_projects(&self.project_path).with_context(|| {
            format!("Failed to load projects from {}", self.project_path.display())
        })?;
        let tools = load_tools(&self.tool_path)
            .with_context(|| format!("Failed to load tools from {}", self.tool_path.display()))?;

        let duplicate_tool_ids = schema::duplicate_tool_ids(&tools.tools);
        for id in &duplicate_tool_ids {
            tracing::warn!("Tool id '{}' is defined more than once in {}", id, self.tool_path.display());
        }

        let catalog = ToolCatalog::from(tools);

        let dangling: Vec<DanglingReference> = projects
            .projects
            .iter()
            .flat_map(|project| {
                project.tools.iter().filter(|id| !catalog.contains(id)).map(|id| DanglingReference {
                    project: project.name.clone(),
                    tool_id: id.clone(),
                })
            })
            .collect();
        for reference in &dangling {
            tracing::debug!(
                "Dropping unknown tool '{}' from project '{}'",
                reference.tool_id,
                reference.project
            );
        }

        let view = ProjectsView::resolve(projects, &catalog);
        tracing::debug!("Resolved {} project(s) against {} tool(s)", view.len(), catalog.len());

        Ok(LoadReport {
            view,
            tool_count: catalog.len(),
            dangling,
            duplicate_tool_ids,
        })
    }
}
