//! Portfolio data model.
//!
//! Two YAML documents feed the site:
//!
//! ```yaml
//! # projects.yaml
//! projects:
//!   - name: Portfolio Site
//!     date: Oct 2025
//!     description: The site you are looking at.
//!     tools: [rust, ts]
//!     project-link: https://example.com
//!     github-link: https://github.com/example/site
//!
//! # tools.yaml
//! tools:
//!   - id: rust
//!     name: Rust
//!     icon: devicon-rust-plain
//!     color: "#dea584"
//!     icon-color: "#000000"
//! ```
//!
//! Hyphenated keys (`project-link`, `github-link`, `icon-color`) and their
//! snake_case spellings are both accepted. Everything here is a plain value:
//! a fresh set is built on every load and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A reusable technology tag shown on project cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    /// Unique key referenced from `Project::tools`
    pub id: String,
    /// Display name
    pub name: String,
    /// Icon identifier (e.g. a devicon class)
    pub icon: String,
    /// Badge color
    pub color: String,
    /// Icon color override
    #[serde(default, alias = "icon-color")]
    pub icon_color: Option<String>,
}

/// The tool catalog document (`tools:` sequence).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tools {
    #[serde(default)]
    pub tools: Vec<Tool>,
}

/// Tool lookup keyed by `id`.
///
/// Built from an ordered sequence; a later entry with the same id replaces
/// an earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolCatalog {
    by_id: HashMap<String, Tool>,
}

impl ToolCatalog {
    /// Number of distinct ids.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Tool> {
        self.by_id.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Resolve `ids` in order, skipping ids the catalog does not know.
    pub fn resolve(&self, ids: &[String]) -> Vec<Tool> {
        ids.iter().filter_map(|id| self.get(id).cloned()).collect()
    }
}

impl FromIterator<Tool> for ToolCatalog {
    fn from_iter<I: IntoIterator<Item = Tool>>(iter: I) -> Self {
        let mut by_id = HashMap::new();
        for tool in iter {
            by_id.insert(tool.id.clone(), tool);
        }
        Self {
            by_id,
        }
    }
}

impl From<Tools> for ToolCatalog {
    fn from(tools: Tools) -> Self {
        tools.tools.into_iter().collect()
    }
}

/// A portfolio entry as authored in `projects.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub date: Option<String>,
    pub description: String,
    /// Tool ids, resolved against the [`ToolCatalog`] at load time
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default, alias = "project-link")]
    pub project_link: Option<String>,
    #[serde(default, alias = "github-link")]
    pub github_link: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// The project list document (`projects:` sequence), in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projects {
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl Projects {
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

/// A [`Project`] whose tool ids have been replaced by catalog entries.
///
/// This is what the templates see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectView {
    pub name: String,
    pub date: Option<String>,
    pub description: String,
    pub tools: Vec<Tool>,
    pub project_link: Option<String>,
    pub github_link: Option<String>,
    pub image: Option<String>,
}

impl ProjectView {
    /// Build the resolved view of `project`, dropping unknown tool ids.
    pub fn resolve(project: Project, catalog: &ToolCatalog) -> Self {
        let tools = catalog.resolve(&project.tools);
        Self {
            name: project.name,
            date: project.date,
            description: project.description,
            tools,
            project_link: project.project_link,
            github_link: project.github_link,
            image: project.image,
        }
    }
}

/// Resolved projects in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectsView {
    pub projects: Vec<ProjectView>,
}

impl ProjectsView {
    /// Resolve every project against `catalog`, keeping source order.
    pub fn resolve(projects: Projects, catalog: &ToolCatalog) -> Self {
        Self {
            projects: projects
                .projects
                .into_iter()
                .map(|project| ProjectView::resolve(project, catalog))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ProjectView> {
        self.projects.get(index)
    }
}
