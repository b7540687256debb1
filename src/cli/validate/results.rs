//! Validation results structure for JSON output.

use serde::Serialize;

use crate::cli::common::SourceArgs;

/// Outcome of `folio validate --format json`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ValidationResults {
    pub valid: bool,
    pub projects_file: String,
    pub tools_file: String,
    pub project_count: usize,
    pub tool_count: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResults {
    pub fn new(sources: &SourceArgs) -> Self {
        Self {
            valid: false,
            projects_file: sources.projects.display().to_string(),
            tools_file: sources.tools.display().to_string(),
            project_count: 0,
            tool_count: 0,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }
}
