//! Arguments and output helpers shared by the CLI commands.

use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use crate::catalog::{Catalog, LoadReport};
use crate::constants::{DEFAULT_PROJECTS_FILE, DEFAULT_TOOLS_FILE};
use crate::models::ProjectsView;

/// The project list and tool catalog a command reads.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Path to the YAML file containing project data
    #[arg(value_name = "PROJECTS", env = "FOLIO_PROJECTS", default_value = DEFAULT_PROJECTS_FILE)]
    pub projects: PathBuf,

    /// Path to the YAML file containing the tool catalog
    #[arg(value_name = "TOOLS", env = "FOLIO_TOOLS", default_value = DEFAULT_TOOLS_FILE)]
    pub tools: PathBuf,
}

impl SourceArgs {
    pub fn catalog(&self) -> Catalog {
        Catalog::new(&self.projects, &self.tools)
    }
}

/// Green "Found N projects" line printed after every successful load.
pub fn print_loaded(report: &LoadReport) {
    println!(
        "{} Files are valid! Found {} projects and {} tools.",
        "✓".green(),
        report.view.len(),
        report.tool_count
    );
}

/// Print each warning in yellow.
pub fn print_warnings(report: &LoadReport) {
    for warning in report.warnings() {
        println!("{} Warning: {warning}", "⚠".yellow());
    }
}

/// Numbered listing of the loaded projects.
pub fn display_projects(view: &ProjectsView) {
    println!("Loaded {} projects:", view.len());
    for (i, project) in view.projects.iter().enumerate() {
        println!("\n{}. {}", i + 1, project.name.bold());
        if let Some(date) = &project.date {
            println!("   Date: {date}");
        }
        println!("   Description: {}", project.description.trim());

        if !project.tools.is_empty() {
            let names: Vec<&str> = project.tools.iter().map(|tool| tool.name.as_str()).collect();
            println!("   Tools: {}", names.join(", "));
        }
        if let Some(link) = &project.project_link {
            println!("   Project Link: {link}");
        }
        if let Some(link) = &project.github_link {
            println!("   GitHub Link: {link}");
        }
    }
}
