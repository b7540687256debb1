//! Validation execution logic.

use anyhow::Result;
use colored::Colorize;

use crate::cli::common::{display_projects, print_loaded, print_warnings};
use crate::core::FolioError;

use super::command::{OutputFormat, ValidateCommand};
use super::results::ValidationResults;

impl ValidateCommand {
    /// Run validation. `quiet` suppresses text output but never JSON.
    pub fn execute(self, quiet: bool) -> Result<()> {
        let json = self.format == OutputFormat::Json;
        let mut results = ValidationResults::new(&self.sources);

        if !json && !quiet {
            println!(
                "{}",
                format!("Validating projects from {}...", self.sources.projects.display()).yellow()
            );
        }

        let report = match self.sources.catalog().load_report() {
            Ok(report) => report,
            Err(e) => {
                results.errors.push(format!("{e:#}"));
                if json {
                    println!("{}", serde_json::to_string_pretty(&results)?);
                } else if !quiet {
                    println!("{} Error validating project data", "✗".red());
                }
                return Err(e);
            }
        };

        results.project_count = report.view.len();
        results.tool_count = report.tool_count;
        results.warnings = report.warnings();

        // Strict mode: warnings become errors
        if self.strict && !results.warnings.is_empty() {
            let count = results.warnings.len();
            results.errors.append(&mut results.warnings);
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else if !quiet {
                for error in &results.errors {
                    println!("{} {error}", "✗".red());
                }
                println!("{} Strict mode: warnings treated as errors", "✗".red());
            }
            return Err(FolioError::Validation {
                file: self.sources.projects.display().to_string(),
                reason: format!("strict mode: {count} warning(s) treated as errors"),
            }
            .into());
        }

        results.valid = true;
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&results)?);
            }
            OutputFormat::Text => {
                if !quiet {
                    print_loaded(&report);
                    print_warnings(&report);
                    if self.list {
                        display_projects(&report.view);
                    }
                }
            }
        }

        Ok(())
    }
}
