//! Command structure and output format definitions for validation.

use clap::Args;

use crate::cli::common::SourceArgs;

/// Arguments for `folio validate`.
#[derive(Args, Debug)]
pub struct ValidateCommand {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Treat warnings (unknown tool references, duplicate tool ids) as errors
    #[arg(long)]
    pub strict: bool,

    /// Also print the resolved project listing
    #[arg(long)]
    pub list: bool,
}

/// Output format for validation results.
#[derive(Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Colored status lines
    Text,

    /// A single JSON object, for scripts and CI
    Json,
}
