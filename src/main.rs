//! folio CLI entry point
//!
//! Parses arguments, runs the command, and turns any error into a
//! colored message with a suggestion before exiting with status 1.
//!
//! - `validate` - Check projects.yaml and tools.yaml
//! - `build` - Export the static site
//! - `serve` - Live preview with rebuild on change

use anyhow::Result;
use clap::Parser;
use folio_cli::cli;
use folio_cli::core::error::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
