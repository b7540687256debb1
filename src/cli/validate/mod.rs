//! Validate the project list and tool catalog.
//!
//! Loads both files exactly as `build` and `serve` would and reports the
//! outcome. Exit status is 0 when both files parse and satisfy the schema,
//! 1 otherwise.
//!
//! Unknown tool references and duplicate tool ids are warnings: the site
//! still builds, with the reference dropped or the last definition used.
//! `--strict` turns them into failures, which is useful in CI.
//!
//! # Examples
//!
//! ```bash
//! folio validate
//! folio validate data/projects.yaml data/tools.yaml --strict
//! folio validate --format json
//! ```

mod command;
mod executor;
mod results;

pub use command::{OutputFormat, ValidateCommand};
pub use results::ValidationResults;
