//! Integration test suite for folio
//!
//! End-to-end tests that run the `folio` binary against temporary site
//! directories.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **validate**: exit codes, text and JSON output, strict mode
//! - **build**: static export, output directory handling, site config
//! - **cli**: help text and argument handling

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod build;
mod cli;
mod validate;
