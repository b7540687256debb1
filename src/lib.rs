//! folio - a portfolio site builder
//!
//! folio reads two human-authored YAML files, a list of projects and a
//! catalog of tools, resolves each project's tool references against the
//! catalog, and renders the result into a static HTML site. A watch mode
//! rebuilds on every edit and serves the output on localhost.
//!
//! # Data files
//!
//! ```yaml
//! # tools.yaml
//! tools:
//!   - id: py
//!     name: Python
//!     icon: devicon-python-plain
//!     color: "#3776ab"
//!
//! # projects.yaml
//! projects:
//!   - name: Portfolio Site
//!     description: The site itself.
//!     tools: [py, ts]   # `ts` is not in the catalog and is dropped
//! ```
//!
//! # Pipeline
//!
//! ```text
//! projects.yaml ─┐
//!                ├─ schema ─ catalog ─ ProjectsView ─ templating ─ site::export ─ build/
//! tools.yaml ────┘                                                                  │
//!                      watch (rebuild on change) ──────────────────────────────────┤
//!                                                               server (localhost) ─┘
//! ```
//!
//! # Modules
//!
//! - [`models`] - tool, project, and resolved view types
//! - [`schema`] - parsing and field validation of the raw YAML
//! - [`catalog`] - loading both files and resolving references
//! - [`templating`] - Tera rendering of the index and project pages
//! - [`site`] - routes and static export
//! - [`watch`] - debounced watch-and-rebuild loop
//! - [`server`] - local preview server
//! - [`config`] - `folio.toml` site settings
//! - [`cli`] - command implementations
//!
//! ```rust
//! use folio_cli::schema::validate;
//!
//! assert!(validate("projects:\n  - name: A\n    description: B\n").unwrap());
//! ```

// Core functionality modules
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;

// Data loading
pub mod catalog;
pub mod models;
pub mod schema;

// Output
pub mod server;
pub mod site;
pub mod templating;
pub mod watch;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
