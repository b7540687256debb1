//! Test utilities for folio
//!
//! Helpers shared by unit tests and the integration suite: a throwaway site
//! directory with sample data files, and opt-in logging.
//!
//! # Example
//!
//! ```rust,no_run
//! use folio_cli::test_utils::SiteFixture;
//!
//! let site = SiteFixture::portfolio().unwrap();
//! assert!(site.projects_path().exists());
//! ```

pub mod fixtures;

pub use fixtures::{ProjectsFixture, SiteFixture, ToolsFixture};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Install a test-friendly tracing subscriber once per process.
///
/// Uses `level` if given, else `RUST_LOG`; with neither, logging stays off.
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
