//! Site configuration for folio.
//!
//! Configuration comes from three layers, highest precedence first:
//!
//! 1. Command-line flags (`--output`, `--templates`, `--port`)
//! 2. Environment variables read by clap (`FOLIO_PROJECTS`, `FOLIO_TOOLS`,
//!    `FOLIO_OUTPUT`, `FOLIO_PORT`)
//! 3. An optional `folio.toml` in the working directory (or `--config PATH`)
//!
//! ```toml
//! title = "Jane Doe"
//! author = "Jane Doe"
//! description = "Things I have built"
//! output_dir = "public"
//! static_dir = "assets"
//! templates_dir = "templates"
//! ```
//!
//! Every key is optional; a missing file means all defaults.

mod site;

pub use site::SiteConfig;
