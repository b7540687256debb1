//! HTML rendering with Tera.
//!
//! Three templates make up a site:
//!
//! | Template | Route | Context |
//! |----------|-------|---------|
//! | `base.html` | - | layout shared by the other two |
//! | `index.html` | `/` | `site`, `projects`, `root` |
//! | `project.html` | `/project/<n>` | `site`, `project`, `project_id`, `root` |
//!
//! Built-in versions are compiled into the binary. A templates directory
//! (`--templates` or `templates_dir` in `folio.toml`) may replace any of
//! them with a file of the same name; the rest keep their built-in source.
//!
//! `root` is the relative prefix from the page back to the site root
//! (`""` for the index, `"../"` for project pages), so exported sites work
//! when opened straight from disk.

mod renderer;

pub use renderer::{PageTemplate, SiteRenderer};
