//! Global constants used throughout the folio codebase.
//!
//! Default file names, the watch debounce window, and the preview server's
//! port preferences live here so the CLI, the watcher, and the tests agree
//! on the same values.

use std::time::Duration;

/// Default project list, relative to the working directory.
pub const DEFAULT_PROJECTS_FILE: &str = "projects.yaml";

/// Default tool catalog, relative to the working directory.
pub const DEFAULT_TOOLS_FILE: &str = "tools.yaml";

/// Default output directory for `folio build`.
pub const DEFAULT_BUILD_DIR: &str = "build";

/// Optional site configuration file looked up in the working directory.
pub const SITE_CONFIG_FILE: &str = "folio.toml";

/// Directory of static assets copied verbatim into the exported site.
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Minimum time between two accepted change events (500ms).
///
/// Editors often emit several modify notifications for a single save; only
/// the first one inside this window triggers a rebuild.
pub const DEBOUNCE_INTERVAL: Duration = Duration::from_millis(500);

/// Ports tried in order when `--port` is not given.
pub const PREFERRED_PORTS: [u16; 4] = [3000, 5000, 8000, 8080];

/// File suffixes that trigger a rebuild when watching a whole directory.
///
/// Covers the data files, templates, and the page assets under `static/`.
pub const WATCHED_SUFFIXES: [&str; 5] = [".yaml", ".yml", ".html", ".css", ".js"];
