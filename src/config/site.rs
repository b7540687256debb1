use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_BUILD_DIR, DEFAULT_STATIC_DIR, SITE_CONFIG_FILE};
use crate::core::{FileOps, FolioError};

fn default_title() -> String {
    "Projects".to_string()
}

/// Values from `folio.toml`.
///
/// `title`, `author`, and `description` are exposed to templates as
/// `site.*`; the directory keys provide defaults for the command flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Output directory for `build` and `serve`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// Asset directory copied to `<output>/static`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<PathBuf>,

    /// Directory whose `*.html` files override the built-in templates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates_dir: Option<PathBuf>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            author: None,
            description: None,
            output_dir: None,
            static_dir: None,
            templates_dir: None,
        }
    }
}

impl SiteConfig {
    /// Load from `path`, or from `folio.toml` when `path` is `None`.
    ///
    /// A missing default file yields [`SiteConfig::default`]; an explicitly
    /// requested file must exist.
    pub fn load_with_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let default_path = Path::new(SITE_CONFIG_FILE);
                if default_path.exists() {
                    Self::load_from(default_path)
                } else {
                    tracing::debug!("No {} found, using default site configuration", SITE_CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load and parse a specific configuration file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content =
            FileOps::read_with_context(path, "reading site configuration", "config").map_err(|e| {
                anyhow::Error::from(FolioError::Config {
                    message: format!("cannot read {}: {}", path.display(), e.source),
                })
                .context(e.user_message())
            })?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self> {
        let config = toml::from_str(content).map_err(|e| FolioError::Config {
            message: format!("{}: {}", path.display(), e.message()),
        })?;
        tracing::debug!("Loaded site configuration from {}", path.display());
        Ok(config)
    }

    /// `--output` if given, else `output_dir`, else `build`.
    pub fn resolve_output_dir(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.output_dir.clone()).unwrap_or_else(|| PathBuf::from(DEFAULT_BUILD_DIR))
    }

    /// `--templates` if given, else `templates_dir`.
    pub fn resolve_templates_dir(&self, flag: Option<PathBuf>) -> Option<PathBuf> {
        flag.or_else(|| self.templates_dir.clone())
    }

    /// `static_dir`, else `static`. May not exist; the exporter skips it then.
    pub fn resolve_static_dir(&self) -> PathBuf {
        self.static_dir.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR))
    }
}
