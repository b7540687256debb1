//! Sample data files and a temporary site directory to put them in.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::constants::{DEFAULT_PROJECTS_FILE, DEFAULT_TOOLS_FILE};

/// Sample `projects.yaml` contents.
#[derive(Clone, Debug)]
pub struct ProjectsFixture {
    pub content: String,
}

impl ProjectsFixture {
    /// Two projects; the first references one unknown tool (`ts`).
    pub fn portfolio() -> Self {
        Self {
            content: r#"
projects:
  - name: Portfolio Site
    date: Oct 2025
    description: |
      The site you are looking at.
    tools: [py, ts]
    project-link: https://example.com
    github-link: https://github.com/example/portfolio
  - name: Log Shipper
    description: Tails files and ships them upstream.
    tools: [rust, py]
"#
            .trim_start()
            .to_string(),
        }
    }

    /// Unbalanced flow sequence.
    pub fn malformed() -> Self {
        Self {
            content: "projects:\n  - name: Broken\n    tools: [py\n".to_string(),
        }
    }

    /// Parses, but the project has no description.
    pub fn missing_description() -> Self {
        Self {
            content: "projects:\n  - name: Terse\n    tools: []\n".to_string(),
        }
    }
}

/// Sample `tools.yaml` contents.
#[derive(Clone, Debug)]
pub struct ToolsFixture {
    pub content: String,
}

impl ToolsFixture {
    pub fn basic() -> Self {
        Self {
            content: r##"
tools:
  - id: py
    name: Python
    icon: devicon-python-plain
    color: "#3776ab"
    icon-color: "#ffd43b"
  - id: rust
    name: Rust
    icon: devicon-rust-plain
    color: "#000000"
"##
            .trim_start()
            .to_string(),
        }
    }

    /// `py` is defined twice; the second definition wins.
    pub fn with_duplicate() -> Self {
        let mut content = Self::basic().content;
        content.push_str(
            "  - id: py\n    name: Python 3\n    icon: devicon-python-plain\n    color: \"#306998\"\n",
        );
        Self {
            content,
        }
    }
}

/// A temporary directory holding `projects.yaml` and `tools.yaml`.
///
/// The directory is removed when the fixture is dropped.
#[derive(Debug)]
pub struct SiteFixture {
    temp_dir: TempDir,
}

impl SiteFixture {
    /// Empty directory, no data files.
    pub fn empty() -> Result<Self> {
        super::init_test_logging(None);
        let temp_dir = TempDir::new().context("Failed to create temp dir")?;
        Ok(Self {
            temp_dir,
        })
    }

    /// [`ProjectsFixture::portfolio`] and [`ToolsFixture::basic`].
    pub fn portfolio() -> Result<Self> {
        let site = Self::empty()?;
        site.write_projects(&ProjectsFixture::portfolio().content)?;
        site.write_tools(&ToolsFixture::basic().content)?;
        Ok(site)
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn projects_path(&self) -> PathBuf {
        self.path().join(DEFAULT_PROJECTS_FILE)
    }

    pub fn tools_path(&self) -> PathBuf {
        self.path().join(DEFAULT_TOOLS_FILE)
    }

    pub fn write_projects(&self, content: &str) -> Result<()> {
        self.write_file(DEFAULT_PROJECTS_FILE, content)
    }

    pub fn write_tools(&self, content: &str) -> Result<()> {
        self.write_file(DEFAULT_TOOLS_FILE, content)
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn write_file(&self, relative: impl AsRef<Path>, content: &str) -> Result<()> {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))
    }
}
