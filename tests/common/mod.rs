//! Common test utilities for folio integration tests

// Not every helper is used by every test module
#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

use folio_cli::test_utils::SiteFixture;

/// A site directory plus a way to run the folio binary inside it.
pub struct TestSite {
    fixture: SiteFixture,
}

impl TestSite {
    /// Portfolio sample data (two projects, one unknown tool reference).
    pub fn portfolio() -> Result<Self> {
        Ok(Self {
            fixture: SiteFixture::portfolio()?,
        })
    }

    /// No data files at all.
    pub fn empty() -> Result<Self> {
        Ok(Self {
            fixture: SiteFixture::empty()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.fixture.path()
    }

    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.path().join(relative)
    }

    pub fn write_projects(&self, content: &str) -> Result<()> {
        self.fixture.write_projects(content)
    }

    pub fn write_tools(&self, content: &str) -> Result<()> {
        self.fixture.write_tools(content)
    }

    pub fn write_file(&self, relative: &str, content: &str) -> Result<()> {
        self.fixture.write_file(relative, content)
    }

    /// `folio` with the site as working directory and no FOLIO_* overrides.
    pub fn folio(&self) -> Command {
        let mut cmd = Command::cargo_bin("folio").unwrap();
        cmd.current_dir(self.path())
            .env_remove("FOLIO_PROJECTS")
            .env_remove("FOLIO_TOOLS")
            .env_remove("FOLIO_OUTPUT")
            .env_remove("FOLIO_PORT")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }

    /// Run `folio` with `args` and capture the result.
    pub fn run_folio(&self, args: &[&str]) -> CommandOutput {
        let output = self.folio().args(args).output().unwrap();
        CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Command output helper
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl CommandOutput {
    /// Assert the command succeeded
    pub fn assert_success(&self) -> &Self {
        assert!(
            self.success,
            "Command failed with code {:?}\nStdout: {}\nStderr: {}",
            self.code, self.stdout, self.stderr
        );
        self
    }

    /// Assert the command exited with status 1
    pub fn assert_failure(&self) -> &Self {
        assert_eq!(self.code, Some(1), "Expected exit code 1\nStdout: {}", self.stdout);
        self
    }

    /// Assert stdout contains the given text
    pub fn assert_stdout_contains(&self, text: &str) -> &Self {
        assert!(
            self.stdout.contains(text),
            "Expected stdout to contain '{}'\nActual stdout: {}",
            text,
            self.stdout
        );
        self
    }

    /// Assert stderr contains the given text
    pub fn assert_stderr_contains(&self, text: &str) -> &Self {
        assert!(
            self.stderr.contains(text),
            "Expected stderr to contain '{}'\nActual stderr: {}",
            text,
            self.stderr
        );
        self
    }
}

/// Assert a file exists and contains `expected`.
pub fn assert_file_contains(path: impl AsRef<Path>, expected: &str) {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read file {}: {}", path.display(), e));
    assert!(
        content.contains(expected),
        "Expected file {} to contain '{}'\nActual content: {}",
        path.display(),
        expected,
        content
    );
}
