//! Error handling for folio
//!
//! The error system follows two rules:
//! 1. **Strongly-typed errors** ([`FolioError`]) for the failure modes the
//!    loader, renderer, exporter, and preview server can hit
//! 2. **User-friendly messages** ([`ErrorContext`]) with details and an
//!    actionable suggestion when an error reaches the command boundary
//!
//! # Error Categories
//!
//! - **Sources**: [`FolioError::SourceRead`] when a data file is missing or unreadable
//! - **Validation**: [`FolioError::Validation`] when YAML does not parse or
//!   does not match the project/tool schema
//! - **Output**: [`FolioError::Export`] and [`FolioError::Render`]
//! - **Runtime**: [`FolioError::Server`] and [`FolioError::Config`]
//! - **Other**: [`FolioError::Other`] for failures outside these categories
//!
//! # Examples
//!
//! ```rust,no_run
//! use folio_cli::core::{FolioError, user_friendly_error};
//!
//! let err = FolioError::Validation {
//!     file: "projects.yaml".to_string(),
//!     reason: "projects[0]: missing field `description`".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(err));
//! ctx.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use super::file_error::{FileOperation, FileOperationError};

/// The main error type for folio operations.
///
/// Every variant carries owned strings so errors can be cloned into an
/// [`ErrorContext`] and printed from the watch loop without holding borrows.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FolioError {
    /// A source data file is missing or could not be read.
    #[error("Cannot read source file {path}: {reason}")]
    SourceRead {
        /// The path that failed
        path: String,
        /// The underlying I/O failure
        reason: String,
    },

    /// Parsed content failed the schema checks.
    ///
    /// `reason` describes the first violation encountered.
    #[error("Validation failed for {file}: {reason}")]
    Validation {
        /// The file (or `<input>` for in-memory text) being validated
        file: String,
        /// Description of the first violation
        reason: String,
    },

    /// Writing the static site failed.
    #[error("Failed to export site to {path}: {reason}")]
    Export {
        /// The output path that could not be written
        path: String,
        /// The underlying failure
        reason: String,
    },

    /// A page template failed to render.
    #[error("Failed to render template '{template}': {reason}")]
    Render {
        /// Template name (e.g. `project.html`)
        template: String,
        /// Cleaned-up Tera error message
        reason: String,
    },

    /// The preview server could not start.
    #[error("Preview server error: {reason}")]
    Server {
        /// Why the listener could not be bound
        reason: String,
    },

    /// The site configuration file is invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error
        message: String,
    },

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

/// Error with user-facing details and a suggestion.
///
/// Built by [`user_friendly_error`] at the command boundary and printed by
/// [`ErrorContext::display`].
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying folio error
    pub error: FolioError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: FolioError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr: error in red, details in yellow,
    /// suggestion in green.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] with a suggestion.
///
/// Walks the error chain looking for a [`FolioError`] or a
/// [`FileOperationError`]. Anything else is reported with its top-level
/// message and the rest of the chain as details.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    for cause in error.chain() {
        if let Some(folio_error) = cause.downcast_ref::<FolioError>() {
            return create_error_context(folio_error.clone());
        }

        if let Some(file_error) = cause.downcast_ref::<FileOperationError>() {
            let path = file_error.file_path.display().to_string();
            let reason = file_error.source.to_string();
            return match file_error.operation {
                FileOperation::Read => ErrorContext::new(FolioError::SourceRead {
                    path: path.clone(),
                    reason,
                })
                .with_suggestion(format!("Check that {path} exists and is readable")),
                FileOperation::Write
                | FileOperation::CreateDir
                | FileOperation::Copy
                | FileOperation::Remove => ErrorContext::new(FolioError::Export {
                    path: path.clone(),
                    reason,
                })
                .with_suggestion(format!("Check that {path} is writable")),
            }
            .with_details(file_error.user_message());
        }
    }

    let chain = error.chain().skip(1).map(ToString::to_string).collect::<Vec<_>>();
    let mut context = ErrorContext::new(FolioError::Other {
        message: error.to_string(),
    });
    if !chain.is_empty() {
        context = context.with_details(chain.join("\n  → "));
    }
    context
}

fn create_error_context(error: FolioError) -> ErrorContext {
    match &error {
        FolioError::SourceRead {
            path,
            ..
        } => {
            let suggestion = format!(
                "Check that {path} exists, or pass the file path explicitly (e.g. `folio validate my-projects.yaml my-tools.yaml`)"
            );
            ErrorContext::new(error).with_suggestion(suggestion)
        }
        FolioError::Validation {
            ..
        } => ErrorContext::new(error)
            .with_details(
                "Every project needs a non-empty `name` and `description`; every tool needs `id`, `name`, `icon`, and `color`",
            )
            .with_suggestion("Fix the first reported field and re-run `folio validate`"),
        FolioError::Export {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check that the output directory is writable, or choose another with --output"),
        FolioError::Render {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check your template syntax and the variables it references"),
        FolioError::Server {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Free one of the default ports or pass --port"),
        FolioError::Config {
            ..
        } => ErrorContext::new(error),
        FolioError::Other {
            ..
        } => ErrorContext::new(error),
    }
}
