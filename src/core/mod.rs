//! Core types and error handling for folio.
//!
//! - [`error`] - [`FolioError`], [`ErrorContext`], and [`user_friendly_error`]
//! - [`file_error`] - I/O errors annotated with the operation and purpose

pub mod error;
pub mod file_error;

pub use error::{ErrorContext, FolioError, user_friendly_error};
pub use file_error::{FileOperation, FileOperationError, FileOps, FileResultExt};
