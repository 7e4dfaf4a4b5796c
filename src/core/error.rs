//! Error kinds crossing the navigation controller boundary.
//!
//! Every fallible operation in the core returns one of these; nothing panics
//! across the boundary. A whole-directory failure surfaces as the Error phase
//! of the navigation state, while preview failures stay local to the preview
//! sub-controller.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum NavError {
    /// The whole directory read failed (permission denied, not found, ...).
    #[error("could not read directory: {0}")]
    DirectoryReadFailed(String),

    /// The file exceeds the preview byte limit; rejected before reading.
    #[error("file too large for preview ({size} bytes, limit {limit})")]
    PreviewTooLarge { size: u64, limit: u64 },

    /// Preview was requested for something that is not a regular file.
    #[error("not a regular file")]
    PreviewNotAFile,

    /// The preview read itself failed.
    #[error("could not read file: {0}")]
    PreviewReadFailed(String),

    /// An I/O request did not complete within the configured timeout.
    #[error("operation timed out")]
    OperationTimedOut,
}
