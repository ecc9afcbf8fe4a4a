//! Error types for the jbopen core.
//!
//! This module defines the centralized error type [`JbOpenError`] and a type
//! alias [`Result`] used throughout the crate. All errors are implemented
//! using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Discovery and parsing errors are always recovered locally (a source that
//! cannot be read simply contributes no entries), so the only variants a host
//! ever sees are the per-activation failures [`JbOpenError::NotFound`] and
//! [`JbOpenError::Unlaunchable`], plus I/O errors from the actual process
//! spawn.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for jbopen operations.
#[derive(Debug, Error)]
pub enum JbOpenError {
    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. During discovery
    /// these are swallowed after logging; during activation a failed spawn
    /// surfaces through this variant.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A recent-projects record could not be interpreted.
    ///
    /// Raised internally by the parser and recovered by skipping the
    /// offending record or, for an unreadable document, the whole file.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The chosen project's directory no longer exists on disk.
    ///
    /// Returned by activation only. Projects are validated lazily at launch
    /// time, not when their record is parsed.
    #[error("project directory no longer exists: {}", .0.display())]
    NotFound(PathBuf),

    /// No executable could be resolved for the IDE that owns the project.
    ///
    /// The installation was discovered from its config directory but its
    /// binary is not on the search path, so the entry cannot be launched.
    /// The string names the product for host-side error messages.
    #[error("no launchable executable for {0}")]
    Unlaunchable(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for jbopen operations.
pub type Result<T> = std::result::Result<T, JbOpenError>;
