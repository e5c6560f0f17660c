//! Facade error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by [`XLog`](crate::XLog)
///
/// Write and flush failures on the file sink never show up here: they are
/// reported to the [`Diagnostics`](crate::Diagnostics) channel and swallowed.
/// What remains is the init-time open failure and the misuse faults.
#[derive(Error, Debug)]
pub enum XlogError {
    /// The log file could not be created or truncated
    #[error("Failed to open log file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File logging is enabled but no file was ever opened
    #[error("File logging is enabled but no log file is configured. Was XLog::init called?")]
    FileNotConfigured,

    /// `println` was called with a priority outside VERBOSE..=ASSERT
    #[error("Invalid log priority: {0}")]
    InvalidPriority(i32),
}

impl XlogError {
    /// Create an open error
    pub fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }

    /// Whether this error is a programming error rather than an I/O condition
    pub fn is_misuse(&self) -> bool {
        matches!(self, Self::FileNotConfigured | Self::InvalidPriority(_))
    }
}

pub type XlogResult<T> = Result<T, XlogError>;
