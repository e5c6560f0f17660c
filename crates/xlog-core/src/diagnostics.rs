//! Side channel for faults the facade swallows
//!
//! A failed write to the log file must never reach the code that logged, so
//! it is handed to a [`Diagnostics`] implementation instead:
//! - `StderrDiagnostics`: prints to stderr (default)
//! - `MemoryDiagnostics`: records events for inspection
//! - `NoOpDiagnostics`: drops them

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::XlogError;

/// Receiver of faults that cannot be returned to the caller
pub trait Diagnostics: Send + Sync {
    /// Writing or flushing a line to the log file failed
    fn file_write_failed(&self, path: &Path, error: &io::Error);

    /// A misuse fault was raised where no `Result` can carry it
    fn misuse(&self, error: &XlogError);
}

/// Type alias for an Arc-wrapped diagnostics channel
pub type SharedDiagnostics = Arc<dyn Diagnostics>;

impl<T: Diagnostics + ?Sized> Diagnostics for Arc<T> {
    fn file_write_failed(&self, path: &Path, error: &io::Error) {
        (**self).file_write_failed(path, error)
    }

    fn misuse(&self, error: &XlogError) {
        (**self).misuse(error)
    }
}

/// Prints faults to stderr with a prefix
#[derive(Debug, Clone)]
pub struct StderrDiagnostics {
    prefix: String,
}

impl Default for StderrDiagnostics {
    fn default() -> Self {
        Self::new()
    }
}

impl StderrDiagnostics {
    pub fn new() -> Self {
        Self {
            prefix: "[xlog]".to_string(),
        }
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Diagnostics for StderrDiagnostics {
    fn file_write_failed(&self, path: &Path, error: &io::Error) {
        eprintln!(
            "{} ERROR: could not write to {}: {}",
            self.prefix,
            path.display(),
            error
        );
    }

    fn misuse(&self, error: &XlogError) {
        eprintln!("{} ERROR: {}", self.prefix, error);
    }
}

/// Drops every fault
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpDiagnostics;

impl Diagnostics for NoOpDiagnostics {
    fn file_write_failed(&self, _path: &Path, _error: &io::Error) {}
    fn misuse(&self, _error: &XlogError) {}
}

/// One recorded fault
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticEvent {
    FileWriteFailed {
        path: PathBuf,
        kind: io::ErrorKind,
        message: String,
    },
    Misuse(String),
}

/// Keeps faults in memory
#[derive(Debug, Default)]
pub struct MemoryDiagnostics {
    events: RwLock<Vec<DiagnosticEvent>>,
}

impl MemoryDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events.read().clone()
    }

    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Diagnostics for MemoryDiagnostics {
    fn file_write_failed(&self, path: &Path, error: &io::Error) {
        self.events.write().push(DiagnosticEvent::FileWriteFailed {
            path: path.to_path_buf(),
            kind: error.kind(),
            message: error.to_string(),
        });
    }

    fn misuse(&self, error: &XlogError) {
        self.events.write().push(DiagnosticEvent::Misuse(error.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_diagnostics_records() {
        let diagnostics = MemoryDiagnostics::new();
        assert!(diagnostics.is_empty());

        let err = io::Error::new(io::ErrorKind::StorageFull, "no space left");
        diagnostics.file_write_failed(Path::new("/tmp/app.log"), &err);
        diagnostics.misuse(&XlogError::FileNotConfigured);

        let events = diagnostics.events();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0],
            DiagnosticEvent::FileWriteFailed {
                path: PathBuf::from("/tmp/app.log"),
                kind: io::ErrorKind::StorageFull,
                message: "no space left".to_string(),
            }
        );
        assert!(matches!(&events[1], DiagnosticEvent::Misuse(text) if text.contains("init")));
    }

    #[test]
    fn test_stderr_diagnostics_does_not_panic() {
        let diagnostics = StderrDiagnostics::with_prefix("[test]");
        assert_eq!(diagnostics.prefix, "[test]");
        diagnostics.file_write_failed(Path::new("x.log"), &io::Error::from(io::ErrorKind::Other));
        diagnostics.misuse(&XlogError::InvalidPriority(0));
        NoOpDiagnostics.misuse(&XlogError::InvalidPriority(0));
    }
}
