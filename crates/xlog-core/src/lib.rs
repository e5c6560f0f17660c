//! xlog Core
//!
//! A console logging facade that can duplicate every line to a file.
//! The API mirrors a platform console log (one call per level, a numeric
//! `println`, `is_loggable`) so existing call sites keep their shape; the
//! only extra step is initialising the logger once at startup.
//!
//! File lines look like:
//!
//! ```text
//! 14:02:31.418	E	MainActivity	Could not open file for writing
//! No such file or directory (os error 2)
//! ```
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use xlog_core::{StderrConsole, XLog};
//!
//! let log = Arc::new(XLog::new(StderrConsole::new()));
//! if let Err(e) = log.init(None, true, "/tmp/app.log") {
//!     eprintln!("file logging unavailable: {e}");
//! }
//!
//! log.debug("App", "In main() after init")?;
//! # Ok::<(), xlog_core::XlogError>(())
//! ```
//!
//! Writing to the file can fail at any time (full disk, removed volume);
//! such failures go to the [`Diagnostics`] channel and never reach the
//! caller. Log calls only return errors for misuse.

pub mod error;
pub mod level;
pub mod line;
pub mod trace;
pub mod console;
pub mod policy;
pub mod diagnostics;
pub mod sink;
pub mod facade;
pub mod config;
pub mod bridge;

// Re-export commonly used types
pub use error::{XlogError, XlogResult};
pub use level::{Level, ParseLevelError};
pub use line::LogLine;
pub use trace::{stack_trace_text, Cause, UnknownHostError};

pub use console::{ConsoleSink, SharedConsole, StderrConsole, MemoryConsole, ConsoleRecord, NoOpConsole};

pub use policy::{
    LevelPolicy, SharedLevelPolicy, PropertyLevelPolicy, LevelSetting,
    PropertyStore, SharedPropertyStore,
    EnvPropertyStore, MemoryPropertyStore, ChainPropertyStore,
};

pub use diagnostics::{
    Diagnostics, SharedDiagnostics, DiagnosticEvent,
    StderrDiagnostics, MemoryDiagnostics, NoOpDiagnostics,
};

pub use sink::FileSink;
pub use facade::{XLog, HostContext};
pub use config::{XlogConfig, ConfigError, ConfigResult, ConsoleKind};
pub use bridge::{XLogBridge, install};
