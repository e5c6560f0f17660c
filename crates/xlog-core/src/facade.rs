//! The logging facade
//!
//! [`XLog`] mirrors a console-log API (one call per level plus `println`)
//! and, once initialised with file logging on, duplicates every line into a
//! log file as `HH:MM:SS.mmm\t<level>\t<tag>\t<message>`.
//!
//! An `XLog` is an ordinary value: create it at the composition root, wrap it
//! in an `Arc` and hand it to whoever logs. All file state sits behind one
//! mutex, so lines from concurrent callers never interleave.

use std::any::Any;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::console::{ConsoleSink, SharedConsole};
use crate::diagnostics::{Diagnostics, SharedDiagnostics, StderrDiagnostics};
use crate::error::{XlogError, XlogResult};
use crate::level::Level;
use crate::line::LogLine;
use crate::policy::{LevelPolicy, MemoryPropertyStore, PropertyLevelPolicy, SharedLevelPolicy};
use crate::sink::FileSink;
use crate::trace::{compose_message, stack_trace_text, Cause};

/// Opaque handle to the host environment, kept for the host's own use
pub type HostContext = Arc<dyn Any + Send + Sync>;

#[derive(Debug, Default)]
struct FileState {
    enabled: bool,
    sink: Option<FileSink>,
}

/// Console logger that can duplicate every line to a file
///
/// Until [`init`](Self::init) turns file logging on, it behaves exactly like
/// the console sink it wraps.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use xlog_core::{StderrConsole, XLog};
///
/// let log = Arc::new(XLog::new(StderrConsole::new()));
/// log.init(None, true, "/tmp/app.log")?;
/// log.debug("App", "started")?;
/// # Ok::<(), xlog_core::XlogError>(())
/// ```
pub struct XLog {
    console: SharedConsole,
    policy: SharedLevelPolicy,
    diagnostics: SharedDiagnostics,
    file: Mutex<FileState>,
    context: RwLock<Option<HostContext>>,
    sync_writes: bool,
}

impl XLog {
    /// Create a console-only logger
    ///
    /// The level policy defaults to INFO for every tag and faults go to
    /// stderr; override them with [`with_policy`](Self::with_policy) and
    /// [`with_diagnostics`](Self::with_diagnostics).
    pub fn new(console: impl ConsoleSink + 'static) -> Self {
        Self {
            console: Arc::new(console),
            policy: Arc::new(PropertyLevelPolicy::new(Arc::new(MemoryPropertyStore::new()))),
            diagnostics: Arc::new(StderrDiagnostics::new()),
            file: Mutex::new(FileState::default()),
            context: RwLock::new(None),
            sync_writes: false,
        }
    }

    pub fn with_policy(mut self, policy: impl LevelPolicy + 'static) -> Self {
        self.policy = Arc::new(policy);
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: impl Diagnostics + 'static) -> Self {
        self.diagnostics = Arc::new(diagnostics);
        self
    }

    /// Sync files opened by `init` to the device after every line
    pub fn with_sync(mut self, sync: bool) -> Self {
        self.sync_writes = sync;
        self
    }

    /// Configure file logging
    ///
    /// With `file_logging` on, `path` is created (or truncated) and every
    /// following call is duplicated into it. A previously open file is flushed
    /// and closed first. With it off, any open file is closed and `path` is
    /// ignored.
    ///
    /// If the file cannot be opened the logger is left console-only and the
    /// error is returned.
    pub fn init(
        &self,
        context: Option<HostContext>,
        file_logging: bool,
        path: impl AsRef<Path>,
    ) -> XlogResult<()> {
        *self.context.write() = context;
        self.release(self.take_sink());

        if !file_logging {
            return Ok(());
        }

        let path = path.as_ref();
        let sink = FileSink::create(path)
            .map_err(|e| XlogError::open(path, e))?
            .with_sync(self.sync_writes);
        self.install(sink);
        Ok(())
    }

    /// Turn file logging on with an already prepared sink
    pub fn attach(&self, sink: FileSink) {
        self.release(self.take_sink());
        self.install(sink);
    }

    /// Flush and close the log file; later calls are console-only
    pub fn close(&self) {
        self.release(self.take_sink());
    }

    fn take_sink(&self) -> Option<FileSink> {
        let mut state = self.file.lock();
        state.enabled = false;
        state.sink.take()
    }

    fn install(&self, sink: FileSink) {
        let previous = {
            let mut state = self.file.lock();
            state.enabled = true;
            state.sink.replace(sink)
        };
        self.release(previous);
    }

    // Call without the file lock held; diagnostics may log back into this logger.
    fn release(&self, sink: Option<FileSink>) {
        if let Some(sink) = sink {
            let path = sink.path().to_path_buf();
            if let Err(err) = sink.close() {
                self.diagnostics.file_write_failed(&path, &err);
            }
        }
    }

    /// Flip the file logging flag without opening or closing anything
    ///
    /// Switching it on when no file was ever opened makes every log call
    /// return [`XlogError::FileNotConfigured`].
    pub fn set_file_logging(&self, enabled: bool) {
        self.file.lock().enabled = enabled;
    }

    pub fn is_file_logging(&self) -> bool {
        self.file.lock().enabled
    }

    /// Path of the open log file, if any
    pub fn file_path(&self) -> Option<PathBuf> {
        self.file.lock().sink.as_ref().map(|s| s.path().to_path_buf())
    }

    /// Host context passed to the last `init`
    pub fn context(&self) -> Option<HostContext> {
        self.context.read().clone()
    }

    /// Ask the level policy; log calls themselves never filter
    pub fn is_loggable(&self, tag: &str, level: Level) -> bool {
        self.policy.is_loggable(tag, level)
    }

    /// Log a message at a level, optionally followed by its cause
    ///
    /// Returns the console byte count. File write failures are reported to
    /// the diagnostics channel and never returned; the only errors are
    /// misuse faults.
    pub fn log(
        &self,
        level: Level,
        tag: &str,
        message: &str,
        cause: Option<Cause<'_>>,
    ) -> XlogResult<usize> {
        let message = compose_message(message, cause);
        let written = self.console.println(level, tag, &message);
        self.write_file(level, tag, &message)?;
        Ok(written)
    }

    /// Low-level call taking a numeric priority (2 = VERBOSE .. 7 = ASSERT)
    pub fn println(&self, priority: i32, tag: &str, message: &str) -> XlogResult<usize> {
        let level = Level::from_priority(priority).ok_or(XlogError::InvalidPriority(priority))?;
        self.log(level, tag, message, None)
    }

    fn write_file(&self, level: Level, tag: &str, message: &str) -> XlogResult<()> {
        let failure = {
            let mut state = self.file.lock();
            if !state.enabled {
                return Ok(());
            }
            let sink = state.sink.as_mut().ok_or(XlogError::FileNotConfigured)?;

            let line = LogLine::now(level, tag, message).to_string();
            sink.write_line(&line)
                .err()
                .map(|err| (sink.path().to_path_buf(), err))
        };

        if let Some((path, err)) = failure {
            self.diagnostics.file_write_failed(&path, &err);
        }
        Ok(())
    }

    pub fn verbose(&self, tag: &str, message: &str) -> XlogResult<usize> {
        self.log(Level::Verbose, tag, message, None)
    }

    pub fn verbose_with_cause(&self, tag: &str, message: &str, cause: Cause<'_>) -> XlogResult<usize> {
        self.log(Level::Verbose, tag, message, Some(cause))
    }

    pub fn debug(&self, tag: &str, message: &str) -> XlogResult<usize> {
        self.log(Level::Debug, tag, message, None)
    }

    pub fn debug_with_cause(&self, tag: &str, message: &str, cause: Cause<'_>) -> XlogResult<usize> {
        self.log(Level::Debug, tag, message, Some(cause))
    }

    pub fn info(&self, tag: &str, message: &str) -> XlogResult<usize> {
        self.log(Level::Info, tag, message, None)
    }

    pub fn info_with_cause(&self, tag: &str, message: &str, cause: Cause<'_>) -> XlogResult<usize> {
        self.log(Level::Info, tag, message, Some(cause))
    }

    pub fn warn(&self, tag: &str, message: &str) -> XlogResult<usize> {
        self.log(Level::Warn, tag, message, None)
    }

    pub fn warn_with_cause(&self, tag: &str, message: &str, cause: Cause<'_>) -> XlogResult<usize> {
        self.log(Level::Warn, tag, message, Some(cause))
    }

    /// WARN line made of the cause's text alone
    pub fn warn_cause(&self, tag: &str, cause: Cause<'_>) -> XlogResult<usize> {
        self.log(Level::Warn, tag, &stack_trace_text(Some(cause)), None)
    }

    pub fn error(&self, tag: &str, message: &str) -> XlogResult<usize> {
        self.log(Level::Error, tag, message, None)
    }

    pub fn error_with_cause(&self, tag: &str, message: &str, cause: Cause<'_>) -> XlogResult<usize> {
        self.log(Level::Error, tag, message, Some(cause))
    }

    pub fn assert(&self, tag: &str, message: &str) -> XlogResult<usize> {
        self.log(Level::Assert, tag, message, None)
    }

    pub fn assert_with_cause(&self, tag: &str, message: &str, cause: Cause<'_>) -> XlogResult<usize> {
        self.log(Level::Assert, tag, message, Some(cause))
    }

    pub(crate) fn diagnostics(&self) -> &SharedDiagnostics {
        &self.diagnostics
    }
}

impl std::fmt::Debug for XLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.file.lock();
        f.debug_struct("XLog")
            .field("file_logging", &state.enabled)
            .field("file", &state.sink.as_ref().map(|s| s.path()))
            .field("has_context", &self.context.read().is_some())
            .finish()
    }
}
