//! Buffered, flush-per-line file sink

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Destination behind the buffer
///
/// `sync` pushes written data down to the storage device; only real files
/// have anything to do there.
pub trait SinkTarget: Write + Send {
    fn sync(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SinkTarget for File {
    fn sync(&mut self) -> io::Result<()> {
        self.sync_data()
    }
}

/// Adapts any writer into a target without device sync
struct PlainTarget<W>(W);

impl<W: Write + Send> Write for PlainTarget<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

impl<W: Write + Send> SinkTarget for PlainTarget<W> {}

/// The log file a facade duplicates lines into
///
/// Every [`write_line`](Self::write_line) appends the line and a `\n`, then
/// flushes, so the file is complete up to the last call even after a crash.
pub struct FileSink {
    path: PathBuf,
    writer: BufWriter<Box<dyn SinkTarget>>,
    sync: bool,
    lines: u64,
}

impl FileSink {
    /// Create the file, truncating whatever it held before
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)?;
        Ok(Self::with_target(path, Box::new(file)))
    }

    /// Wrap an arbitrary writer; `path` is only used to label diagnostics
    pub fn from_writer<W>(path: impl Into<PathBuf>, writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self::with_target(path, Box::new(PlainTarget(writer)))
    }

    fn with_target(path: impl Into<PathBuf>, target: Box<dyn SinkTarget>) -> Self {
        Self {
            path: path.into(),
            writer: BufWriter::new(target),
            sync: false,
            lines: 0,
        }
    }

    /// Also sync to the device after each flush
    pub fn with_sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lines successfully written since the sink was opened
    pub fn lines_written(&self) -> u64 {
        self.lines
    }

    /// Append one record and flush it
    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        if self.sync {
            self.writer.get_mut().sync()?;
        }
        self.lines += 1;
        Ok(())
    }

    /// Flush and release the file
    pub fn close(mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl std::fmt::Debug for FileSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSink")
            .field("path", &self.path)
            .field("sync", &self.sync)
            .field("lines", &self.lines)
            .finish()
    }
}
