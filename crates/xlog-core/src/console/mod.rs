//! Console sinks
//!
//! The console is the primary destination of every log call:
//! - `StderrConsole`: logcat-style lines on stderr (optionally stdout)
//! - `MemoryConsole`: records calls for inspection
//! - `NoOpConsole`: discards everything

mod traits;
mod stderr;
mod memory;
mod noop;

pub use traits::{ConsoleSink, SharedConsole};
pub use stderr::StderrConsole;
pub use memory::{MemoryConsole, ConsoleRecord};
pub use noop::NoOpConsole;
