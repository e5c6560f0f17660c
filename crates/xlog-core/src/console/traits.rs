//! Console sink trait definition

use std::sync::Arc;

use crate::level::Level;

/// The platform log that every call is written to
///
/// The facade never filters before calling `println`; an implementation may
/// apply its own display policy but receives every line.
pub trait ConsoleSink: Send + Sync {
    /// Write one message and return the number of bytes written
    fn println(&self, level: Level, tag: &str, message: &str) -> usize;
}

/// Type alias for an Arc-wrapped console sink
pub type SharedConsole = Arc<dyn ConsoleSink>;

impl<T: ConsoleSink + ?Sized> ConsoleSink for Arc<T> {
    fn println(&self, level: Level, tag: &str, message: &str) -> usize {
        (**self).println(level, tag, message)
    }
}
