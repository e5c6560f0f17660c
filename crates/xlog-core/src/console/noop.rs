//! No-op console sink

use super::traits::ConsoleSink;
use crate::level::Level;

/// A console that drops every line
///
/// Reports the message length as written so return values stay meaningful.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpConsole;

impl NoOpConsole {
    pub fn new() -> Self {
        Self
    }
}

impl ConsoleSink for NoOpConsole {
    fn println(&self, _level: Level, _tag: &str, message: &str) -> usize {
        message.len()
    }
}
