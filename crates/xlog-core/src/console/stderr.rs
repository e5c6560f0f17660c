//! Console sink writing logcat-style lines to the standard streams

use std::io::{self, Write};

use super::traits::ConsoleSink;
use crate::level::Level;

/// A console that prints `<level char>/<tag>: <message>` lines
///
/// Every line of a multi-line message gets its own prefix.
#[derive(Debug, Clone, Default)]
pub struct StderrConsole {
    split_streams: bool,
}

impl StderrConsole {
    /// Everything goes to stderr
    pub fn new() -> Self {
        Self {
            split_streams: false,
        }
    }

    /// Levels below WARN go to stdout, the rest to stderr
    pub fn split_streams() -> Self {
        Self {
            split_streams: true,
        }
    }

    fn render(level: Level, tag: &str, message: &str) -> String {
        let mut out = String::with_capacity(message.len() + tag.len() + 4);
        for line in message.split('\n') {
            out.push(level.as_char());
            out.push('/');
            out.push_str(tag);
            out.push_str(": ");
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    fn write_to(out: &mut dyn Write, text: &str) -> usize {
        match out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
            Ok(()) => text.len(),
            Err(_) => 0,
        }
    }
}

impl ConsoleSink for StderrConsole {
    fn println(&self, level: Level, tag: &str, message: &str) -> usize {
        let text = Self::render(level, tag, message);
        if self.split_streams && level < Level::Warn {
            Self::write_to(&mut io::stdout().lock(), &text)
        } else {
            Self::write_to(&mut io::stderr().lock(), &text)
        }
    }
}
