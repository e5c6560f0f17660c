//! One formatted file record

use std::fmt;

use chrono::{Local, NaiveTime};

use crate::level::Level;

/// `HH:MM:SS.mmm`
pub const TIMESTAMP_FORMAT: &str = "%H:%M:%S%.3f";

/// A single record destined for the file sink
///
/// Serializes as `HH:MM:SS.mmm\t<level char>\t<tag>\t<message>`. The
/// message is written as-is and may span several lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine<'a> {
    pub time: NaiveTime,
    pub level: Level,
    pub tag: &'a str,
    pub message: &'a str,
}

impl<'a> LogLine<'a> {
    pub fn new(time: NaiveTime, level: Level, tag: &'a str, message: &'a str) -> Self {
        Self {
            time,
            level,
            tag,
            message,
        }
    }

    /// Stamp a record with the local wall-clock time
    pub fn now(level: Level, tag: &'a str, message: &'a str) -> Self {
        Self::new(Local::now().time(), level, tag, message)
    }
}

impl fmt::Display for LogLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.time.format(TIMESTAMP_FORMAT),
            self.level.as_char(),
            self.tag,
            self.message
        )
    }
}
