//! In-memory console sink

use parking_lot::RwLock;

use super::traits::ConsoleSink;
use crate::level::Level;

/// One captured console call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleRecord {
    pub level: Level,
    pub tag: String,
    pub message: String,
}

/// Console sink that keeps every line in memory
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use xlog_core::{Level, MemoryConsole, XLog};
///
/// let console = Arc::new(MemoryConsole::new());
/// let log = XLog::new(console.clone());
/// log.info("Main", "hello").unwrap();
///
/// assert_eq!(console.records()[0].level, Level::Info);
/// ```
#[derive(Debug, Default)]
pub struct MemoryConsole {
    records: RwLock<Vec<ConsoleRecord>>,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Snapshot of everything written so far
    pub fn records(&self) -> Vec<ConsoleRecord> {
        self.records.read().clone()
    }

    /// Messages only, in call order
    pub fn messages(&self) -> Vec<String> {
        self.records.read().iter().map(|r| r.message.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.records.write().clear();
    }
}

impl ConsoleSink for MemoryConsole {
    fn println(&self, level: Level, tag: &str, message: &str) -> usize {
        self.records.write().push(ConsoleRecord {
            level,
            tag: tag.to_string(),
            message: message.to_string(),
        });
        message.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_console_records_in_order() {
        let console = MemoryConsole::new();
        assert!(console.is_empty());

        console.println(Level::Debug, "A", "first");
        console.println(Level::Error, "B", "second");

        assert_eq!(console.len(), 2);
        assert_eq!(console.messages(), vec!["first", "second"]);
        assert_eq!(
            console.records()[1],
            ConsoleRecord {
                level: Level::Error,
                tag: "B".to_string(),
                message: "second".to_string(),
            }
        );

        console.clear();
        assert!(console.is_empty());
    }
}
