//! Routing the `log` crate macros through an `XLog`
//!
//! Record targets become tags and `log::Level::Trace` maps to VERBOSE.
//! Records are dropped when the facade's level policy says the tag is not
//! loggable at that level.

use std::sync::Arc;

use log::{LevelFilter, Metadata, Record, SetLoggerError};

use crate::facade::XLog;

/// `log::Log` implementation backed by an `XLog`
#[derive(Debug, Clone)]
pub struct XLogBridge {
    log: Arc<XLog>,
}

impl XLogBridge {
    pub fn new(log: Arc<XLog>) -> Self {
        Self { log }
    }

    pub fn inner(&self) -> &Arc<XLog> {
        &self.log
    }
}

impl log::Log for XLogBridge {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.log.is_loggable(metadata.target(), metadata.level().into())
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = record.args().to_string();
        // the log API has no way to hand a misuse fault back
        if let Err(err) = self.log.log(record.level().into(), record.target(), &message, None) {
            self.log.diagnostics().misuse(&err);
        }
    }

    fn flush(&self) {}
}

/// Install an `XLog` as the process-wide `log` logger
///
/// Fails if another logger was installed first.
pub fn install(log: Arc<XLog>, max_level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(XLogBridge::new(log)))?;
    log::set_max_level(max_level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::MemoryConsole;
    use crate::diagnostics::{DiagnosticEvent, MemoryDiagnostics};
    use crate::level::Level;
    use crate::policy::{MemoryPropertyStore, PropertyLevelPolicy};
    use log::Log;

    struct Fixture {
        bridge: XLogBridge,
        console: Arc<MemoryConsole>,
        props: Arc<MemoryPropertyStore>,
        diagnostics: Arc<MemoryDiagnostics>,
    }

    fn fixture() -> Fixture {
        let console = Arc::new(MemoryConsole::new());
        let props = Arc::new(MemoryPropertyStore::new());
        let diagnostics = Arc::new(MemoryDiagnostics::new());
        let log = XLog::new(console.clone())
            .with_policy(PropertyLevelPolicy::new(props.clone()))
            .with_diagnostics(diagnostics.clone());
        Fixture {
            bridge: XLogBridge::new(Arc::new(log)),
            console,
            props,
            diagnostics,
        }
    }

    #[test]
    fn test_record_becomes_line() {
        let f = fixture();
        f.bridge.log(
            &Record::builder()
                .args(format_args!("connected to {}", "db"))
                .level(log::Level::Warn)
                .target("Net")
                .build(),
        );

        let records = f.console.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, Level::Warn);
        assert_eq!(records[0].tag, "Net");
        assert_eq!(records[0].message, "connected to db");
    }

    #[test]
    fn test_policy_filters_records() {
        let f = fixture();
        f.bridge.log(
            &Record::builder()
                .args(format_args!("chatty"))
                .level(log::Level::Debug)
                .target("Net")
                .build(),
        );
        assert!(f.console.is_empty());

        f.props.set("log.tag.Net", "VERBOSE");
        assert!(f.bridge.enabled(
            &Metadata::builder().level(log::Level::Trace).target("Net").build()
        ));
        f.bridge.log(
            &Record::builder()
                .args(format_args!("chatty"))
                .level(log::Level::Trace)
                .target("Net")
                .build(),
        );
        assert_eq!(f.console.records()[0].level, Level::Verbose);
    }

    #[test]
    fn test_misuse_goes_to_diagnostics() {
        let f = fixture();
        f.bridge.inner().set_file_logging(true);
        f.bridge.log(
            &Record::builder()
                .args(format_args!("lost file"))
                .level(log::Level::Error)
                .target("App")
                .build(),
        );

        assert_eq!(f.console.len(), 1);
        assert!(matches!(
            f.diagnostics.events().as_slice(),
            [DiagnosticEvent::Misuse(_)]
        ));
    }
}
