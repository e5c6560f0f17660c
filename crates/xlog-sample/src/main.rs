//! xlog sample application
//!
//! Initialises the logger once at startup from the xlog config (see
//! `XLOG_CONFIG`, `XLOG_FILE_LOGGING`, `XLOG_FILE`), then logs a few lines:
//! a plain debug line, an error carrying an I/O cause, and a lookup failure
//! whose trace is left out of the log.

use std::error::Error;
use std::fs::File;
use std::net::ToSocketAddrs;
use std::sync::Arc;

use log::LevelFilter;
use xlog_core::{install, UnknownHostError, XLog, XlogConfig};

const LOG_TAG: &str = "XlogSample";

fn build_logger() -> Result<XLog, Box<dyn Error>> {
    let config = XlogConfig::load_default().unwrap_or_else(|e| {
        eprintln!("[{LOG_TAG}] ignoring config: {e}");
        XlogConfig::default()
    });

    match config.build() {
        Ok(log) => Ok(log),
        Err(e) => {
            // keep going with console-only logging
            eprintln!("[{LOG_TAG}] file logging unavailable: {e}");
            let console_only = XlogConfig {
                file_logging: false,
                ..config
            };
            Ok(console_only.build()?)
        }
    }
}

fn open_dummy_file(log: &XLog) -> Result<(), Box<dyn Error>> {
    if let Err(e) = File::create("/nonexistent/path/dummy.file") {
        log.error_with_cause(LOG_TAG, "Could not open file for writing", &e)?;
    }
    Ok(())
}

fn resolve_update_host(log: &XLog) -> Result<(), Box<dyn Error>> {
    let host = "updates.xlog-sample.invalid";
    if let Err(e) = (host, 443).to_socket_addrs() {
        let cause = UnknownHostError::with_source(host, e);
        log.warn_with_cause(LOG_TAG, "Skipping update check, host unreachable", &cause)?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let log = Arc::new(build_logger()?);
    install(Arc::clone(&log), LevelFilter::Trace)?;

    log.debug(LOG_TAG, "In main() after XLog::init()")?;
    if let Some(path) = log.file_path() {
        log.info(LOG_TAG, &format!("Logging to {}", path.display()))?;
    }

    open_dummy_file(&log)?;
    resolve_update_host(&log)?;

    // through the log crate; filtered by the tag policy
    log::info!(target: LOG_TAG, "Shutting down");

    log.close();
    Ok(())
}
