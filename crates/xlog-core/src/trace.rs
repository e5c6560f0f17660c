//! Rendering error causes into log text
//!
//! A cause is rendered as its `Display` text followed by one `Caused by:`
//! line per error in its `source()` chain. Causes that stem from an
//! unreachable host or a failed DNS lookup render as nothing: connectivity
//! loss is routine and would otherwise flood the log with traces.

use std::borrow::Cow;
use std::error::Error;
use std::io;

/// Borrowed error handed to the `*_with_cause` calls
pub type Cause<'a> = &'a (dyn Error + 'static);

/// Substrings the platform resolvers put in lookup failures
const RESOLVER_FAILURES: &[&str] = &[
    "failed to lookup address information",
    "Name or service not known",
    "nodename nor servname provided",
    "No such host is known",
    "Temporary failure in name resolution",
];

/// Wrap DNS failures in this so they are recognised regardless of platform text
#[derive(thiserror::Error, Debug)]
#[error("Unable to resolve host \"{host}\"")]
pub struct UnknownHostError {
    pub host: String,
    #[source]
    pub source: Option<io::Error>,
}

impl UnknownHostError {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            source: None,
        }
    }

    pub fn with_source(host: impl Into<String>, source: io::Error) -> Self {
        Self {
            host: host.into(),
            source: Some(source),
        }
    }
}

/// Iterate an error and everything behind it
pub fn chain(cause: Cause<'_>) -> impl Iterator<Item = Cause<'_>> {
    std::iter::successors(Some(cause), |err| (*err).source())
}

/// Whether a single error denotes an unreachable host or a failed lookup
pub fn is_host_unreachable(err: Cause<'_>) -> bool {
    if err.is::<UnknownHostError>() {
        return true;
    }

    let Some(io_err) = err.downcast_ref::<io::Error>() else {
        return false;
    };

    if matches!(
        io_err.kind(),
        io::ErrorKind::HostUnreachable | io::ErrorKind::NetworkUnreachable
    ) {
        return true;
    }

    // io::Error::source() skips the wrapped error itself, so look at it here
    if let Some(inner) = io_err.get_ref() {
        if chain(inner).any(is_host_unreachable) {
            return true;
        }
    }

    let text = io_err.to_string();
    RESOLVER_FAILURES.iter().any(|needle| text.contains(needle))
}

/// Full text of a cause, or an empty string when there is nothing worth logging
pub fn stack_trace_text(cause: Option<Cause<'_>>) -> String {
    let Some(cause) = cause else {
        return String::new();
    };

    if chain(cause).any(is_host_unreachable) {
        return String::new();
    }

    let mut text = cause.to_string();
    for source in chain(cause).skip(1) {
        text.push_str("\nCaused by: ");
        text.push_str(&source.to_string());
    }
    text
}

/// Append the rendered cause to a message, separated by a newline
///
/// The message is returned untouched when the cause renders empty.
pub fn compose_message<'a>(message: &'a str, cause: Option<Cause<'_>>) -> Cow<'a, str> {
    let trace = stack_trace_text(cause);
    if trace.is_empty() {
        Cow::Borrowed(message)
    } else {
        Cow::Owned(format!("{message}\n{trace}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(thiserror::Error, Debug)]
    #[error("sync failed")]
    struct SyncError {
        #[source]
        source: io::Error,
    }

    #[derive(thiserror::Error, Debug)]
    #[error("refresh failed")]
    struct RefreshError {
        #[source]
        source: UnknownHostError,
    }

    #[test]
    fn test_no_cause_is_empty() {
        assert_eq!(stack_trace_text(None), "");
        assert_eq!(compose_message("hello", None), "hello");
    }

    #[test]
    fn test_chain_rendering() {
        let err = SyncError {
            source: io::Error::new(io::ErrorKind::PermissionDenied, "disk says no"),
        };
        assert_eq!(stack_trace_text(Some(&err)), "sync failed\nCaused by: disk says no");
        assert_eq!(
            compose_message("Could not sync", Some(&err)),
            "Could not sync\nsync failed\nCaused by: disk says no"
        );
    }

    #[test]
    fn test_unknown_host_suppressed() {
        let err = UnknownHostError::new("example.invalid");
        assert_eq!(stack_trace_text(Some(&err)), "");
        assert_eq!(compose_message("offline", Some(&err)), "offline");
    }

    #[test]
    fn test_unknown_host_deep_in_chain_suppressed() {
        let err = RefreshError {
            source: UnknownHostError::with_source(
                "api.example.invalid",
                io::Error::new(io::ErrorKind::Other, "lookup"),
            ),
        };
        assert_eq!(stack_trace_text(Some(&err)), "");
    }

    #[test]
    fn test_io_unreachable_kinds_suppressed() {
        let host = io::Error::from(io::ErrorKind::HostUnreachable);
        let network = io::Error::from(io::ErrorKind::NetworkUnreachable);
        assert!(is_host_unreachable(&host));
        assert!(is_host_unreachable(&network));
        assert_eq!(stack_trace_text(Some(&host)), "");
    }

    #[test]
    fn test_resolver_message_suppressed() {
        let err = io::Error::new(
            io::ErrorKind::Other,
            "failed to lookup address information: Name or service not known",
        );
        assert!(is_host_unreachable(&err));
    }

    #[test]
    fn test_wrapped_inside_io_error_suppressed() {
        let err = io::Error::new(io::ErrorKind::Other, UnknownHostError::new("db.internal"));
        assert!(is_host_unreachable(&err));
        assert_eq!(stack_trace_text(Some(&err)), "");
    }

    #[test]
    fn test_other_io_errors_not_suppressed() {
        let err = io::Error::from(io::ErrorKind::ConnectionRefused);
        assert!(!is_host_unreachable(&err));
        assert!(!stack_trace_text(Some(&err)).is_empty());
    }
}
