//! Variadic logging macros.
//!
//! Each argument goes through [`LogArg::from`](crate::LogArg), so text,
//! numbers, booleans, `Option`s and `serde_json::Value`s can be mixed freely
//! in a single call.
//!
//! # Examples
//!
//! ```no_run
//! use multisink_logger::prelude::*;
//! use multisink_logger::{info, warn};
//! use serde_json::json;
//!
//! let logger = Logger::new(true, "en-GB")?;
//!
//! // Primitives are joined with spaces
//! info!(logger, "Server listening on port", 8080);
//!
//! // Structured values get their own line after the preceding text
//! warn!(logger, "slow request", json!({"path": "/search", "ms": 812}));
//! # Ok::<(), LoggerError>(())
//! ```

/// Log at an explicit level.
///
/// # Examples
///
/// ```no_run
/// # use multisink_logger::prelude::*;
/// # let logger = Logger::new(true, "en-GB")?;
/// use multisink_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code:", 500);
/// # Ok::<(), LoggerError>(())
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:expr),+ $(,)?) => {
        $logger.log_at($level, [$($crate::LogArg::from($arg)),+])
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg),+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg),+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```no_run
/// # use multisink_logger::prelude::*;
/// # let logger = Logger::new(true, "en-GB")?;
/// use multisink_logger::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing", 100, "items");
/// # Ok::<(), LoggerError>(())
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg),+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg),+)
    };
}

/// Log a silly-level (most verbose) message.
#[macro_export]
macro_rules! silly {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Silly, $($arg),+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Appender, LogLevel, LogRecord, Logger, Result};
    use parking_lot::Mutex;
    use serde_json::json;
    use std::sync::Arc;

    struct Capture(Arc<Mutex<Vec<String>>>);

    impl Appender for Capture {
        fn append(&mut self, record: &LogRecord) -> Result<()> {
            self.0.lock().push(format!("{}: {}", record.level, record.message));
            Ok(())
        }
        fn flush(&mut self) -> Result<()> {
            Ok(())
        }
        fn name(&self) -> &str {
            "capture"
        }
        fn threshold(&self) -> LogLevel {
            LogLevel::Silly
        }
    }

    fn capture() -> (Logger, Arc<Mutex<Vec<String>>>) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let logger = Logger::from_appenders(vec![Box::new(Capture(Arc::clone(&lines)))]);
        (logger, lines)
    }

    #[test]
    fn test_log_macro() {
        let (logger, lines) = capture();
        log!(logger, LogLevel::Warn, "Code:", 500);
        assert_eq!(*lines.lock(), vec!["WARN: Code: 500"]);
    }

    #[test]
    fn test_level_macros() {
        let (logger, lines) = capture();
        error!(logger, "e");
        warn!(logger, "w");
        info!(logger, "i");
        debug!(logger, "d");
        silly!(logger, "s",);

        assert_eq!(
            *lines.lock(),
            vec!["ERROR: e", "WARN: w", "INFO: i", "DEBUG: d", "SILLY: s"]
        );
    }

    #[test]
    fn test_mixed_arguments() {
        let (logger, lines) = capture();
        let user: Option<&str> = None;
        info!(logger, "user", user, 0, true, json!({"id": 9}), 1.5);

        assert_eq!(
            *lines.lock(),
            vec!["INFO: user true", r#"INFO: {"id":9}"#, "INFO: 1.5"]
        );
    }
}
