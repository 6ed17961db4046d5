//! # Multisink Logger
//!
//! A leveled logging facade that writes every call to several sinks at once:
//! one plain-text file per severity under `logs/` and a colored console.
//!
//! ## Features
//!
//! - **Variadic calls**: mix text, numbers and structured values in one call
//! - **Per-sink thresholds**: each file and the console filter independently
//! - **Locale-aware timestamps**: `en-GB`, `en-US`, `de-DE`, ...
//! - **Global override**: opt in to routing the `log` crate through it
//!
//! ```no_run
//! use multisink_logger::{debug, info, Logger};
//! use serde_json::json;
//!
//! let logger = Logger::new(true, "en-GB")?;
//! info!(logger, "server listening on port", 8080);
//! debug!(logger, "request", json!({"path": "/health", "status": 200}));
//! logger.table(&json!([{"route": "/health", "hits": 3}]), None);
//! # Ok::<(), multisink_logger::LoggerError>(())
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender};
    pub use crate::core::{
        global, install_global_override, Appender, Emission, LocaleFormat, LogArg, LogLevel,
        LogRecord, Logger, LoggerBuilder, LoggerError, LoggerMetrics, Result,
    };
}

pub use crate::appenders::{ConsoleAppender, FileAppender};
pub use crate::core::{
    format_args, global, install_global_override, Appender, ConfigWarning, ConsoleConfig,
    Emission, LocaleFormat, LogArg, LogLevel, LogRecord, Logger, LoggerBuilder, LoggerError,
    LoggerMetrics, Result,
};
