//! Main logger implementation

use super::{
    appender::Appender,
    args::{format_args, LogArg},
    config::{report_warnings, ConfigWarning, ConsoleConfig, DEFAULT_ENV_FILE},
    error::{LoggerError, Result},
    log_level::LogLevel,
    log_record::LogRecord,
    metrics::LoggerMetrics,
    table::render_table,
    timestamp::LocaleFormat,
};
use crate::appenders::{ConsoleAppender, FileAppender};
use parking_lot::Mutex;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

/// Default directory for the per-level log files
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Default locale for timestamps
pub const DEFAULT_LOCALE: &str = "en-GB";

/// File sinks created by default, one per level
pub const DEFAULT_FILE_LEVELS: [LogLevel; 5] = [
    LogLevel::Info,
    LogLevel::Debug,
    LogLevel::Silly,
    LogLevel::Warn,
    LogLevel::Error,
];

/// An appender plus its fixed threshold, so admission is checked without
/// taking the lock.
struct Sink {
    threshold: LogLevel,
    appender: Mutex<Box<dyn Appender>>,
}

/// Leveled logger bound to a fixed set of sinks
///
/// Sinks and thresholds are fixed at construction. Each sink sits behind its
/// own mutex, so concurrent calls never interleave within a line.
///
/// # Example
///
/// ```no_run
/// use multisink_logger::{info, Logger};
/// use serde_json::json;
///
/// let logger = Logger::new(true, "en-GB")?;
/// info!(logger, "user", 42, "signed in", json!({"plan": "pro"}));
/// # Ok::<(), multisink_logger::LoggerError>(())
/// ```
pub struct Logger {
    sinks: Vec<Sink>,
    metrics: LoggerMetrics,
}

impl Logger {
    /// Build the standard topology: one file per level under `logs/` plus
    /// the console, whose threshold comes from `LOG_LEVEL`.
    ///
    /// With `wipe` set, the log files are truncated; otherwise they are
    /// appended to.
    pub fn new(wipe: bool, locale: &str) -> Result<Self> {
        Self::builder().wipe(wipe).locale(locale).build()
    }

    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Assemble a logger from explicit appenders.
    pub fn from_appenders(appenders: Vec<Box<dyn Appender>>) -> Self {
        let sinks = appenders
            .into_iter()
            .map(|appender| Sink {
                threshold: appender.threshold(),
                appender: Mutex::new(appender),
            })
            .collect();

        Self {
            sinks,
            metrics: LoggerMetrics::new(),
        }
    }

    /// Whether any sink admits `level`
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.sinks.iter().any(|sink| sink.threshold.admits(level))
    }

    /// Most verbose level any sink admits
    pub fn max_level(&self) -> Option<LogLevel> {
        self.sinks.iter().map(|sink| sink.threshold).min()
    }

    /// Format `args` and write every resulting emission at `level`.
    pub fn log_at<I>(&self, level: LogLevel, args: I)
    where
        I: IntoIterator,
        I::Item: Into<LogArg>,
    {
        if !self.enabled(level) {
            return;
        }

        for emission in format_args(args.into_iter().map(Into::into)) {
            let record = LogRecord::from_emission(level, emission);
            self.dispatch(&record);
        }
    }

    /// Write a single record to every sink whose threshold admits it
    ///
    /// **Per-Appender Panic Isolation**: each appender call is wrapped in
    /// `catch_unwind`, so one failing sink never stops delivery to the rest.
    pub fn dispatch(&self, record: &LogRecord) {
        let mut has_error = false;

        for (idx, sink) in self.sinks.iter().enumerate() {
            if !sink.threshold.admits(record.level) {
                continue;
            }

            let mut appender = sink.appender.lock();
            let append_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.append(record)
            }));

            match append_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!(
                        "[LOGGER ERROR] Appender #{} ({}) failed: {}",
                        idx,
                        appender.name(),
                        e
                    );
                    has_error = true;
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Appender #{} panicked: {}. \
                         Other appenders continue to function.",
                        idx,
                        panic_message(panic_info.as_ref())
                    );
                    has_error = true;
                }
            }
        }

        if has_error {
            self.metrics.record_failed();
        } else {
            self.metrics.record_written();
        }
    }

    #[inline]
    pub fn error<I>(&self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<LogArg>,
    {
        self.log_at(LogLevel::Error, args);
    }

    #[inline]
    pub fn warn<I>(&self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<LogArg>,
    {
        self.log_at(LogLevel::Warn, args);
    }

    #[inline]
    pub fn info<I>(&self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<LogArg>,
    {
        self.log_at(LogLevel::Info, args);
    }

    #[inline]
    pub fn debug<I>(&self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<LogArg>,
    {
        self.log_at(LogLevel::Debug, args);
    }

    #[inline]
    pub fn silly<I>(&self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<LogArg>,
    {
        self.log_at(LogLevel::Silly, args);
    }

    /// Plain logging, written at info level
    #[inline]
    pub fn log<I>(&self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<LogArg>,
    {
        self.log_at(LogLevel::Info, args);
    }

    /// Render `data` as a table on the interactive sinks only.
    ///
    /// Thresholds are ignored and file sinks never see the table.
    pub fn table<T: Serialize + ?Sized>(&self, data: &T, columns: Option<&[&str]>) {
        let rendered = match serde_json::to_value(data) {
            Ok(value) => render_table(&value, columns),
            Err(e) => format!("[unserializable: {}]\n", e),
        };

        for (idx, sink) in self.sinks.iter().enumerate() {
            let mut appender = sink.appender.lock();
            match appender.write_raw(&rendered) {
                Ok(true) => {
                    self.metrics.record_table();
                }
                Ok(false) => {}
                Err(e) => {
                    eprintln!("[LOGGER ERROR] Appender #{} table write failed: {}", idx, e);
                }
            }
        }
    }

    /// Get the logger metrics for detailed observability
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Names of the sinks, in dispatch order
    pub fn sink_names(&self) -> Vec<String> {
        self.sinks
            .iter()
            .map(|sink| sink.appender.lock().name().to_string())
            .collect()
    }

    pub fn flush(&self) -> Result<()> {
        for sink in &self.sinks {
            sink.appender.lock().flush()?;
        }
        Ok(())
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }

        let failed = self.metrics.failed_count();
        if failed > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shutting down with {} failed writes (failure rate: {:.2}%)",
                failed,
                self.metrics.failure_rate()
            );
        }
    }
}

fn panic_message(panic_info: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```no_run
/// use multisink_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .wipe(false)
///     .locale("en-US")
///     .log_dir("/var/log/my-service")
///     .console_level(LogLevel::Info)
///     .build()?;
/// # Ok::<(), LoggerError>(())
/// ```
pub struct LoggerBuilder {
    wipe: bool,
    locale: String,
    log_dir: PathBuf,
    env_file: PathBuf,
    file_levels: Vec<LogLevel>,
    console_level: Option<LogLevel>,
    console_colors: bool,
    console_writer: Option<Box<dyn Write + Send>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            wipe: true,
            locale: DEFAULT_LOCALE.to_string(),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            env_file: PathBuf::from(DEFAULT_ENV_FILE),
            file_levels: DEFAULT_FILE_LEVELS.to_vec(),
            console_level: None,
            console_colors: true,
            console_writer: None,
        }
    }

    /// Truncate log files on startup (default) or append to them
    #[must_use = "builder methods return a new value"]
    pub fn wipe(mut self, wipe: bool) -> Self {
        self.wipe = wipe;
        self
    }

    /// Locale tag for dates and times, e.g. `en-GB`
    #[must_use = "builder methods return a new value"]
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Directory holding `<level>.log` files
    #[must_use = "builder methods return a new value"]
    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }

    /// Environment file consulted for `LOG_LEVEL`
    #[must_use = "builder methods return a new value"]
    pub fn env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = path.into();
        self
    }

    /// Levels that get their own file sink
    #[must_use = "builder methods return a new value"]
    pub fn file_levels(mut self, levels: &[LogLevel]) -> Self {
        self.file_levels = levels.to_vec();
        self
    }

    /// Fix the console threshold, skipping environment lookup
    #[must_use = "builder methods return a new value"]
    pub fn console_level(mut self, level: LogLevel) -> Self {
        self.console_level = Some(level);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn console_colors(mut self, use_colors: bool) -> Self {
        self.console_colors = use_colors;
        self
    }

    /// Redirect console output away from stdout/stderr
    #[must_use = "builder methods return a new value"]
    pub fn console_writer(mut self, writer: Box<dyn Write + Send>) -> Self {
        self.console_writer = Some(writer);
        self
    }

    /// Build the Logger
    ///
    /// Configuration problems are reported on stderr and defaults are used.
    /// Failing to create the log directory or any log file is an error.
    pub fn build(self) -> Result<Logger> {
        let mut warnings = Vec::new();

        let console_level = match self.console_level {
            Some(level) => level,
            None => {
                let config = ConsoleConfig::load(&self.env_file);
                warnings.extend(config.warnings);
                config.level
            }
        };

        let locale = LocaleFormat::parse(&self.locale);
        if !locale.is_known() {
            warnings.push(ConfigWarning::UnknownLocale {
                tag: self.locale.clone(),
            });
        }

        report_warnings(&warnings);

        std::fs::create_dir_all(&self.log_dir).map_err(|e| {
            LoggerError::io_operation(
                "creating log directory",
                self.log_dir.display().to_string(),
                e,
            )
        })?;

        let mut appenders: Vec<Box<dyn Appender>> = Vec::with_capacity(self.file_levels.len() + 1);
        for level in &self.file_levels {
            let path = self.log_dir.join(format!("{}.log", level.as_lowercase()));
            let appender = FileAppender::new(path, *level, self.wipe)?.with_locale(locale.clone());
            appenders.push(Box::new(appender));
        }

        let mut console = ConsoleAppender::new(console_level)
            .with_colors(self.console_colors)
            .with_locale(locale);
        if let Some(writer) = self.console_writer {
            console = console.with_writer(writer);
        }
        appenders.push(Box::new(console));

        Ok(Logger::from_appenders(appenders))
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    /// Collects rendered messages in memory
    struct MemoryAppender {
        threshold: LogLevel,
        lines: Arc<Mutex<Vec<String>>>,
        interactive: bool,
    }

    impl Appender for MemoryAppender {
        fn append(&mut self, record: &LogRecord) -> Result<()> {
            self.lines
                .lock()
                .push(format!("{}: {}", record.level, record.message));
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "memory"
        }

        fn threshold(&self) -> LogLevel {
            self.threshold
        }

        fn write_raw(&mut self, text: &str) -> Result<bool> {
            if self.interactive {
                self.lines.lock().push(text.to_string());
            }
            Ok(self.interactive)
        }
    }

    fn memory(threshold: LogLevel, interactive: bool) -> (Box<dyn Appender>, Arc<Mutex<Vec<String>>>) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let appender = MemoryAppender {
            threshold,
            lines: Arc::clone(&lines),
            interactive,
        };
        (Box::new(appender), lines)
    }

    #[test]
    fn test_threshold_routing() {
        let (error_sink, error_lines) = memory(LogLevel::Error, false);
        let (debug_sink, debug_lines) = memory(LogLevel::Debug, false);
        let logger = Logger::from_appenders(vec![error_sink, debug_sink]);

        logger.debug(["cache miss"]);
        logger.error(["disk failure"]);
        logger.silly(["too chatty"]);

        assert_eq!(*error_lines.lock(), vec!["ERROR: disk failure"]);
        assert_eq!(
            *debug_lines.lock(),
            vec!["DEBUG: cache miss", "ERROR: disk failure"]
        );
    }

    #[test]
    fn test_one_write_per_emission() {
        let (sink, lines) = memory(LogLevel::Silly, false);
        let logger = Logger::from_appenders(vec![sink]);

        logger.info([
            LogArg::from("a"),
            LogArg::from(json!({"x": 1})),
            LogArg::from("b"),
            LogArg::from("c"),
            LogArg::from(json!({"y": 2})),
        ]);

        assert_eq!(
            *lines.lock(),
            vec![
                "INFO: a",
                r#"INFO: {"x":1}"#,
                "INFO: b c",
                r#"INFO: {"y":2}"#
            ]
        );
        assert_eq!(logger.metrics().total_written(), 4);
    }

    #[test]
    fn test_log_is_info() {
        let (sink, lines) = memory(LogLevel::Info, false);
        let logger = Logger::from_appenders(vec![sink]);

        logger.log(["hello", "world"]);
        assert_eq!(*lines.lock(), vec!["INFO: hello world"]);
    }

    #[test]
    fn test_table_only_reaches_interactive_sinks() {
        let (file_like, file_lines) = memory(LogLevel::Silly, false);
        let (console_like, console_lines) = memory(LogLevel::Error, true);
        let logger = Logger::from_appenders(vec![file_like, console_like]);

        logger.table(&json!([{"id": 1}]), None);

        assert!(file_lines.lock().is_empty());
        assert_eq!(console_lines.lock().len(), 1);
        assert!(console_lines.lock()[0].contains("(index)"));
        assert_eq!(logger.metrics().tables_written(), 1);
    }

    #[test]
    fn test_panicking_appender_is_isolated() {
        struct PanickingAppender;

        impl Appender for PanickingAppender {
            fn append(&mut self, _record: &LogRecord) -> Result<()> {
                panic!("appender exploded");
            }
            fn flush(&mut self) -> Result<()> {
                Ok(())
            }
            fn name(&self) -> &str {
                "panicking"
            }
            fn threshold(&self) -> LogLevel {
                LogLevel::Silly
            }
        }

        let (sink, lines) = memory(LogLevel::Silly, false);
        let logger = Logger::from_appenders(vec![Box::new(PanickingAppender), sink]);

        logger.warn(["still delivered"]);

        assert_eq!(*lines.lock(), vec!["WARN: still delivered"]);
        assert_eq!(logger.metrics().failed_count(), 1);
    }

    #[test]
    fn test_max_level_and_enabled() {
        let (a, _) = memory(LogLevel::Warn, false);
        let (b, _) = memory(LogLevel::Debug, false);
        let logger = Logger::from_appenders(vec![a, b]);

        assert_eq!(logger.max_level(), Some(LogLevel::Debug));
        assert!(logger.enabled(LogLevel::Debug));
        assert!(!logger.enabled(LogLevel::Silly));
    }

    #[test]
    fn test_builder_defaults() {
        let builder = LoggerBuilder::default();
        assert!(builder.wipe);
        assert_eq!(builder.locale, "en-GB");
        assert_eq!(builder.log_dir, PathBuf::from("logs"));
        assert_eq!(builder.env_file, PathBuf::from("service/.env"));
        assert_eq!(builder.file_levels.len(), 5);
    }
}
