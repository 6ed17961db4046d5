//! Appender trait for log output destinations

use super::{error::Result, log_level::LogLevel, log_record::LogRecord};

pub trait Appender: Send {
    /// Render and write one record. The logger only calls this for records
    /// the appender's threshold admits.
    fn append(&mut self, record: &LogRecord) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;

    /// Minimum level this appender accepts.
    fn threshold(&self) -> LogLevel;

    /// Write pre-rendered text verbatim, bypassing thresholds.
    ///
    /// Returns `false` for appenders that are not interactive; only the
    /// console takes tabular output.
    fn write_raw(&mut self, _text: &str) -> Result<bool> {
        Ok(false)
    }
}
