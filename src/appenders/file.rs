//! File appender implementation

use crate::core::{Appender, LocaleFormat, LogLevel, LogRecord, LoggerError, Result};
use std::fs::{File, OpenOptions};
use std::io::{LineWriter, Write};
use std::path::{Path, PathBuf};

/// Plain-text, one line per record: `<date> <time> <LEVEL>: <message>`
pub struct FileAppender {
    path: PathBuf,
    name: String,
    threshold: LogLevel,
    writer: LineWriter<File>,
    locale: LocaleFormat,
}

impl FileAppender {
    /// Open `path` once for the appender's lifetime.
    ///
    /// With `truncate` set any previous content is discarded, otherwise new
    /// lines are appended after it. Failing to open is an error: a sink that
    /// cannot write must not be silently dropped.
    pub fn new(path: impl Into<PathBuf>, threshold: LogLevel, truncate: bool) -> Result<Self> {
        let path = path.into();
        let mut options = OpenOptions::new();
        options.create(true);
        if truncate {
            options.write(true).truncate(true);
        } else {
            options.append(true);
        }

        let file = options
            .open(&path)
            .map_err(|e| LoggerError::file_appender(path.display().to_string(), e.to_string()))?;

        Ok(Self {
            name: format!("file:{}", path.display()),
            path,
            threshold,
            writer: LineWriter::new(file),
            locale: LocaleFormat::default(),
        })
    }

    /// Set the locale used for the date and time columns
    #[must_use]
    pub fn with_locale(mut self, locale: LocaleFormat) -> Self {
        self.locale = locale;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Render a record as it will appear in the file (without newline)
    pub fn render(&self, record: &LogRecord) -> String {
        let (date, time) = self.locale.format_local_date_time(&record.timestamp);
        format!("{} {} {:>5}: {}", date, time, record.level, record.message)
    }
}

impl Appender for FileAppender {
    fn append(&mut self, record: &LogRecord) -> Result<()> {
        let mut output = self.render(record);
        output.push('\n');

        self.writer.write_all(output.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn threshold(&self) -> LogLevel {
        self.threshold
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_render_layout() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let appender = FileAppender::new(temp_dir.path().join("info.log"), LogLevel::Info, true)
            .expect("Failed to create appender");

        let local = Local
            .with_ymd_and_hms(2026, 10, 19, 9, 7, 5)
            .single()
            .expect("valid local time");
        let record = LogRecord::new(LogLevel::Info, "ready").with_timestamp(local.into());

        assert_eq!(appender.render(&record), "19/10/2026 09:07:05  INFO: ready");
    }

    #[test]
    fn test_truncate_and_append_modes() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("debug.log");
        fs::write(&path, "previous run\n").expect("seed file");

        {
            let mut appender =
                FileAppender::new(&path, LogLevel::Debug, false).expect("append mode");
            appender
                .append(&LogRecord::new(LogLevel::Debug, "appended"))
                .expect("append");
        }
        let content = fs::read_to_string(&path).expect("read");
        assert!(content.starts_with("previous run\n"));
        assert!(content.contains("DEBUG: appended"));

        {
            let mut appender =
                FileAppender::new(&path, LogLevel::Debug, true).expect("truncate mode");
            appender
                .append(&LogRecord::new(LogLevel::Debug, "fresh"))
                .expect("append");
        }
        let content = fs::read_to_string(&path).expect("read");
        assert_eq!(content.lines().count(), 1);
        assert!(content.contains("fresh"));
    }

    #[test]
    fn test_unwritable_path_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("missing-dir").join("error.log");

        let result = FileAppender::new(&path, LogLevel::Error, true);
        assert!(matches!(result, Err(LoggerError::FileAppenderError { .. })));
    }
}
