//! Console appender implementation

use crate::core::{Appender, LocaleFormat, LogLevel, LogRecord, Result};
use colored::Colorize;
use std::io::Write;

/// Where console output goes
enum ConsoleTarget {
    /// Error and warn to stderr, everything else to stdout
    Std,
    Writer(Box<dyn Write + Send>),
}

/// Interactive sink: `<time> <LEVEL>: <message>` with a colored level label
pub struct ConsoleAppender {
    threshold: LogLevel,
    use_colors: bool,
    locale: LocaleFormat,
    target: ConsoleTarget,
}

impl ConsoleAppender {
    pub fn new(threshold: LogLevel) -> Self {
        Self {
            threshold,
            use_colors: true,
            locale: LocaleFormat::default(),
            target: ConsoleTarget::Std,
        }
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Set the locale used for the time column
    #[must_use]
    pub fn with_locale(mut self, locale: LocaleFormat) -> Self {
        self.locale = locale;
        self
    }

    /// Send all output to `writer` instead of stdout/stderr
    ///
    /// # Example
    ///
    /// ```
    /// use multisink_logger::appenders::ConsoleAppender;
    /// use multisink_logger::LogLevel;
    ///
    /// let appender = ConsoleAppender::new(LogLevel::Info)
    ///     .with_colors(false)
    ///     .with_writer(Box::new(std::io::sink()));
    /// ```
    #[must_use]
    pub fn with_writer(mut self, writer: Box<dyn Write + Send>) -> Self {
        self.target = ConsoleTarget::Writer(writer);
        self
    }

    /// Format as text with optional colors
    pub fn render(&self, record: &LogRecord) -> String {
        let (_, time) = self.locale.format_local_date_time(&record.timestamp);
        let label = format!("{:>5}", record.level);

        let label = if self.use_colors {
            let mut styled = match record.level.color_code() {
                Some(color) => label.as_str().color(color),
                None => label.as_str().normal(),
            };
            if record.level.is_dimmed() {
                styled = styled.dimmed();
            }
            styled.to_string()
        } else {
            label
        };

        format!("{} {}: {}", time, label, record.message)
    }

    fn write_line(&mut self, level: Option<LogLevel>, line: &str) -> Result<()> {
        match &mut self.target {
            ConsoleTarget::Std => match level {
                Some(LogLevel::Error) | Some(LogLevel::Warn) => eprintln!("{}", line),
                _ => println!("{}", line),
            },
            ConsoleTarget::Writer(writer) => writeln!(writer, "{}", line)?,
        }
        Ok(())
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, record: &LogRecord) -> Result<()> {
        let output = self.render(record);
        self.write_line(Some(record.level), &output)
    }

    fn flush(&mut self) -> Result<()> {
        match &mut self.target {
            ConsoleTarget::Std => {
                std::io::stdout().flush()?;
                std::io::stderr().flush()?;
            }
            ConsoleTarget::Writer(writer) => writer.flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }

    fn threshold(&self) -> LogLevel {
        self.threshold
    }

    fn write_raw(&mut self, text: &str) -> Result<bool> {
        self.write_line(None, text.trim_end_matches('\n'))?;
        Ok(true)
    }
}
