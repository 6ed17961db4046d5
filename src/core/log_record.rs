//! Log record structure

use super::args::Emission;
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// One emission at one level, as seen by the appenders.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl LogRecord {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so every emission stays on a single line.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: LogLevel, message: impl AsRef<str>) -> Self {
        Self {
            level,
            message: Self::sanitize_message(message.as_ref()),
            timestamp: Utc::now(),
            payload: None,
        }
    }

    pub fn from_emission(level: LogLevel, emission: Emission) -> Self {
        let message = emission.render();
        let mut record = Self::new(level, message);
        if let Emission::Structured(value) = emission {
            record.payload = Some(value);
        }
        record
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
